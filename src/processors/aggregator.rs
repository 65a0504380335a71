use crate::models::{Coordinates, JoinedRecord, MapMarker, TrendPoint, TrendSeries};
use crate::utils::coordinates::mean_position;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One marker per record that has both a value and coordinates. Records
/// without a location cannot be placed on the map and are skipped.
pub fn to_markers(filtered: &[JoinedRecord]) -> Vec<MapMarker> {
    filtered
        .iter()
        .filter_map(|record| {
            let coordinates = record.coordinates?;
            let value = record.value?;
            Some(MapMarker {
                site_id: record.site_id.clone(),
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
                value,
                observed_at: record.observed_at,
                popup_text: popup_text(&record.site_id, value, record.observed_at),
                tooltip_text: record.site_id.clone(),
            })
        })
        .collect()
}

/// Mean value per (date, site) pair, ordered by date then site.
///
/// Grouping does not need coordinates, so records of unlocated sites still
/// contribute a trend line.
pub fn to_trend(filtered: &[JoinedRecord]) -> Vec<TrendPoint> {
    let mut groups: BTreeMap<(NaiveDate, &str), (f64, usize)> = BTreeMap::new();

    for record in filtered {
        let Some(value) = record.value else {
            continue;
        };
        let entry = groups
            .entry((record.observed_at, record.site_id.as_str()))
            .or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((observed_at, site_id), (sum, count))| TrendPoint {
            observed_at,
            site_id: site_id.to_string(),
            mean_value: sum / count as f64,
        })
        .collect()
}

/// [`to_trend`] tagged with the characteristic for the chart title.
pub fn trend_series(characteristic: &str, filtered: &[JoinedRecord]) -> TrendSeries {
    TrendSeries::new(characteristic, to_trend(filtered))
}

/// Where to centre the map: the mean marker position.
pub fn map_center(markers: &[MapMarker]) -> Option<Coordinates> {
    mean_position(
        markers
            .iter()
            .map(|m| Coordinates::new(m.latitude, m.longitude)),
    )
}

/// Popup body shown when a marker is clicked.
pub fn popup_text(site_id: &str, value: f64, observed_at: NaiveDate) -> String {
    format!(
        "Site: {}<br>Value: {}<br>Date: {}",
        site_id,
        format_value(value),
        observed_at.format("%Y-%m-%d")
    )
}

/// Shortest decimal form of a value, with whole numbers keeping one decimal
/// place (`1.0`, `2.5`, `0.003`).
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

use crate::error::{ProcessingError, Result};
use crate::models::Coordinates;

/// Convert a `DD:MM:SS` coordinate to decimal degrees.
///
/// Older site inventories occasionally carry sexagesimal coordinates instead
/// of decimal degrees. A leading minus applies to the whole value.
///
/// # Examples
/// ```
/// use wq_site_finder::utils::dms_to_decimal;
///
/// let decimal = dms_to_decimal("38:56:59").unwrap();
/// assert!((decimal - 38.949722).abs() < 0.000001);
/// ```
pub fn dms_to_decimal(dms: &str) -> Result<f64> {
    let parts: Vec<&str> = dms.split(':').map(str::trim).collect();

    if parts.len() != 3 {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Invalid DMS format: '{}'. Expected format: 'DD:MM:SS'",
            dms
        )));
    }

    let is_negative = dms.trim_start().starts_with('-');

    let component = |raw: &str, name: &str| {
        raw.parse::<f64>().map_err(|_| {
            ProcessingError::InvalidCoordinate(format!("Invalid {} value: '{}'", name, raw))
        })
    };

    let degrees = component(parts[0], "degrees")?;
    let minutes = component(parts[1], "minutes")?;
    let seconds = component(parts[2], "seconds")?;

    if !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Minutes and seconds must be in [0, 60): '{}'",
            dms
        )));
    }

    let decimal_value = degrees.abs() + minutes / 60.0 + seconds / 3600.0;

    Ok(if is_negative {
        -decimal_value
    } else {
        decimal_value
    })
}

/// Parse coordinate that might be in DMS or decimal format
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    let value = if trimmed.contains(':') {
        dms_to_decimal(trimmed)?
    } else {
        trimmed.parse::<f64>().map_err(|_| {
            ProcessingError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
        })?
    };

    if !value.is_finite() {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Coordinate is not finite: '{}'",
            coord_str
        )));
    }

    Ok(value)
}

/// Arithmetic mean of a set of points; `None` for an empty set.
pub fn mean_position<I>(points: I) -> Option<Coordinates>
where
    I: IntoIterator<Item = Coordinates>,
{
    let (count, lat_sum, lon_sum) = points
        .into_iter()
        .fold((0usize, 0.0f64, 0.0f64), |(n, lat, lon), p| {
            (n + 1, lat + p.latitude, lon + p.longitude)
        });

    if count == 0 {
        return None;
    }

    Some(Coordinates::new(
        lat_sum / count as f64,
        lon_sum / count as f64,
    ))
}

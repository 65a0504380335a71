use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub site_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
    pub observed_at: NaiveDate,
    pub popup_text: String,
    pub tooltip_text: String,
}

/// Mean value for one site on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub observed_at: NaiveDate,
    pub site_id: String,
    pub mean_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub characteristic: String,
    pub title: String,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn new(characteristic: impl Into<String>, points: Vec<TrendPoint>) -> Self {
        let characteristic = characteristic.into();
        let title = format!("Trend of {} Over Time", characteristic);
        Self {
            characteristic,
            title,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distinct site ids in the series, in first-seen order. One line per site.
    pub fn site_ids(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for point in &self.points {
            if !seen.contains(&point.site_id.as_str()) {
                seen.push(point.site_id.as_str());
            }
        }
        seen
    }
}

/// Empty-result states the UI shows as notices rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewWarning {
    NoDataForCharacteristic,
    NoMatchingRecords,
    InsufficientTrendData,
}

impl ViewWarning {
    pub fn message(&self) -> &'static str {
        match self {
            ViewWarning::NoDataForCharacteristic => "No data available for this contaminant.",
            ViewWarning::NoMatchingRecords => "No data found for the selected filters.",
            ViewWarning::InsufficientTrendData => "Insufficient data to generate trend plot.",
        }
    }
}

impl std::fmt::Display for ViewWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

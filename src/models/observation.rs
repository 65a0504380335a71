use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single measurement event from the results upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub site_id: String,
    pub characteristic: String,
    pub observed_at: NaiveDate,
    /// `None` when the raw cell could not be read as a number.
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(
        site_id: impl Into<String>,
        characteristic: impl Into<String>,
        observed_at: NaiveDate,
        value: Option<f64>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            characteristic: characteristic.into(),
            observed_at,
            value,
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_value_presence() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        let measured = Observation::new("USGS-01", "Lead", date, Some(1.5));
        assert!(measured.has_value());

        let missing = Observation::new("USGS-01", "Lead", date, None);
        assert!(!missing.has_value());
    }
}

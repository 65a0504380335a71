use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Coordinates, Observation};

/// An observation with the coordinates of its site attached, if the site was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub site_id: String,
    pub characteristic: String,
    pub observed_at: NaiveDate,
    pub value: Option<f64>,
    pub coordinates: Option<Coordinates>,
}

impl JoinedRecord {
    pub fn new(observation: Observation, coordinates: Option<Coordinates>) -> Self {
        Self {
            site_id: observation.site_id,
            characteristic: observation.characteristic,
            observed_at: observation.observed_at,
            value: observation.value,
            coordinates,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub matched: usize,
    pub unmatched: usize,
    /// Site rows ignored because an earlier row already used the same identifier.
    pub duplicate_sites: usize,
}

/// Output of the join: records in results-file order plus match statistics.
#[derive(Debug, Clone, Default)]
pub struct JoinedDataset {
    pub records: Vec<JoinedRecord>,
    pub stats: JoinStats,
}

impl JoinedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN};

/// Value bounds observed for one characteristic.
///
/// When no usable record exists the bounds fall back to `(0.0, 1.0)` and
/// `has_data` is false, so a slider can still be drawn while the caller shows a
/// "no data" notice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicRange {
    pub min: f64,
    pub max: f64,
    pub has_data: bool,
}

impl CharacteristicRange {
    pub fn observed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            has_data: true,
        }
    }

    pub fn no_data() -> Self {
        Self::no_data_with(DEFAULT_RANGE_MIN, DEFAULT_RANGE_MAX)
    }

    pub fn no_data_with(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            has_data: false,
        }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// The active filter selections. Owned by the caller and passed by value into
/// the filter engine on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub characteristic: String,
    pub value_min: f64,
    pub value_max: f64,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

impl FilterSpec {
    pub fn new(
        characteristic: impl Into<String>,
        (value_min, value_max): (f64, f64),
        (date_start, date_end): (NaiveDate, NaiveDate),
    ) -> Self {
        Self {
            characteristic: characteristic.into(),
            value_min,
            value_max,
            date_start,
            date_end,
        }
    }

    /// Default selection for a characteristic: its full value range over the
    /// dataset's full date span. An empty dataset gets an unbounded date span.
    pub fn for_characteristic(
        characteristic: impl Into<String>,
        range: CharacteristicRange,
        date_bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> Self {
        let dates = date_bounds.unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self::new(characteristic, range.as_tuple(), dates)
    }

    pub fn with_value_range(mut self, min: f64, max: f64) -> Self {
        self.value_min = min;
        self.value_max = max;
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }

    /// True when the bounds cannot match anything, e.g. after the user dragged
    /// the lower handle past the upper one.
    pub fn is_inverted(&self) -> bool {
        self.value_min > self.value_max || self.date_start > self.date_end
    }

    pub fn contains_value(&self, value: f64) -> bool {
        value >= self.value_min && value <= self.value_max
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.date_start && date <= self.date_end
    }
}

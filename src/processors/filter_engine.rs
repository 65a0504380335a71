use crate::models::{CharacteristicRange, FilterSpec, JoinedRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Queries over the joined record set: the characteristic catalogue, value and
/// date bounds that seed the filter controls, and the filtered subset itself.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine {
    no_data_range: CharacteristicRange,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self {
            no_data_range: CharacteristicRange::no_data(),
        }
    }

    /// Use different fallback bounds for characteristics without values.
    pub fn with_no_data_range(no_data_range: CharacteristicRange) -> Self {
        Self { no_data_range }
    }

    /// Distinct characteristic names, sorted.
    pub fn characteristics(&self, records: &[JoinedRecord]) -> Vec<String> {
        self.characteristic_counts(records).into_keys().collect()
    }

    /// Number of records per characteristic, sorted by name.
    pub fn characteristic_counts(&self, records: &[JoinedRecord]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in records {
            *counts.entry(record.characteristic.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Min and max value among records of `characteristic` that have a value.
    ///
    /// With no such record the fallback range is returned with `has_data` unset.
    pub fn range_for_characteristic(
        &self,
        records: &[JoinedRecord],
        characteristic: &str,
    ) -> CharacteristicRange {
        let bounds = records
            .iter()
            .filter(|r| r.characteristic == characteristic)
            .filter_map(|r| r.value)
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            });

        match bounds {
            Some((min, max)) => CharacteristicRange::observed(min, max),
            None => {
                debug!(characteristic, "no values for characteristic");
                self.no_data_range
            }
        }
    }

    /// Earliest and latest observation date across all records.
    pub fn date_bounds(&self, records: &[JoinedRecord]) -> Option<(NaiveDate, NaiveDate)> {
        let first = records.first()?.observed_at;
        Some(records.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.observed_at), hi.max(r.observed_at))
        }))
    }

    /// The default selection for `characteristic`: its whole value range over
    /// the whole date span of the dataset.
    pub fn default_spec(&self, records: &[JoinedRecord], characteristic: &str) -> FilterSpec {
        FilterSpec::for_characteristic(
            characteristic,
            self.range_for_characteristic(records, characteristic),
            self.date_bounds(records),
        )
    }

    /// Records matching the characteristic, with a value inside the value range
    /// and a date inside the date range. Both ranges are inclusive; an inverted
    /// range matches nothing. Input order is kept.
    pub fn apply_filters(&self, records: &[JoinedRecord], spec: &FilterSpec) -> Vec<JoinedRecord> {
        if spec.is_inverted() {
            debug!(?spec, "inverted filter bounds, empty selection");
            return Vec::new();
        }

        let filtered: Vec<JoinedRecord> = records
            .iter()
            .filter(|r| Self::matches(r, spec))
            .cloned()
            .collect();

        debug!(
            characteristic = %spec.characteristic,
            total = records.len(),
            matched = filtered.len(),
            "applied filters"
        );

        filtered
    }

    fn matches(record: &JoinedRecord, spec: &FilterSpec) -> bool {
        record.characteristic == spec.characteristic
            && spec.contains_date(record.observed_at)
            && record.value.is_some_and(|v| spec.contains_value(v))
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// [`FilterEngine::range_for_characteristic`] with the default `(0, 1)` fallback.
pub fn range_for_characteristic(
    records: &[JoinedRecord],
    characteristic: &str,
) -> CharacteristicRange {
    FilterEngine::new().range_for_characteristic(records, characteristic)
}

/// [`FilterEngine::apply_filters`] with default settings.
pub fn apply_filters(records: &[JoinedRecord], spec: &FilterSpec) -> Vec<JoinedRecord> {
    FilterEngine::new().apply_filters(records, spec)
}

//! Request/response surface for the UI layer.
//!
//! Uploads are normalized and joined once per file pair; every filter change
//! then runs filter and aggregation against the cached join and returns a
//! fresh [`ExplorerView`].

use crate::config::Settings;
use crate::error::Result;
use crate::models::{
    CharacteristicRange, Coordinates, FilterSpec, IngestReport, JoinedDataset, JoinedRecord,
    MapMarker, TrendSeries, ViewWarning,
};
use crate::processors::{aggregator, DataMerger, FilterEngine};
use crate::readers::{ResultsReader, SiteReader};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Normalized and joined uploads, with what normalization dropped.
#[derive(Debug)]
pub struct LoadedDataset {
    pub dataset: JoinedDataset,
    pub results_report: IngestReport,
    pub sites_report: IngestReport,
}

/// Run the normalize and join steps for one pair of uploads.
pub fn load_dataset(results: &[u8], sites: &[u8], settings: &Settings) -> Result<LoadedDataset> {
    let (observations, results_report) = ResultsReader::from_settings(settings)
        .read_bytes(results)
        .inspect_err(|e| warn!(error = %e, "results upload rejected"))?;

    let (site_rows, sites_report) = SiteReader::from_settings(settings)
        .read_bytes(sites)
        .inspect_err(|e| warn!(error = %e, "sites upload rejected"))?;

    let dataset = DataMerger::new().merge(observations, &site_rows);

    info!(
        records = dataset.len(),
        unmatched = dataset.stats.unmatched,
        "loaded uploads"
    );

    Ok(LoadedDataset {
        dataset,
        results_report,
        sites_report,
    })
}

/// Everything the UI needs to draw for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct ExplorerView {
    pub spec: FilterSpec,
    pub range: CharacteristicRange,
    pub records: Vec<JoinedRecord>,
    pub markers: Vec<MapMarker>,
    pub map_center: Option<Coordinates>,
    pub trend: TrendSeries,
    pub warnings: Vec<ViewWarning>,
}

impl ExplorerView {
    pub fn has_warning(&self, warning: ViewWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Query handle over one loaded dataset. Cheap to clone.
#[derive(Clone)]
pub struct Explorer {
    data: Arc<LoadedDataset>,
    engine: FilterEngine,
}

impl Explorer {
    pub fn new(data: LoadedDataset, settings: &Settings) -> Self {
        Self {
            data: Arc::new(data),
            engine: FilterEngine::with_no_data_range(settings.no_data_range()),
        }
    }

    pub fn data(&self) -> &LoadedDataset {
        &self.data
    }

    pub fn records(&self) -> &[JoinedRecord] {
        &self.data.dataset.records
    }

    pub fn characteristics(&self) -> Vec<String> {
        self.engine.characteristics(self.records())
    }

    pub fn characteristic_counts(&self) -> BTreeMap<String, usize> {
        self.engine.characteristic_counts(self.records())
    }

    pub fn range_for(&self, characteristic: &str) -> CharacteristicRange {
        self.engine.range_for_characteristic(self.records(), characteristic)
    }

    pub fn default_spec(&self, characteristic: &str) -> FilterSpec {
        self.engine.default_spec(self.records(), characteristic)
    }

    /// Filter and aggregate for `spec`.
    ///
    /// Empty outcomes are reported as warnings; when nothing matches the map
    /// and trend steps are skipped.
    pub fn view(&self, spec: &FilterSpec) -> ExplorerView {
        let mut warnings = Vec::new();

        let range = self.range_for(&spec.characteristic);
        if !range.has_data {
            warnings.push(ViewWarning::NoDataForCharacteristic);
        }

        let records = self.engine.apply_filters(self.records(), spec);

        let (markers, map_center, trend) = if records.is_empty() {
            warnings.push(ViewWarning::NoMatchingRecords);
            (Vec::new(), None, TrendSeries::new(spec.characteristic.as_str(), Vec::new()))
        } else {
            let markers = aggregator::to_markers(&records);
            let map_center = aggregator::map_center(&markers);
            let trend = aggregator::trend_series(&spec.characteristic, &records);
            // apply_filters keeps only valued records, each of which yields a
            // point, so this holds only for valueless input.
            if trend.is_empty() {
                warnings.push(ViewWarning::InsufficientTrendData);
            }
            (markers, map_center, trend)
        };

        debug!(
            records = records.len(),
            markers = markers.len(),
            trend_points = trend.points.len(),
            warnings = warnings.len(),
            "built view"
        );

        ExplorerView {
            spec: spec.clone(),
            range,
            records,
            markers,
            map_center,
            trend,
            warnings,
        }
    }
}

/// Holds the explorer for the current upload pair, reloading only when the
/// uploaded bytes change.
pub struct ExplorerSession {
    settings: Settings,
    cached: Option<(u64, Explorer)>,
}

impl ExplorerSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cached: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Normalize and join the uploads, or return the cached result when the
    /// same pair was loaded last time.
    pub fn load(&mut self, results: &[u8], sites: &[u8]) -> Result<Explorer> {
        let key = fingerprint(results, sites);

        if let Some((cached_key, explorer)) = &self.cached {
            if *cached_key == key {
                debug!("reusing joined dataset for unchanged uploads");
                return Ok(explorer.clone());
            }
        }

        let data = load_dataset(results, sites, &self.settings)?;
        let explorer = Explorer::new(data, &self.settings);
        self.cached = Some((key, explorer.clone()));
        Ok(explorer)
    }

    pub fn current(&self) -> Option<&Explorer> {
        self.cached.as_ref().map(|(_, explorer)| explorer)
    }
}

impl Default for ExplorerSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

fn fingerprint(results: &[u8], sites: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    results.hash(&mut hasher);
    sites.hash(&mut hasher);
    hasher.finish()
}

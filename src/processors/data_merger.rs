use crate::models::{Coordinates, JoinStats, JoinedDataset, JoinedRecord, Observation, Site};
use std::collections::HashMap;
use tracing::debug;

/// Left-joins observations with site locations on the site identifier.
#[derive(Debug, Default)]
pub struct DataMerger;

impl DataMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merge observations with their site coordinates.
    ///
    /// Output follows the observation order. Identifiers compare by exact string
    /// equality; both sides are expected to be normalized already. When the
    /// sites upload lists an identifier more than once the first row is used,
    /// so each observation yields exactly one record.
    pub fn merge(&self, observations: Vec<Observation>, sites: &[Site]) -> JoinedDataset {
        let (locations, duplicate_sites) = self.index_sites(sites);

        let mut stats = JoinStats {
            duplicate_sites,
            ..JoinStats::default()
        };
        let mut records = Vec::with_capacity(observations.len());

        for observation in observations {
            let coordinates = locations.get(observation.site_id.as_str()).copied();

            if coordinates.is_some() {
                stats.matched += 1;
            } else {
                stats.unmatched += 1;
            }

            records.push(JoinedRecord::new(observation, coordinates));
        }

        debug!(
            matched = stats.matched,
            unmatched = stats.unmatched,
            duplicate_sites = stats.duplicate_sites,
            "joined results with sites"
        );

        JoinedDataset { records, stats }
    }

    fn index_sites<'a>(&self, sites: &'a [Site]) -> (HashMap<&'a str, Coordinates>, usize) {
        let mut locations = HashMap::with_capacity(sites.len());
        let mut duplicates = 0;

        for site in sites {
            if locations.contains_key(site.site_id.as_str()) {
                duplicates += 1;
                continue;
            }
            locations.insert(site.site_id.as_str(), site.coordinates());
        }

        (locations, duplicates)
    }
}

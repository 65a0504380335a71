pub mod aggregator;
pub mod data_merger;
pub mod filter_engine;

pub use aggregator::{map_center, to_markers, to_trend, trend_series};
pub use data_merger::DataMerger;
pub use filter_engine::{apply_filters, range_for_characteristic, FilterEngine};

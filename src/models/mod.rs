pub mod filter;
pub mod joined;
pub mod observation;
pub mod report;
pub mod site;
pub mod view;

pub use filter::{CharacteristicRange, FilterSpec};
pub use joined::{JoinStats, JoinedDataset, JoinedRecord};
pub use observation::Observation;
pub use report::{CoercionGap, GapKind, IngestReport};
pub use site::{Coordinates, Site};
pub use view::{MapMarker, TrendPoint, TrendSeries, ViewWarning};

pub mod constants;
pub mod coordinates;
pub mod dates;
pub mod identifiers;
pub mod progress;

pub use constants::*;
pub use coordinates::{dms_to_decimal, parse_coordinate};
pub use dates::parse_observation_date;
pub use identifiers::normalize_site_id;
pub use progress::ProgressReporter;

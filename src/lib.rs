pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod session;
pub mod utils;

pub use config::Settings;
pub use error::{IngestionError, ProcessingError, Result};
pub use session::{load_dataset, Explorer, ExplorerSession, ExplorerView};

pub mod results_reader;
pub mod site_reader;
pub mod table;
pub mod upload;

pub use results_reader::ResultsReader;
pub use site_reader::SiteReader;
pub use table::{ColumnIndex, TableReader};
pub use upload::{decode_upload, read_upload_file, UploadBytes};

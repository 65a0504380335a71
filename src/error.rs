use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Which of the two uploads a problem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Results,
    Sites,
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadKind::Results => write!(f, "results"),
            UploadKind::Sites => write!(f, "sites"),
        }
    }
}

/// File-level failures. Any of these rejects the whole upload; the user has to
/// upload a corrected file before filtering can start.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("{upload} file is empty")]
    EmptyUpload { upload: UploadKind },

    #[error("{upload} file is missing required column '{column}'")]
    MissingColumn { upload: UploadKind, column: String },

    #[error("{upload} file column '{column}' could not be parsed: {message}")]
    UnparsableColumn {
        upload: UploadKind,
        column: String,
        message: String,
    },

    #[error("{upload} file is not valid text: {message}")]
    Encoding { upload: UploadKind, message: String },

    #[error("{upload} archive contains no CSV entry")]
    NoCsvInArchive { upload: UploadKind },
}

impl IngestionError {
    pub fn upload(&self) -> UploadKind {
        match self {
            IngestionError::EmptyUpload { upload }
            | IngestionError::MissingColumn { upload, .. }
            | IngestionError::UnparsableColumn { upload, .. }
            | IngestionError::Encoding { upload, .. }
            | IngestionError::NoCsvInArchive { upload } => *upload,
        }
    }
}

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    /// True when the error means the upload must be replaced, as opposed to an
    /// environment problem such as an unreadable path.
    pub fn is_ingestion_error(&self) -> bool {
        matches!(
            self,
            ProcessingError::Ingestion(_) | ProcessingError::Csv(_) | ProcessingError::Archive(_)
        )
    }
}

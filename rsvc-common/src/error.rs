use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RsvcError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("Invalid library coordinate '{0}': {1}")]
    InvalidCoordinate(String, String),

    #[error("Unsupported state file version {found} (expected {expected})")]
    StateVersion { found: u32, expected: u32 },

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Installation Error: {0}")]
    InstallError(String),

    #[error("DownloadError: Failed to download '{0}' from '{1}': {2}")]
    DownloadError(String, String, String),

    #[error("HttpError: {0}")]
    HttpError(String),

    #[error("Checksum Error: {0}")]
    ChecksumError(String),

    #[error("Catalog Error: {0}")]
    Catalog(String),

    #[error("IoError: {0}")]
    IoError(String),
}

impl From<std::io::Error> for RsvcError {
    fn from(err: std::io::Error) -> Self {
        RsvcError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for RsvcError {
    fn from(err: serde_json::Error) -> Self {
        RsvcError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, RsvcError>;

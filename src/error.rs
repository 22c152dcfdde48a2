//! Error types for cachebump

use thiserror::Error;

/// Main error type for cachebump
#[derive(Error, Debug)]
pub enum CachebumpError {
    #[error("Invalid base date '{0}': expected YYYYMMDD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Git error: {0}")]
    GitError(String),

    #[error("Marker data error: {0}")]
    MarkerDataError(String),

    #[error("Container element not found: {0}")]
    ContainerNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for cachebump operations
pub type Result<T> = std::result::Result<T, CachebumpError>;

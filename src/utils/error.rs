use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Upload rejected: {reason}")]
    UploadRejectedError { reason: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;

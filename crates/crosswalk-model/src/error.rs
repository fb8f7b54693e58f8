use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrosswalkError {
    /// Malformed or missing required input. Never retried.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },
    /// The lexical index has not been built yet.
    #[error("lexical index not built; load vocabularies first")]
    NotReady,
    #[error("classification search unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl CrosswalkError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrosswalkError>;

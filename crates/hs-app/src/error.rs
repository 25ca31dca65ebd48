//! Error types for the hs-app service layer.

use std::path::PathBuf;

/// Application error shared by all frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Building record error: {0}")]
    Record(String),

    #[error("Failed to read settings file: {path}")]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hs-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hs_project::ProjectError> for AppError {
    fn from(err: hs_project::ProjectError) -> Self {
        AppError::Record(err.to_string())
    }
}

impl From<hs_core::HsError> for AppError {
    fn from(err: hs_core::HsError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Settings(err.to_string())
    }
}

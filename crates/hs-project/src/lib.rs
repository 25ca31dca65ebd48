//! hs-project: building record format and record file I/O.

pub mod schema;

pub use schema::*;

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Unsupported record format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<BuildingRecord> {
    let content = std::fs::read_to_string(path)?;
    let record: BuildingRecord = serde_yaml::from_str(&content)?;
    Ok(record)
}

pub fn save_yaml(path: &Path, record: &BuildingRecord) -> ProjectResult<()> {
    let content = serde_yaml::to_string(record)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<BuildingRecord> {
    let content = std::fs::read_to_string(path)?;
    let record: BuildingRecord = serde_json::from_str(&content)?;
    Ok(record)
}

pub fn save_json(path: &Path, record: &BuildingRecord) -> ProjectResult<()> {
    let content = serde_json::to_string_pretty(record)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a record, picking the format from the file extension.
pub fn load_record(path: &Path) -> ProjectResult<BuildingRecord> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    tracing::debug!(path = %path.display(), "loading building record");
    match extension.as_str() {
        "yaml" | "yml" => load_yaml(path),
        "json" => load_json(path),
        _ => Err(ProjectError::UnsupportedFormat { extension }),
    }
}

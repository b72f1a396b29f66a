use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around the floor-plan model and store
#[derive(Error, Debug)]
pub enum Error {
    #[error("Import failed: {0}")]
    Import(#[from] serde_json::Error),

    #[error("Unsupported portable format version {0}")]
    UnsupportedVersion(u32),

    #[error("Floor plan not found: {0}")]
    PlanNotFound(String),
}

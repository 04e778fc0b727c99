use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate service name `{name}` found at {}", .path.display())]
    DuplicateService { name: String, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;

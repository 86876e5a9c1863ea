use regroup_scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Extractor error: {0}")]
    Scan(#[from] ScanError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

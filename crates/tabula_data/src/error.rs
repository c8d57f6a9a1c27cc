use std::path::PathBuf;

use thiserror::Error;

use crate::sector::Sector;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no dataset for {sector} at {}", path.display())]
    DatasetMissing { sector: Sector, path: PathBuf },

    #[error("invalid {sector} dataset: {reason}")]
    InvalidDataset { sector: Sector, reason: String },

    #[error("could not determine a configuration directory")]
    NoConfigDir,

    #[error("unknown sector `{0}`")]
    UnknownSector(String),
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to load {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("No field or option with id `{0}` in the current form")]
    UnknownNode(String),

    #[error("`{0}` is disabled until its option is selected")]
    DisabledNode(String),

    #[error("Invalid edit on `{id}`: {reason}")]
    InvalidEdit { id: String, reason: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ChartpadError>;

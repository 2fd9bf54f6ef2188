use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Error: File '{}' not found. Please check the filename.", .0.display())]
    InputNotFound(PathBuf),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;

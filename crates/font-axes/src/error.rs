use std::{io, result};

use skrifa::raw::ReadError;

/// Error types for axis table extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("failed to read font file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid axis table: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = result::Result<T, Error>;

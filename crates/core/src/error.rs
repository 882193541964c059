use std::{io, result};

/// Reasons a font asset cannot drive the block.
///
/// Each variant replaces the block body with a single message; the user
/// has to replace the asset.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("unsupported file type: .{0} (expected a variable .ttf or .otf font)")]
    UnsupportedFileType(String),

    #[error("not a variable font (no axis table)")]
    MissingAxisTable,

    #[error("incomplete data for axis #{index}: missing {field}")]
    IncompleteAxisData { index: usize, field: &'static str },

    #[error("invalid range for axis {tag}: {min}..{max}")]
    InvalidAxisRange { tag: String, min: f64, max: f64 },

    #[error("failed to read font: {0}")]
    Unreadable(#[from] font_axes::Error),
}

/// Errors from loading or saving block settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported settings version {0}")]
    UnsupportedVersion(u64),

    #[error("settings store I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;

//! Axis extraction from font binaries.

use std::{fs::read, path::Path};

use log::debug;
use skrifa::{FontRef, MetadataProvider, raw::TableProvider};

use crate::{AxisTable, RawAxis, Result};

/// Reads the `fvar` axes of a font.
///
/// Returns `Ok(None)` when the font has no `fvar` table, i.e. it is not a
/// variable font.
pub fn read_axis_table(data: &[u8]) -> Result<Option<AxisTable>> {
    let font = FontRef::new(data)?;

    if font.fvar().is_err() {
        return Ok(None);
    }

    let table: AxisTable = font
        .axes()
        .iter()
        .map(|axis| RawAxis {
            tag: Some(axis.tag().to_string()),
            min_value: Some(f64::from(axis.min_value())),
            max_value: Some(f64::from(axis.max_value())),
            default_value: Some(f64::from(axis.default_value())),
        })
        .collect();

    debug!("read {} variation axes", table.len());
    Ok(Some(table))
}

/// Where a font asset's binary can be found.
#[derive(Debug, Clone, Copy)]
pub struct FontSource<'a> {
    pub file_name: &'a str,
    pub origin_url: &'a str,
}

/// Yields the axis table of a font asset.
pub trait FontParser {
    /// `Ok(None)` signals the absence of variable-axis data.
    fn parse(&self, source: FontSource<'_>) -> Result<Option<AxisTable>>;
}

/// Parser for fonts on the local filesystem.
///
/// The origin URL is treated as a path; the file name is the fallback when
/// nothing exists there.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileParser;

impl FontParser for FileParser {
    fn parse(&self, source: FontSource<'_>) -> Result<Option<AxisTable>> {
        let origin = Path::new(source.origin_url);
        let path = if origin.is_file() { origin } else { Path::new(source.file_name) };
        debug!("reading font from {}", path.display());
        read_axis_table(&read(path)?)
    }
}

//! Filesystem stand-ins for the host asset and settings stores.

use std::{
    fs::{read, read_to_string, write},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use font_axes::{AxisTable, FontParser, FontSource};
use log::debug;
use serde_json::Value;
use varfont_core::{FontAsset, SettingsDocument, SettingsRepository, migrate};

/// A font file attached as the block's asset.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        read(&self.path).with_context(|| format!("Failed to read font: {}", self.path.display()))
    }

    /// Describe the file as a host asset. The id defaults to the path.
    pub fn asset(&self, id: Option<&str>, title: Option<&str>) -> FontAsset {
        let path = self.path.to_string_lossy().into_owned();
        let stem = self.path.file_stem().map(|s| s.to_string_lossy().into_owned());
        FontAsset {
            id: id.map_or_else(|| path.clone(), str::to_string),
            title: title.map(str::to_string).or(stem).unwrap_or_else(|| path.clone()),
            origin_url: path.clone(),
            extension: self
                .path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_name: path,
        }
    }
}

/// Settings document stored as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fail early on a document the block would otherwise discard.
    pub fn validate(&self) -> Result<()> {
        if let Some(value) = self.load()? {
            migrate(value)
                .with_context(|| format!("Unusable settings: {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl SettingsRepository for SettingsFile {
    fn load(&self) -> varfont_core::Result<Option<Value>> {
        match read_to_string(&self.path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, document: &SettingsDocument) -> varfont_core::Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        write(&self.path, json)?;
        debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Parser serving a host-provided axis table instead of reading the font.
#[derive(Debug, Clone)]
pub struct TableParser(pub AxisTable);

impl TableParser {
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = read_to_string(path)
            .with_context(|| format!("Failed to read axis table: {}", path.display()))?;
        let table = AxisTable::from_json(&json)
            .with_context(|| format!("Invalid axis table: {}", path.display()))?;
        Ok(Self(table))
    }
}

impl FontParser for TableParser {
    fn parse(&self, _source: FontSource<'_>) -> font_axes::Result<Option<AxisTable>> {
        Ok(Some(self.0.clone()))
    }
}

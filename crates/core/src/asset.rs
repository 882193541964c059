//! Font assets attached by the host.

use font_axes::FontSource;
use serde::{Deserialize, Serialize};

/// The font currently attached to the block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontAsset {
    pub id: String,
    pub title: String,
    pub origin_url: String,
    pub extension: String,
    pub file_name: String,
}

impl FontAsset {
    /// Where a parser can find this asset's binary.
    pub fn source(&self) -> FontSource<'_> {
        FontSource { file_name: &self.file_name, origin_url: &self.origin_url }
    }
}

//! Top-level block state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    axis::AxisDescriptor,
    style::{Style, StyleId},
};

/// Axis tag to font descriptor, in font order.
pub type DefaultDimensions = IndexMap<String, AxisDescriptor>;

/// Font axes plus every style created for them.
///
/// `default_dimensions` decides which axes exist; every style's
/// `dimensions` carries exactly the same tags once a font is reconciled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default)]
    pub default_dimensions: DefaultDimensions,
    #[serde(default)]
    pub styles: IndexMap<StyleId, Style>,
}

impl State {
    pub fn has_styles(&self) -> bool {
        !self.styles.is_empty()
    }

    /// Styles in creation order.
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }

    pub fn style(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Verify tag lockstep and axis bound ordering for every style.
    pub fn check_invariants(&self) -> Result<(), String> {
        for style in self.styles.values() {
            let tags_match = style.dimensions.len() == self.default_dimensions.len()
                && style.dimensions.keys().all(|tag| self.default_dimensions.contains_key(tag));
            if !tags_match {
                return Err(format!("style {}: axis tags out of sync", style.id));
            }
            for axis in style.dimensions.values() {
                axis.check_bounds().map_err(|e| format!("style {}: {e}", style.id))?;
            }
        }
        Ok(())
    }
}

//! Variation axes: font-given bounds and the per-style editable window.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::STEP;

/// An axis as declared by the font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisDescriptor {
    pub tag: String,
    pub min_value: f64,
    pub max_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
}

impl AxisDescriptor {
    pub fn new(tag: &str, min_value: f64, default_value: f64, max_value: f64) -> Self {
        Self { tag: tag.to_string(), min_value, max_value, default_value: Some(default_value) }
    }

    /// The declared default, or the midpoint of the range when the font
    /// declares none.
    pub fn resolved_default(&self) -> f64 {
        match self.default_value {
            Some(value) if value.is_finite() => value,
            _ => (self.max_value - self.min_value) / 2.0 + self.min_value,
        }
    }
}

/// Per-style state of one axis.
///
/// `min_value`/`max_value` are the font's hard bounds. The `editor_*` fields
/// are the window an author exposes to consumers, and always satisfy
/// `min_value <= editor_min_value <= editor_default <= editor_max_value <= max_value`
/// after [`EditableAxis::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableAxis {
    pub tag: String,
    pub min_value: f64,
    pub max_value: f64,
    pub default_value: f64,
    pub editor_min_value: f64,
    pub editor_max_value: f64,
    pub editor_default: f64,
    pub value: f64,
    #[serde(default)]
    pub is_value_range: bool,
}

impl EditableAxis {
    /// Fresh axis with the editor window spanning the whole font range.
    pub fn from_descriptor(descriptor: &AxisDescriptor) -> Self {
        let default = descriptor.resolved_default();
        Self {
            tag: descriptor.tag.clone(),
            min_value: descriptor.min_value,
            max_value: descriptor.max_value,
            default_value: default,
            editor_min_value: descriptor.min_value,
            editor_max_value: descriptor.max_value,
            editor_default: default,
            value: default,
            is_value_range: false,
        }
    }

    /// Merge a partial edit and restore the bound ordering.
    ///
    /// Switching into range mode anchors the range default at the current
    /// value, widening the editor window if needed. Switching out of range
    /// mode moves the value to the range default. Moving an editor bound
    /// past the value or range default pushes them one [`STEP`] inside.
    pub fn apply(&mut self, edit: &AxisEdit) {
        match edit.is_value_range {
            Some(true) if !self.is_value_range => {
                self.editor_default = self.value;
                self.editor_min_value = self.editor_min_value.min(self.value);
                self.editor_max_value = self.editor_max_value.max(self.value);
            }
            Some(false) if self.is_value_range => self.value = self.editor_default,
            _ => {}
        }

        if let Some(is_value_range) = edit.is_value_range {
            self.is_value_range = is_value_range;
        }
        if let Some(value) = edit.value {
            self.value = value;
        }
        if let Some(default) = edit.editor_default {
            self.editor_default = default;
        }
        if let Some(min) = edit.editor_min_value {
            self.editor_min_value = min;
            if self.value < min {
                self.value = min + STEP;
            }
            if self.editor_default < min {
                self.editor_default = min + STEP;
            }
        }
        if let Some(max) = edit.editor_max_value {
            self.editor_max_value = max;
            if self.value > max {
                self.value = max - STEP;
            }
            if self.editor_default > max {
                self.editor_default = max - STEP;
            }
        }

        self.enforce_bounds();
    }

    fn enforce_bounds(&mut self) {
        self.editor_min_value = clamp(self.editor_min_value, self.min_value, self.max_value);
        self.editor_max_value = clamp(self.editor_max_value, self.editor_min_value, self.max_value);
        self.editor_default =
            clamp(self.editor_default, self.editor_min_value, self.editor_max_value);
        self.value = clamp(self.value, self.editor_min_value, self.editor_max_value);
    }

    /// Check the bound ordering, describing the first violation.
    pub fn check_bounds(&self) -> Result<(), String> {
        let chain = [
            ("minValue", self.min_value),
            ("editorMinValue", self.editor_min_value),
            ("editorDefault", self.editor_default),
            ("editorMaxValue", self.editor_max_value),
            ("maxValue", self.max_value),
        ];
        for pair in chain.windows(2) {
            let ((low_name, low), (high_name, high)) = (pair[0], pair[1]);
            if low > high {
                return Err(format!("{}: {low_name} {low} > {high_name} {high}", self.tag));
            }
        }
        if !self.is_value_range
            && !(self.editor_min_value..=self.editor_max_value).contains(&self.value)
        {
            return Err(format!("{}: value {} outside editor range", self.tag, self.value));
        }
        Ok(())
    }

    /// Value used when rendering this axis.
    pub fn rendered_value(&self) -> f64 {
        self.value
    }

    /// Human-readable value: `min - default - max` for ranges.
    pub fn display_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EditableAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_value_range {
            write!(
                f,
                "{} - {} - {}",
                self.editor_min_value, self.editor_default, self.editor_max_value
            )
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Never panics, unlike `f64::clamp`; NaN collapses to `low`.
fn clamp(value: f64, low: f64, high: f64) -> f64 {
    value.max(low).min(high)
}

/// Partial update of an [`EditableAxis`]. Unset fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_default: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_value_range: Option<bool>,
}

impl AxisEdit {
    /// Set the single rendering value.
    pub fn value(value: f64) -> Self {
        Self { value: Some(value), ..Self::default() }
    }

    /// Switch between single value and range mode.
    pub fn range_mode(is_value_range: bool) -> Self {
        Self { is_value_range: Some(is_value_range), ..Self::default() }
    }

    /// Set the whole editor window, as a three-handle slider does.
    pub fn window(min: f64, default: f64, max: f64) -> Self {
        Self {
            value: Some(default),
            editor_min_value: Some(min),
            editor_max_value: Some(max),
            editor_default: Some(default),
            is_value_range: None,
        }
    }

    pub fn editor_min(min: f64) -> Self {
        Self { editor_min_value: Some(min), ..Self::default() }
    }

    pub fn editor_max(max: f64) -> Self {
        Self { editor_max_value: Some(max), ..Self::default() }
    }

    /// Set the range default; the rendering value follows it.
    pub fn editor_default(default: f64) -> Self {
        Self { value: Some(default), editor_default: Some(default), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight() -> EditableAxis {
        EditableAxis::from_descriptor(&AxisDescriptor::new("wght", 100.0, 400.0, 900.0))
    }

    #[test]
    fn normalize_uses_font_bounds() {
        let axis = weight();
        assert_eq!(axis.value, 400.0);
        assert_eq!(axis.editor_default, 400.0);
        assert_eq!((axis.editor_min_value, axis.editor_max_value), (100.0, 900.0));
        assert!(!axis.is_value_range);
    }

    #[test]
    fn normalize_is_idempotent() {
        let descriptor = AxisDescriptor::new("wdth", 75.0, 100.0, 125.0);
        assert_eq!(
            EditableAxis::from_descriptor(&descriptor),
            EditableAxis::from_descriptor(&descriptor)
        );
    }

    #[test]
    fn missing_default_uses_midpoint() {
        let descriptor =
            AxisDescriptor { tag: "opsz".into(), min_value: 8.0, max_value: 144.0, default_value: None };
        assert_eq!(EditableAxis::from_descriptor(&descriptor).value, 76.0);
    }

    #[test]
    fn zero_default_is_kept() {
        let axis = EditableAxis::from_descriptor(&AxisDescriptor::new("slnt", -12.0, 0.0, 0.0));
        assert_eq!(axis.value, 0.0);
    }

    #[test]
    fn entering_range_widens_window() {
        let mut axis = weight();
        axis.value = 700.0;
        axis.editor_max_value = 600.0;

        axis.apply(&AxisEdit::range_mode(true));

        assert!(axis.is_value_range);
        assert_eq!(axis.editor_max_value, 700.0);
        assert_eq!(axis.editor_default, 700.0);
    }

    #[test]
    fn leaving_range_takes_default() {
        let mut axis = weight();
        axis.apply(&AxisEdit::range_mode(true));
        axis.apply(&AxisEdit::window(200.0, 500.0, 800.0));
        axis.apply(&AxisEdit::value(300.0));

        axis.apply(&AxisEdit::range_mode(false));

        assert_eq!(axis.value, 500.0);
    }

    #[test]
    fn toggle_round_trip_keeps_window() {
        let mut axis = weight();
        axis.apply(&AxisEdit::range_mode(true));
        axis.apply(&AxisEdit::window(200.0, 500.0, 800.0));
        let before = axis.clone();

        axis.apply(&AxisEdit::range_mode(false));
        axis.apply(&AxisEdit::range_mode(true));

        assert_eq!(axis, before);
    }

    #[test]
    fn raising_min_bumps_value() {
        let mut axis = weight();
        axis.apply(&AxisEdit::editor_min(500.0));

        assert_eq!(axis.editor_min_value, 500.0);
        assert_eq!(axis.value, 501.0);
        assert_eq!(axis.editor_default, 501.0);
    }

    #[test]
    fn lowering_max_clamps_value() {
        let mut axis = weight();
        axis.apply(&AxisEdit::editor_max(300.0));

        assert_eq!(axis.editor_max_value, 300.0);
        assert_eq!(axis.value, 299.0);
        assert_eq!(axis.editor_default, 299.0);
    }

    #[test]
    fn edits_stay_inside_font_bounds() {
        let mut axis = weight();
        axis.apply(&AxisEdit::window(0.0, 2000.0, 5000.0));
        assert_eq!(axis.editor_min_value, 100.0);
        assert_eq!(axis.editor_max_value, 900.0);
        assert_eq!(axis.editor_default, 900.0);
        axis.check_bounds().unwrap();
    }

    #[test]
    fn collapsed_window_holds_ordering() {
        let mut axis = weight();
        axis.apply(&AxisEdit::editor_max(300.0));
        axis.apply(&AxisEdit::editor_min(300.0));
        axis.check_bounds().unwrap();
        assert_eq!(axis.value, 300.0);
    }

    #[test]
    fn nan_value_is_sanitized() {
        let mut axis = weight();
        axis.apply(&AxisEdit::value(f64::NAN));
        assert_eq!(axis.value, 100.0);
    }

    #[test]
    fn display_value_by_mode() {
        let mut axis = weight();
        assert_eq!(axis.display_value(), "400");
        axis.apply(&AxisEdit::range_mode(true));
        assert_eq!(axis.display_value(), "100 - 400 - 900");
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(weight()).unwrap();
        assert_eq!(json["editorMaxValue"], 900.0);
        assert_eq!(json["isValueRange"], false);
    }
}

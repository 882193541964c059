//! Validation of a newly loaded font's axis table.

use font_axes::{AxisTable, RawAxis};
use log::{debug, warn};

use crate::{axis::AxisDescriptor, config::Options, error::FontError, state::DefaultDimensions};

/// Reject assets whose extension is not an accepted font format.
pub fn check_extension(extension: &str, options: &Options) -> Result<(), FontError> {
    if options.accepts_extension(extension) {
        Ok(())
    } else {
        Err(FontError::UnsupportedFileType(extension.to_string()))
    }
}

/// Turn a parser's axis table into font descriptors keyed by tag.
///
/// A later entry with a repeated tag replaces the earlier one. A default
/// outside the declared range is clamped into it.
pub fn reconcile(table: Option<&AxisTable>) -> Result<DefaultDimensions, FontError> {
    let table = table.ok_or(FontError::MissingAxisTable)?;
    if table.is_empty() {
        return Err(FontError::MissingAxisTable);
    }

    let mut dimensions = DefaultDimensions::new();
    for (index, raw) in table.iter().enumerate() {
        let descriptor = descriptor(index, raw)?;
        if dimensions.insert(descriptor.tag.clone(), descriptor).is_some() {
            warn!("axis #{index} repeats an earlier tag");
        }
    }

    debug!("reconciled axes: {:?}", dimensions.keys().collect::<Vec<_>>());
    Ok(dimensions)
}

fn descriptor(index: usize, raw: &RawAxis) -> Result<AxisDescriptor, FontError> {
    let missing = |field| FontError::IncompleteAxisData { index, field };

    let tag = raw.tag.as_deref().filter(|t| !t.is_empty()).ok_or_else(|| missing("tag"))?;
    let min = raw.min_value.filter(|v| v.is_finite()).ok_or_else(|| missing("minValue"))?;
    let max = raw.max_value.filter(|v| v.is_finite()).ok_or_else(|| missing("maxValue"))?;

    if min > max {
        return Err(FontError::InvalidAxisRange { tag: tag.to_string(), min, max });
    }

    let default_value = raw.default_value.filter(|v| v.is_finite()).map(|value| {
        if !(min..=max).contains(&value) {
            warn!("{tag}: default {value} outside {min}..{max}, clamping");
        }
        value.clamp(min, max)
    });

    Ok(AxisDescriptor { tag: tag.to_string(), min_value: min, max_value: max, default_value })
}

/// What [`AssetGate::check`] decided for an attached asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateCheck {
    /// Axes already come from this asset.
    Reconciled,
    /// This asset was refused and has not been detached since.
    Rejected,
    /// Not seen yet; parse and reconcile it.
    New,
}

/// Remembers the asset the axes were reconciled from, and the last refused
/// one, so re-renders neither wipe axis edits nor re-parse a bad font.
#[derive(Debug, Clone, Default)]
pub struct AssetGate {
    reconciled: Option<String>,
    rejected: Option<String>,
}

impl AssetGate {
    pub fn new(reconciled: Option<String>) -> Self {
        Self { reconciled, rejected: None }
    }

    /// Asset the current axes were reconciled from.
    pub fn reconciled(&self) -> Option<&str> {
        self.reconciled.as_deref()
    }

    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }

    pub fn check(&self, asset_id: &str) -> GateCheck {
        if self.reconciled.as_deref() == Some(asset_id) {
            GateCheck::Reconciled
        } else if self.rejected.as_deref() == Some(asset_id) {
            GateCheck::Rejected
        } else {
            GateCheck::New
        }
    }

    pub fn accept(&mut self, asset_id: &str) {
        self.reconciled = Some(asset_id.to_string());
        self.rejected = None;
    }

    pub fn reject(&mut self, asset_id: &str) {
        self.rejected = Some(asset_id.to_string());
    }

    /// Forget the refused asset, keeping the reconciled one.
    pub fn clear(&mut self) {
        self.rejected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(axes: Vec<RawAxis>) -> AxisTable {
        AxisTable::new(axes)
    }

    #[test]
    fn keys_descriptors_by_tag_in_order() {
        let axes = table(vec![
            RawAxis::new("wght", 100.0, 400.0, 900.0),
            RawAxis::new("wdth", 75.0, 100.0, 125.0),
        ]);
        let dimensions = reconcile(Some(&axes)).unwrap();

        let tags: Vec<_> = dimensions.keys().map(String::as_str).collect();
        assert_eq!(tags, ["wght", "wdth"]);
        assert_eq!(dimensions["wdth"].default_value, Some(100.0));
    }

    #[test]
    fn absent_table_is_not_variable() {
        assert!(matches!(reconcile(None), Err(FontError::MissingAxisTable)));
        assert!(matches!(reconcile(Some(&table(vec![]))), Err(FontError::MissingAxisTable)));
    }

    #[test]
    fn missing_bounds_are_incomplete() {
        let mut axis = RawAxis::new("wght", 100.0, 400.0, 900.0);
        axis.max_value = None;
        let result = reconcile(Some(&table(vec![RawAxis::new("wdth", 75.0, 100.0, 125.0), axis])));

        assert!(matches!(
            result,
            Err(FontError::IncompleteAxisData { index: 1, field: "maxValue" })
        ));
    }

    #[test]
    fn missing_tag_is_incomplete() {
        let axis = RawAxis { tag: None, ..RawAxis::new("", 0.0, 0.0, 1.0) };
        assert!(matches!(
            reconcile(Some(&table(vec![axis]))),
            Err(FontError::IncompleteAxisData { field: "tag", .. })
        ));
    }

    #[test]
    fn nan_is_not_a_number() {
        let axis = RawAxis { min_value: Some(f64::NAN), ..RawAxis::new("wght", 0.0, 0.0, 1.0) };
        assert!(matches!(
            reconcile(Some(&table(vec![axis]))),
            Err(FontError::IncompleteAxisData { field: "minValue", .. })
        ));
    }

    #[test]
    fn missing_default_is_allowed() {
        let axis = RawAxis { default_value: None, ..RawAxis::new("opsz", 8.0, 0.0, 144.0) };
        let dimensions = reconcile(Some(&table(vec![axis]))).unwrap();
        assert_eq!(dimensions["opsz"].default_value, None);
        assert_eq!(dimensions["opsz"].resolved_default(), 76.0);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let axis = RawAxis::new("wght", 900.0, 400.0, 100.0);
        assert!(matches!(
            reconcile(Some(&table(vec![axis]))),
            Err(FontError::InvalidAxisRange { .. })
        ));
    }

    #[test]
    fn default_is_clamped_into_range() {
        let axis = RawAxis::new("wght", 100.0, 1000.0, 900.0);
        let dimensions = reconcile(Some(&table(vec![axis]))).unwrap();
        assert_eq!(dimensions["wght"].default_value, Some(900.0));
    }

    #[test]
    fn repeated_tag_keeps_last() {
        let axes = table(vec![
            RawAxis::new("wght", 100.0, 400.0, 900.0),
            RawAxis::new("wght", 200.0, 300.0, 800.0),
        ]);
        let dimensions = reconcile(Some(&axes)).unwrap();
        assert_eq!(dimensions.len(), 1);
        assert_eq!(dimensions["wght"].min_value, 200.0);
    }

    #[test]
    fn extension_check() {
        let options = Options::new();
        assert!(check_extension("ttf", &options).is_ok());
        assert!(matches!(
            check_extension("woff2", &options),
            Err(FontError::UnsupportedFileType(ext)) if ext == "woff2"
        ));
    }

    #[test]
    fn gate_tracks_reconciled_and_rejected_apart() {
        let mut gate = AssetGate::default();
        assert_eq!(gate.check("a"), GateCheck::New);

        gate.accept("a");
        gate.reject("b");
        assert_eq!(gate.check("a"), GateCheck::Reconciled);
        assert_eq!(gate.check("b"), GateCheck::Rejected);
        assert_eq!(gate.reconciled(), Some("a"));

        gate.clear();
        assert_eq!(gate.check("b"), GateCheck::New);
        assert_eq!(gate.reconciled(), Some("a"));
    }

    #[test]
    fn accepting_forgets_rejection() {
        let mut gate = AssetGate::new(Some("a".into()));
        gate.reject("b");
        gate.accept("b");
        assert_eq!(gate.rejected(), None);
        assert_eq!(gate.check("b"), GateCheck::Reconciled);
        assert_eq!(gate.check("a"), GateCheck::New);
    }
}

//! Raw axis table shape.

use serde::{Deserialize, Serialize};

use crate::Result;

/// One axis entry as yielded by a font parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAxis {
    pub tag: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub default_value: Option<f64>,
}

impl RawAxis {
    /// Create a fully populated axis entry.
    pub fn new(tag: &str, min_value: f64, default_value: f64, max_value: f64) -> Self {
        Self {
            tag: Some(tag.to_string()),
            min_value: Some(min_value),
            max_value: Some(max_value),
            default_value: Some(default_value),
        }
    }
}

/// Variation axes of a font, in `fvar` record order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisTable {
    pub axes: Vec<RawAxis>,
}

impl AxisTable {
    pub fn new(axes: Vec<RawAxis>) -> Self {
        Self { axes }
    }

    /// Parse a table from a JSON array of axis objects.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawAxis> {
        self.axes.iter()
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}

impl FromIterator<RawAxis> for AxisTable {
    fn from_iter<I: IntoIterator<Item = RawAxis>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Named styles: example text plus one editable window per axis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    axis::{AxisDescriptor, EditableAxis},
    config::{DEFAULT_EXAMPLE_TEXT, DEFAULT_STYLE_NAME},
};

pub type StyleId = String;

/// Axis tag to editable axis, in font order.
pub type Dimensions = IndexMap<String, EditableAxis>;

/// A colour offered by the host palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub name: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    #[serde(default = "opaque")]
    pub alpha: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_css: Option<String>,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub fn rgb(name: &str, red: u8, green: u8, blue: u8) -> Self {
        Self {
            name: name.to_string(),
            red,
            green,
            blue,
            alpha: 1.0,
            hex: Some(format!("{red:02x}{green:02x}{blue:02x}")),
            name_css: None,
        }
    }

    pub fn to_rgba_string(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.red, self.green, self.blue, self.alpha)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: StyleId,
    pub name: String,
    #[serde(default)]
    pub font_description: String,
    pub example_text: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub has_flyout_open: bool,
    #[serde(default)]
    pub allowed_colors: Vec<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_color: Option<Color>,
}

impl Style {
    /// A new style seeded from the font's axes.
    pub fn new<'a>(
        id: StyleId,
        descriptors: impl IntoIterator<Item = &'a AxisDescriptor>,
    ) -> Self {
        Self {
            id,
            name: DEFAULT_STYLE_NAME.to_string(),
            font_description: String::new(),
            example_text: DEFAULT_EXAMPLE_TEXT.to_string(),
            dimensions: normalize_all(descriptors),
            has_flyout_open: false,
            allowed_colors: Vec::new(),
            current_color: None,
        }
    }

    /// Merge top-level field edits. Dimensions are never touched here.
    pub fn apply(&mut self, edit: StyleEdit) {
        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(description) = edit.font_description {
            self.font_description = description;
        }
        if let Some(text) = edit.example_text {
            self.example_text = text;
        }
        if let Some(open) = edit.has_flyout_open {
            self.has_flyout_open = open;
        }
        if let Some(color) = edit.current_color {
            self.current_color = color;
        }
    }

    /// Add a colour, or remove every colour sharing its name.
    pub fn toggle_allowed_color(&mut self, color: Color, is_added: bool) {
        if is_added {
            self.allowed_colors.push(color);
        } else {
            self.allowed_colors.retain(|c| c.name != color.name);
        }
    }
}

/// Fresh editable axes for every descriptor.
pub fn normalize_all<'a>(descriptors: impl IntoIterator<Item = &'a AxisDescriptor>) -> Dimensions {
    descriptors
        .into_iter()
        .map(|d| (d.tag.clone(), EditableAxis::from_descriptor(d)))
        .collect()
}

/// Partial update of a [`Style`]'s top-level fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_flyout_open: Option<bool>,
    /// `Some(None)` clears the current colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_color: Option<Option<Color>>,
}

impl StyleEdit {
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn example_text(text: impl Into<String>) -> Self {
        Self { example_text: Some(text.into()), ..Self::default() }
    }

    pub fn font_description(description: impl Into<String>) -> Self {
        Self { font_description: Some(description.into()), ..Self::default() }
    }

    pub fn flyout(open: bool) -> Self {
        Self { has_flyout_open: Some(open), ..Self::default() }
    }
}

//! CSS for previewing styles: `@font-face` plus per-style declarations.

use std::fmt;

use crate::{
    asset::FontAsset,
    config::{WEIGHT_TAG, WIDTH_TAG},
    state::{DefaultDimensions, State},
    style::Style,
};

/// `@font-face` format string for a font file extension.
pub fn font_format(extension: &str) -> Option<&'static str> {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "ttf" => Some("truetype-variations"),
        "otf" => Some("opentype-variations"),
        "woff2" => Some("woff2-variations"),
        _ => None,
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// `@font-face` rule binding the asset title to its URL.
///
/// Weight and stretch ranges are declared for fonts with `wght`/`wdth` axes.
#[derive(Debug, Clone, Copy)]
pub struct FontFace<'a> {
    pub asset: &'a FontAsset,
    pub dimensions: &'a DefaultDimensions,
}

impl fmt::Display for FontFace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@font-face {{")?;
        writeln!(f, "    font-family: {};", quote(&self.asset.title))?;
        let url = quote(&self.asset.origin_url);
        match font_format(&self.asset.extension) {
            Some(format) => writeln!(f, "    src: url({url}) format(\"{format}\");")?,
            None => writeln!(f, "    src: url({url});")?,
        }
        if let Some(wght) = self.dimensions.get(WEIGHT_TAG) {
            writeln!(f, "    font-weight: {} {};", wght.min_value, wght.max_value)?;
        }
        if let Some(wdth) = self.dimensions.get(WIDTH_TAG) {
            writeln!(f, "    font-stretch: {}% {}%;", wdth.min_value, wdth.max_value)?;
        }
        write!(f, "}}")
    }
}

pub fn font_face_rule(asset: &FontAsset, dimensions: &DefaultDimensions) -> String {
    FontFace { asset, dimensions }.to_string()
}

/// `"tag" value` pairs for every axis other than weight and width.
pub fn variation_settings(style: &Style) -> String {
    style
        .dimensions
        .values()
        .filter(|axis| axis.tag != WEIGHT_TAG && axis.tag != WIDTH_TAG)
        .map(|axis| format!("\"{}\" {}", axis.tag, axis.rendered_value()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Declarations rendering one style's example text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDeclarations {
    pub font_family: Option<String>,
    pub font_weight: Option<f64>,
    pub font_stretch: Option<f64>,
    pub font_variation_settings: String,
    pub color: Option<String>,
}

impl StyleDeclarations {
    pub fn for_style(style: &Style, family: Option<&str>) -> Self {
        Self {
            font_family: family.map(str::to_string),
            font_weight: style.dimensions.get(WEIGHT_TAG).map(|a| a.rendered_value()),
            font_stretch: style.dimensions.get(WIDTH_TAG).map(|a| a.rendered_value()),
            font_variation_settings: variation_settings(style),
            color: style.current_color.as_ref().map(|c| c.to_rgba_string()),
        }
    }
}

impl fmt::Display for StyleDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(family) = &self.font_family {
            writeln!(f, "    font-family: {};", quote(family))?;
        }
        if let Some(weight) = self.font_weight {
            writeln!(f, "    font-weight: {weight};")?;
        }
        if let Some(stretch) = self.font_stretch {
            writeln!(f, "    font-stretch: {stretch}%;")?;
        }
        if !self.font_variation_settings.is_empty() {
            writeln!(f, "    font-variation-settings: {};", self.font_variation_settings)?;
        }
        if let Some(color) = &self.color {
            writeln!(f, "    color: {color};")?;
        }
        Ok(())
    }
}

/// Class name used for a style's preview.
pub fn style_class(style: &Style) -> String {
    format!("style-{}", style.id)
}

/// Face rule (when an asset is attached) followed by one rule per style.
#[derive(Debug, Clone, Copy)]
pub struct Stylesheet<'a> {
    pub asset: Option<&'a FontAsset>,
    pub state: &'a State,
}

impl fmt::Display for Stylesheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(asset) = self.asset {
            writeln!(f, "{}", FontFace { asset, dimensions: &self.state.default_dimensions })?;
        }
        let family = self.asset.map(|a| a.title.as_str());
        for style in self.state.styles() {
            write!(
                f,
                ".{} {{\n{}}}\n",
                style_class(style),
                StyleDeclarations::for_style(style, family)
            )?;
        }
        Ok(())
    }
}

pub fn block_stylesheet(asset: Option<&FontAsset>, state: &State) -> String {
    Stylesheet { asset, state }.to_string()
}

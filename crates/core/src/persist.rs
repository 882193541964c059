//! Settings document stored by the host, and migration of older shapes.
//!
//! Shapes seen in the wild, oldest first:
//!
//! 1. a flat map of style id to style, with a string `weight` instead of axes;
//! 2. `{ "defaultDimensions": ..., "styles": ... }`;
//! 3. `{ "dimensions": ..., "styles": ... }`;
//! 4. the versioned [`SettingsDocument`].
//!
//! Everything is migrated to the versioned document once, at load.

use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize, de};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    state::State,
    style::{Color, Style},
};

pub const SETTINGS_VERSION: u64 = 3;

/// Everything the block persists through the host settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    pub version: u64,
    /// Asset the axes were reconciled from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(flatten)]
    pub state: State,
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self { version: SETTINGS_VERSION, asset_id: None, state: State::default() }
    }
}

impl SettingsDocument {
    pub fn new(state: State, asset_id: Option<String>) -> Self {
        Self { version: SETTINGS_VERSION, asset_id, state }
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Narrow view of the host settings store.
pub trait SettingsRepository {
    /// The stored document in whatever shape it was saved, if any.
    fn load(&self) -> Result<Option<Value>>;

    fn save(&mut self, document: &SettingsDocument) -> Result<()>;
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    pub value: Option<Value>,
    pub saves: usize,
}

impl MemoryRepository {
    pub fn new(value: Option<Value>) -> Self {
        Self { value, saves: 0 }
    }
}

impl SettingsRepository for MemoryRepository {
    fn load(&self) -> Result<Option<Value>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, document: &SettingsDocument) -> Result<()> {
        self.value = Some(document.to_json()?);
        self.saves += 1;
        Ok(())
    }
}

const NESTED_KEYS: &[&str] = &["styles", "defaultDimensions", "dimensions", "assetId"];

/// Bring any known stored shape to the current [`SettingsDocument`].
pub fn migrate(value: Value) -> Result<SettingsDocument> {
    let mut map = match value {
        Value::Null => return Ok(SettingsDocument::default()),
        Value::Object(map) => map,
        other => {
            let message = format!("expected an object, found {other}");
            return Err(Error::Json(<serde_json::Error as de::Error>::custom(message)));
        }
    };

    if let Some(version) = map.get("version") {
        let version = version.as_u64().unwrap_or(u64::MAX);
        if version > SETTINGS_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
        map.insert("version".into(), SETTINGS_VERSION.into());
        return Ok(serde_json::from_value(Value::Object(map))?);
    }

    let nested = map.get("styles").is_some_and(Value::is_object)
        && map.keys().all(|k| NESTED_KEYS.contains(&k.as_str()));
    if nested {
        if let Some(dimensions) = map.remove("dimensions") {
            map.entry("defaultDimensions").or_insert(dimensions);
        }
        let asset_id = map.remove("assetId").and_then(|v| v.as_str().map(str::to_string));
        let state: State = serde_json::from_value(Value::Object(map))?;
        info!("migrated unversioned settings with {} styles", state.styles.len());
        return Ok(SettingsDocument::new(state, asset_id));
    }

    migrate_flat(map)
}

/// Style as stored before axes were modelled.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyStyle {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    example_text: Option<String>,
    #[serde(default)]
    allowed_colors: Vec<Color>,
    #[serde(default)]
    current_color: Option<Color>,
    #[serde(default)]
    has_flyout_open: bool,
    #[serde(default)]
    weight: Option<String>,
}

fn migrate_flat(map: Map<String, Value>) -> Result<SettingsDocument> {
    let mut styles = IndexMap::new();
    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        let legacy: LegacyStyle = serde_json::from_value(value)?;
        if let Some(weight) = &legacy.weight {
            warn!("style {key}: dropping legacy weight {weight}, axes are rebuilt from the font");
        }

        let mut style = Style::new(legacy.id, []);
        if let Some(name) = legacy.name {
            style.name = name;
        }
        if let Some(text) = legacy.example_text {
            style.example_text = text;
        }
        style.allowed_colors = legacy.allowed_colors;
        style.current_color = legacy.current_color;
        style.has_flyout_open = legacy.has_flyout_open;
        styles.insert(key, style);
    }

    info!("migrated {} legacy styles", styles.len());
    Ok(SettingsDocument::new(State { styles, ..State::default() }, None))
}

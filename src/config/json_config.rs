//! Layered JSON configuration

use super::{Configuration, GetOptions};
use crate::core::{LoggerError, Result};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A stack of JSON documents, lowest priority first
///
/// Shallow lookups return the value from the highest layer defining the key.
/// Recursive lookups deep-merge the key across all layers: objects merge
/// key by key, anything else in a higher layer replaces the lower value.
///
/// # Example
///
/// ```
/// use logger_plugin::config::{Configuration, GetOptions, JsonConfig};
/// use serde_json::json;
///
/// let config = JsonConfig::from_value("app", json!({
///     "log": { "console": { "level": "info", "timestamp": "HH:MM:ss" } }
/// }))
/// .with_layer(json!({ "log": { "console": { "level": "debug" } } }));
///
/// let log = config.get("log", GetOptions::recursive()).unwrap();
/// assert_eq!(log["console"]["level"], "debug");
/// assert_eq!(log["console"]["timestamp"], "HH:MM:ss");
/// ```
#[derive(Debug)]
pub struct JsonConfig {
    id: String,
    layers: RwLock<Vec<Value>>,
}

impl JsonConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layers: RwLock::new(Vec::new()),
        }
    }

    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        Self::new(id).with_layer(value)
    }

    pub fn from_json_str(id: impl Into<String>, json: &str) -> Result<Self> {
        let id = id.into();
        let value: Value = serde_json::from_str(json)
            .map_err(|e| LoggerError::config_parse(format!("config '{}'", id), e.to_string()))?;
        Ok(Self::from_value(id, value))
    }

    pub fn from_file(id: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                format!("reading '{}'", path.display()),
                "cannot read configuration file",
                e,
            )
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            LoggerError::config_parse(path.display().to_string(), e.to_string())
        })?;
        Ok(Self::from_value(id, value))
    }

    /// Add a layer above the existing ones
    #[must_use]
    pub fn with_layer(self, value: Value) -> Self {
        self.push_layer(value);
        self
    }

    pub fn push_layer(&self, value: Value) {
        self.layers.write().push(value);
    }

    pub fn layer_count(&self) -> usize {
        self.layers.read().len()
    }

    /// Set a dotted key in the top layer, creating intermediate objects
    pub fn set(&self, key: &str, value: Value) {
        let mut layers = self.layers.write();
        if layers.is_empty() {
            layers.push(Value::Object(Map::new()));
        }
        let Some(top) = layers.last_mut() else {
            return;
        };

        let mut current = top;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                return;
            };
            if parts.peek().is_none() {
                map.insert(part.to_string(), value);
                return;
            }
            current = map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }
}

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return Some(root);
    }
    key.split('.').try_fold(root, |value, part| value.get(part))
}

/// Merge `overlay` into `base`: objects key by key, anything else replaces
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

impl Configuration for JsonConfig {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn get(&self, key: &str, options: GetOptions) -> Result<Value> {
        let layers = self.layers.read();

        if !options.recursive {
            return Ok(layers
                .iter()
                .rev()
                .find_map(|layer| lookup(layer, key))
                .cloned()
                .unwrap_or(Value::Null));
        }

        let mut found = layers.iter().filter_map(|layer| lookup(layer, key));
        let Some(first) = found.next() else {
            return Ok(Value::Null);
        };
        let mut merged = first.clone();
        for overlay in found {
            deep_merge(&mut merged, overlay);
        }
        Ok(merged)
    }
}

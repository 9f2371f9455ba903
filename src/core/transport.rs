//! Transport specifications: the per-transport options a logger is built from
//!
//! A [`TransportSpec`] is one entry of the `log` configuration namespace. When
//! it is created, its `timestamp` option is resolved into a
//! [`TimestampPolicy`]; a string pattern is taken out of the option map, so
//! no transport ever sees the raw pattern.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_level::LogLevel,
    timestamp::TimestampPolicy,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Builds a transport from its spec
pub type TransportFactory =
    Arc<dyn Fn(&TransportSpec) -> Result<Box<dyn Appender>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct TransportSpec {
    name: String,
    options: Map<String, Value>,
    timestamp: TimestampPolicy,
}

impl TransportSpec {
    pub fn new(name: impl Into<String>, mut options: Map<String, Value>) -> Self {
        let timestamp = TimestampPolicy::resolve(&options);
        if timestamp.is_formatted() {
            options.remove("timestamp");
        }

        Self {
            name: name.into(),
            options,
            timestamp,
        }
    }

    /// Build a spec from one configuration entry; `null` means "no options"
    pub fn from_value(name: impl Into<String>, value: Value) -> Result<Self> {
        let name = name.into();
        match value {
            Value::Object(options) => Ok(Self::new(name, options)),
            Value::Null => Ok(Self::new(name, Map::new())),
            other => Err(LoggerError::config(
                format!("transport '{}'", name),
                format!("expected an object of options, found {}", json_type(&other)),
            )),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transport kind: the `type` option when present, otherwise the name
    pub fn kind(&self) -> &str {
        self.str_option("type").unwrap_or(&self.name)
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn timestamp(&self) -> &TimestampPolicy {
        &self.timestamp
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn str_option(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(Value::as_str)
    }

    /// Boolean option, accepting JSON booleans and the strings `"true"`/`"false"`
    pub fn bool_option(&self, key: &str) -> Option<bool> {
        match self.options.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s == "true" => Some(true),
            Value::String(s) if s == "false" => Some(false),
            _ => None,
        }
    }

    /// The `level` option, `info` when absent
    pub fn level(&self) -> Result<LogLevel> {
        match self.options.get("level") {
            None | Some(Value::Null) => Ok(LogLevel::Info),
            Some(Value::String(level)) => level
                .parse()
                .map_err(|e: String| LoggerError::config(self.component(), e)),
            Some(other) => Err(LoggerError::config(
                self.component(),
                format!("'level' must be a string, found {}", json_type(other)),
            )),
        }
    }

    pub(crate) fn component(&self) -> String {
        format!("transport '{}'", self.name)
    }
}

/// Options every transport understands, parsed from a [`TransportSpec`]
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSettings {
    pub level: LogLevel,
    pub silent: bool,
    /// Color the level label; `true` or `"true"`
    pub colorize: bool,
    pub json: bool,
    pub label: Option<String>,
    pub timestamp: TimestampPolicy,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            silent: false,
            colorize: false,
            json: false,
            label: None,
            timestamp: TimestampPolicy::default(),
        }
    }
}

impl TransportSettings {
    /// Parse the common options; `json_default` applies when `json` is unset
    pub fn from_spec(spec: &TransportSpec, json_default: bool) -> Result<Self> {
        Ok(Self {
            level: spec.level()?,
            silent: spec.bool_option("silent").unwrap_or(false),
            colorize: spec.bool_option("colorize").unwrap_or(false),
            json: spec.bool_option("json").unwrap_or(json_default),
            label: spec.str_option("label").map(str::to_string),
            timestamp: spec.timestamp().clone(),
        })
    }

    pub fn render_timestamp(&self, now: &DateTime<Utc>) -> Option<String> {
        self.timestamp.render(now)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

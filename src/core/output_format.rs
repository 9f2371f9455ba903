//! Line formats shared by the built-in transports
//!
//! - Text: `10:30:45 - info: Request processed user=42`
//! - Json: `{"level":"info","message":"Request processed","timestamp":"10:30:45","user":42}`

use super::log_record::LogRecord;
use super::transport::TransportSettings;
use colored::Colorize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    #[default]
    Text,

    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn from_settings(settings: &TransportSettings) -> Self {
        if settings.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Format a log record according to this output format
    pub fn format(&self, record: &LogRecord, settings: &TransportSettings) -> String {
        match self {
            OutputFormat::Text => Self::format_text(record, settings),
            OutputFormat::Json => Self::format_json(record, settings),
        }
    }

    fn format_text(record: &LogRecord, settings: &TransportSettings) -> String {
        let mut line = String::new();

        if let Some(timestamp) = settings.render_timestamp(&record.created_at) {
            line.push_str(&timestamp);
            line.push_str(" - ");
        }
        if let Some(ref label) = settings.label {
            let _ = write!(line, "[{}] ", label);
        }

        let level = if settings.colorize {
            record
                .level
                .to_str()
                .color(record.level.color_code())
                .to_string()
        } else {
            record.level.to_str().to_string()
        };
        let _ = write!(line, "{}: {}", level, record.message);

        if !record.fields.is_empty() {
            let _ = write!(line, " {}", record.fields.format_fields());
        }

        line
    }

    fn format_json(record: &LogRecord, settings: &TransportSettings) -> String {
        let mut json_obj = serde_json::Map::new();

        // Fields first so the reserved keys below always win
        for (key, value) in record.fields.fields() {
            json_obj.insert(key.clone(), value.to_json_value());
        }

        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.to_str().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        if let Some(ref label) = settings.label {
            json_obj.insert("label".to_string(), serde_json::Value::String(label.clone()));
        }
        if let Some(timestamp) = settings.render_timestamp(&record.created_at) {
            json_obj.insert("timestamp".to_string(), serde_json::Value::String(timestamp));
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }
}

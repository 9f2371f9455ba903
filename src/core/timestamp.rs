//! Per-transport timestamp policies
//!
//! A transport's `timestamp` option is resolved once, when the logger is
//! built, into a [`TimestampPolicy`]. Each log line then calls
//! [`render_timestamp`] with the current instant.

use super::date_pattern::DatePattern;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::{Map, Value};

/// Format used when a transport sets `timestamp: true`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// How a transport renders the current time into a log line
///
/// # Examples
///
/// ```
/// use logger_plugin::core::TimestampPolicy;
/// use serde_json::json;
///
/// let options = json!({ "timestamp": "HH:MM:ss", "colorize": "true" });
/// let policy = TimestampPolicy::resolve(options.as_object().unwrap());
/// assert!(policy.is_formatted());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampPolicy {
    /// The `timestamp` option was not a string; the original value is kept
    /// untouched (absent, boolean, number, ...).
    Raw(Option<Value>),

    /// The `timestamp` option was a date pattern
    Formatted {
        pattern: DatePattern,
        /// Wrap the rendered timestamp in gray; set only by `colorize: "true"`
        colorized: bool,
    },
}

impl Default for TimestampPolicy {
    fn default() -> Self {
        TimestampPolicy::Raw(None)
    }
}

impl TimestampPolicy {
    /// Resolve the policy from a transport's options
    ///
    /// Only a string `timestamp` becomes [`TimestampPolicy::Formatted`], and
    /// only the exact string `"true"` for `colorize` turns on gray styling.
    #[must_use]
    pub fn resolve(options: &Map<String, Value>) -> Self {
        match options.get("timestamp") {
            Some(Value::String(pattern)) => TimestampPolicy::Formatted {
                pattern: DatePattern::parse(pattern),
                colorized: matches!(options.get("colorize"), Some(Value::String(c)) if c == "true"),
            },
            other => TimestampPolicy::Raw(other.cloned()),
        }
    }

    #[must_use]
    pub fn is_formatted(&self) -> bool {
        matches!(self, TimestampPolicy::Formatted { .. })
    }

    /// The original option value for a raw policy
    pub fn raw_value(&self) -> Option<&Value> {
        match self {
            TimestampPolicy::Raw(value) => value.as_ref(),
            TimestampPolicy::Formatted { .. } => None,
        }
    }

    /// Render `now` according to this policy, see [`render_timestamp`]
    pub fn render(&self, now: &DateTime<Utc>) -> Option<String> {
        render_timestamp(self, now)
    }
}

/// Render the timestamp for one log line
///
/// * `Formatted` renders the pattern in local time (UTC for `UTC:` masks),
///   wrapped in gray when colorized.
/// * `Raw(true)` falls back to an ISO 8601 timestamp with milliseconds.
/// * Any other raw value renders no timestamp at all.
pub fn render_timestamp(policy: &TimestampPolicy, now: &DateTime<Utc>) -> Option<String> {
    match policy {
        TimestampPolicy::Formatted { pattern, colorized } => {
            let formatted = pattern.format_local(now);
            if *colorized {
                Some(formatted.bright_black().to_string())
            } else {
                Some(formatted)
            }
        }
        TimestampPolicy::Raw(Some(Value::Bool(true))) => {
            Some(now.format(DEFAULT_TIMESTAMP_FORMAT).to_string())
        }
        TimestampPolicy::Raw(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    fn resolve(options: Value) -> TimestampPolicy {
        TimestampPolicy::resolve(options.as_object().expect("object"))
    }

    #[test]
    fn test_string_timestamp_becomes_formatted() {
        let policy = resolve(json!({ "timestamp": "UTC:HH:MM:ss" }));
        assert!(policy.is_formatted());
        assert_eq!(policy.raw_value(), None);
        assert_eq!(policy.render(&fixed_datetime()).as_deref(), Some("10:30:45"));
    }

    #[test]
    fn test_colorize_string_true_wraps_in_gray() {
        colored::control::set_override(true);
        let policy = resolve(json!({ "timestamp": "UTC:HH:MM:ss", "colorize": "true" }));
        let rendered = policy.render(&fixed_datetime()).expect("rendered");
        assert_eq!(rendered, "\u{1b}[90m10:30:45\u{1b}[0m");
    }

    #[test]
    fn test_colorize_other_values_do_not_style() {
        for colorize in [json!(true), json!("false"), json!("TRUE"), json!(1)] {
            let policy = resolve(json!({ "timestamp": "UTC:HH:MM:ss", "colorize": colorize }));
            assert_eq!(
                policy,
                TimestampPolicy::Formatted {
                    pattern: DatePattern::parse("UTC:HH:MM:ss"),
                    colorized: false,
                }
            );
            assert_eq!(policy.render(&fixed_datetime()).as_deref(), Some("10:30:45"));
        }
    }

    #[test]
    fn test_non_string_timestamp_is_left_untouched() {
        assert_eq!(resolve(json!({})), TimestampPolicy::Raw(None));
        assert_eq!(
            resolve(json!({ "timestamp": false })),
            TimestampPolicy::Raw(Some(json!(false)))
        );
        assert_eq!(
            resolve(json!({ "timestamp": 42 })).raw_value(),
            Some(&json!(42))
        );
    }

    #[test]
    fn test_raw_rendering() {
        let now = fixed_datetime();
        assert_eq!(
            render_timestamp(&TimestampPolicy::Raw(Some(json!(true))), &now).as_deref(),
            Some("2025-01-08T10:30:45.123Z")
        );
        assert_eq!(render_timestamp(&TimestampPolicy::Raw(Some(json!(false))), &now), None);
        assert_eq!(render_timestamp(&TimestampPolicy::default(), &now), None);
    }
}

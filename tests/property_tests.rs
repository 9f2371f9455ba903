//! Property-based tests for logger_plugin using proptest

use chrono::{TimeZone, Utc};
use logger_plugin::config::json_config::deep_merge;
use logger_plugin::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level, in any letter case
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), upper in any::<bool>()) {
        let name = if upper { level.to_str().to_uppercase() } else { level.to_str().to_string() };
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(level.to_string(), level.to_str());
    }

    /// A threshold admits exactly the levels at or above its severity
    #[test]
    fn test_threshold_admits_by_severity(threshold in any_level(), level in any_level()) {
        prop_assert_eq!(threshold.admits(level), (level as u8) <= (threshold as u8));
        prop_assert!(threshold.admits(LogLevel::Error));
    }
}

// ============================================================================
// LogRecord Tests
// ============================================================================

proptest! {
    /// Messages never contain raw line breaks or tabs after sanitizing
    #[test]
    fn test_record_message_is_single_line(message in "\\PC*[\\n\\r\\t]?\\PC*") {
        let record = LogRecord::new(LogLevel::Info, message);
        prop_assert!(!record.message.contains('\n'));
        prop_assert!(!record.message.contains('\r'));
        prop_assert!(!record.message.contains('\t'));
    }

    /// Text lines end with the message when there are no fields
    #[test]
    fn test_text_line_shape(level in any_level(), message in "[a-zA-Z0-9 ]{0,40}") {
        let record = LogRecord::new(level, message.clone());
        let line = OutputFormat::Text.format(&record, &TransportSettings::default());
        prop_assert_eq!(line, format!("{}: {}", level, message));
    }
}

// ============================================================================
// DatePattern Tests
// ============================================================================

proptest! {
    /// UTC masks agree with the equivalent strftime rendering
    #[test]
    fn test_utc_mask_matches_strftime(secs in 0i64..4_102_444_800, millis in 0i64..1000) {
        let instant = Utc.timestamp_millis_opt(secs * 1000 + millis).unwrap();
        let pattern = DatePattern::parse("UTC:yyyy-mm-dd HH:MM:ss.l");
        prop_assert_eq!(
            pattern.format_local(&instant),
            instant.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
        );
    }

    /// Formatted timestamp policies always render something
    #[test]
    fn test_string_timestamp_always_renders(mask in "[dmyHMsl:/ -]{1,20}", secs in 0i64..2_000_000_000) {
        let options = json!({ "timestamp": mask });
        let policy = TimestampPolicy::resolve(options.as_object().unwrap());
        let instant = Utc.timestamp_opt(secs, 0).unwrap();
        prop_assert!(policy.is_formatted());
        prop_assert!(policy.render(&instant).is_some());
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

proptest! {
    /// Every key of a flat overlay wins after merging
    #[test]
    fn test_deep_merge_overlay_wins(
        base in prop::collection::btree_map("[a-e]", 0i64..100, 0..5),
        overlay in prop::collection::btree_map("[a-e]", 0i64..100, 0..5),
    ) {
        let to_value = |m: &std::collections::BTreeMap<String, i64>| {
            Value::Object(m.iter().map(|(k, v)| (k.clone(), json!(v))).collect::<Map<_, _>>())
        };
        let mut merged = to_value(&base);
        deep_merge(&mut merged, &to_value(&overlay));

        for (key, value) in &overlay {
            prop_assert_eq!(&merged[key], &json!(value));
        }
        for (key, value) in &base {
            if !overlay.contains_key(key) {
                prop_assert_eq!(&merged[key], &json!(value));
            }
        }
    }

    /// Every entry of the log namespace becomes one transport spec
    #[test]
    fn test_prepare_transports_keeps_every_entry(names in prop::collection::btree_set("[a-z]{1,8}", 0..6)) {
        let log: Map<String, Value> = names
            .iter()
            .map(|name| (name.clone(), json!({ "timestamp": "HH:MM" })))
            .collect();
        let specs = prepare_transports(Value::Object(log)).unwrap();

        prop_assert_eq!(specs.len(), names.len());
        for spec in &specs {
            prop_assert!(names.contains(spec.name()));
            prop_assert!(spec.timestamp().is_formatted());
            prop_assert!(spec.get("timestamp").is_none());
        }
    }
}

//! Masking of sensitive values inside structured log records.

use std::collections::HashSet;

use serde_json::Value;

/// Keys masked when no explicit set is configured.
pub const DEFAULT_SENSITIVE_KEYS: &[&str] = &["clientSecret", "accessToken", "token"];
pub const DEFAULT_PLACEHOLDER: &str = "****";
/// Trailing characters left visible after the placeholder.
pub const DEFAULT_SHOW_CHARS: usize = 4;

/// Redaction settings, fixed for the lifetime of a [`Redactor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionConfig {
    pub sensitive_keys: HashSet<String>,
    pub placeholder: String,
    pub show_chars: usize,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            sensitive_keys: DEFAULT_SENSITIVE_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            show_chars: DEFAULT_SHOW_CHARS,
        }
    }
}

impl RedactionConfig {
    /// Replaces the sensitive key set.
    pub fn with_sensitive_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.sensitive_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_show_chars(mut self, show_chars: usize) -> Self {
        self.show_chars = show_chars;
        self
    }
}

/// Record filter that masks the values of sensitive keys at any depth.
///
/// Holds no mutable state, so one instance can serve every logging call site.
#[derive(Debug, Clone)]
pub struct Redactor {
    config: RedactionConfig,
    // placeholder length + show_chars, in characters
    min_length: usize,
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}

impl Redactor {
    pub fn new(config: RedactionConfig) -> Self {
        let min_length = config.placeholder.chars().count() + config.show_chars;
        Self { config, min_length }
    }

    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        self.config.sensitive_keys.contains(key)
    }

    /// Redacts `record` in place.
    ///
    /// Always returns `true`: the record is never suppressed. Records that are
    /// not JSON objects are left untouched.
    pub fn filter(&self, record: &mut Value) -> bool {
        if record.is_object() {
            self.redact_in_place(record);
        }
        true
    }

    /// Returns a redacted copy of any structured value.
    pub fn redact(&self, value: &Value) -> Value {
        let mut out = value.clone();
        self.redact_in_place(&mut out);
        out
    }

    /// Applies the masking rule to a single string.
    ///
    /// Values no longer than the placeholder plus the visible suffix are
    /// replaced entirely so no part of a short secret survives.
    pub fn mask(&self, value: &str) -> String {
        let len = value.chars().count();
        if len <= self.min_length {
            return self.config.placeholder.clone();
        }

        let tail: String = value.chars().skip(len - self.config.show_chars).collect();
        format!("{}{}", self.config.placeholder, tail)
    }

    fn redact_in_place(&self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, inner) in map.iter_mut() {
                    if self.is_sensitive(key) {
                        self.mask_value(inner);
                    } else {
                        self.redact_in_place(inner);
                    }
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.redact_in_place(item);
                }
            }
            _ => {}
        }
    }

    // Non-string values are left as they are.
    fn mask_value(&self, value: &mut Value) {
        if let Value::String(s) = value {
            *s = self.mask(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_long_token_keeps_last_four() {
        let mut record = json!({ "token": "abcdef123456" });
        assert!(Redactor::default().filter(&mut record));
        assert_eq!(record["token"], "****3456");
    }

    #[test]
    fn test_short_token_fully_replaced() {
        let mut record = json!({ "token": "ab" });
        Redactor::default().filter(&mut record);
        assert_eq!(record["token"], "****");
    }

    #[test]
    fn test_threshold_boundary() {
        let redactor = Redactor::default();
        // 8 chars == placeholder(4) + show_chars(4)
        assert_eq!(redactor.mask("12345678"), "****");
        assert_eq!(redactor.mask("123456789"), "****6789");
    }

    #[test]
    fn test_non_sensitive_keys_untouched() {
        let mut record = json!({ "user": "alice", "clientSecret": "topsecret1234" });
        Redactor::default().filter(&mut record);
        assert_eq!(record["user"], "alice");
        assert_eq!(record["clientSecret"], "****1234");
    }

    #[test]
    fn test_nested_keys_redacted_at_any_depth() {
        let mut record = json!({
            "request": {
                "headers": {
                    "token": "abcdef123456"
                }
            },
            "token": "abcdef123456"
        });
        Redactor::default().filter(&mut record);
        assert_eq!(record["request"]["headers"]["token"], "****3456");
        assert_eq!(record["token"], record["request"]["headers"]["token"]);
    }

    #[test]
    fn test_objects_inside_arrays_redacted() {
        let mut record = json!({
            "attempts": [
                { "accessToken": "eyJhbGciOiJIUzI1NiJ9" },
                { "status": 200 }
            ]
        });
        Redactor::default().filter(&mut record);
        assert_eq!(record["attempts"][0]["accessToken"], "****NiJ9");
        assert_eq!(record["attempts"][1]["status"], 200);
    }

    #[test]
    fn test_non_string_sensitive_values_pass_through() {
        let mut record = json!({
            "token": 12345678901234_u64,
            "accessToken": null,
            "clientSecret": { "value": "abcdef123456" }
        });
        let before = record.clone();
        Redactor::default().filter(&mut record);
        assert_eq!(record, before);
    }

    #[test]
    fn test_short_redaction_is_idempotent() {
        let redactor = Redactor::default();
        let mut record = json!({ "token": "short" });
        redactor.filter(&mut record);
        let once = record.clone();
        redactor.filter(&mut record);
        assert_eq!(record, once);
        assert_eq!(record["token"], "****");
    }

    #[test]
    fn test_non_object_record_unchanged() {
        let redactor = Redactor::default();
        let mut record = json!("token");
        assert!(redactor.filter(&mut record));
        assert_eq!(record, json!("token"));

        let mut list = json!([{ "token": "abcdef123456" }]);
        redactor.filter(&mut list);
        assert_eq!(list[0]["token"], "abcdef123456");
    }

    #[test]
    fn test_redact_returns_copy() {
        let redactor = Redactor::default();
        let original = json!([{ "token": "abcdef123456" }]);
        let redacted = redactor.redact(&original);
        assert_eq!(redacted[0]["token"], "****3456");
        assert_eq!(original[0]["token"], "abcdef123456");
    }

    #[test]
    fn test_custom_config() {
        let redactor = Redactor::new(
            RedactionConfig::default()
                .with_sensitive_keys(["password"])
                .with_placeholder("[x]")
                .with_show_chars(2),
        );
        let mut record = json!({ "password": "hunter22", "token": "abcdef123456" });
        redactor.filter(&mut record);
        assert_eq!(record["password"], "[x]22");
        assert_eq!(record["token"], "abcdef123456");
    }

    #[test]
    fn test_zero_show_chars() {
        let redactor = Redactor::new(RedactionConfig::default().with_show_chars(0));
        assert_eq!(redactor.mask("abcdef123456"), "****");
    }

    #[test]
    fn test_multibyte_values_counted_by_chars() {
        let redactor = Redactor::default();
        assert_eq!(redactor.mask("ăâîșțăâî"), "****");
        assert_eq!(redactor.mask("ăâîșțăâîș"), "****ăâîș");
    }
}

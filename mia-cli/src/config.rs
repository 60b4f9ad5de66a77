//! Configuration loading from environment.

use std::{env, time::Duration};

use mia_logging::RedactionConfig;

/// Settings not covered by command-line flags.
pub struct Config {
    pub http_timeout: Duration,
    pub redaction: RedactionConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let http_timeout = lookup("MIA_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| anyhow::anyhow!("MIA_HTTP_TIMEOUT_SECS must be a whole number of seconds"))?;

        let mut redaction = RedactionConfig::default();
        if let Some(keys) = lookup("MIA_LOG_SENSITIVE_KEYS") {
            redaction = redaction.with_sensitive_keys(
                keys.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty()),
            );
        }
        if let Some(placeholder) = lookup("MIA_LOG_PLACEHOLDER") {
            redaction = redaction.with_placeholder(placeholder);
        }
        if let Some(show_chars) = lookup("MIA_LOG_SHOW_CHARS") {
            let show_chars = show_chars
                .parse()
                .map_err(|_| anyhow::anyhow!("MIA_LOG_SHOW_CHARS must be a non-negative integer"))?;
            redaction = redaction.with_show_chars(show_chars);
        }

        Ok(Self {
            http_timeout,
            redaction,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.redaction, RedactionConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MIA_HTTP_TIMEOUT_SECS", "5"),
            ("MIA_LOG_SENSITIVE_KEYS", "token, refreshToken,,iban"),
            ("MIA_LOG_PLACEHOLDER", "[redacted]"),
            ("MIA_LOG_SHOW_CHARS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.redaction.sensitive_keys.len(), 3);
        assert!(config.redaction.sensitive_keys.contains("refreshToken"));
        assert_eq!(config.redaction.placeholder, "[redacted]");
        assert_eq!(config.redaction.show_chars, 2);
    }

    #[test]
    fn test_invalid_show_chars() {
        let result = Config::from_lookup(lookup_from(&[("MIA_LOG_SHOW_CHARS", "-1")]));
        assert!(result.is_err());
    }
}

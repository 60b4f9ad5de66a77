//! # MIA Logging
//!
//! Keeps access tokens and client secrets out of log output.
//!
//! - `redact` - the masking rule and the [`Redactor`] record filter
//! - `layer` - a `tracing-subscriber` layer that writes redacted JSON lines
//!
//! ```no_run
//! use mia_logging::{RedactionConfig, init_logging};
//!
//! init_logging(RedactionConfig::default());
//! tracing::info!(token = "abcdef123456", "token issued"); // logged as ****3456
//! ```

pub mod layer;
pub mod redact;

pub use layer::RedactingLayer;
pub use redact::{
    DEFAULT_PLACEHOLDER, DEFAULT_SENSITIVE_KEYS, DEFAULT_SHOW_CHARS, RedactionConfig, Redactor,
};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber: `RUST_LOG` filtering plus a [`RedactingLayer`]
/// writing to stderr.
///
/// Panics if a global subscriber is already set.
pub fn init_logging(config: RedactionConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(RedactingLayer::new(Redactor::new(config)).with_writer(std::io::stderr))
        .init();
}

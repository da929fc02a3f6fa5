//! telemetry-context: contextual enrichment for outgoing telemetry items.
//!
//! Right before an item is sent, the host stamps it with what is known about
//! the current execution scope:
//! - Session, device, user, location and application metadata
//! - Operating-system and web records
//! - The operation identity (trace id, parent span id, name) used for
//!   distributed-trace correlation
//!
//! The operation's parent span id is established once, at startup, by
//! searching the environment for an inbound trace parent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host pipeline                                      │  ← owns items
//! └─────────────────────────────────────────────────────┘
//!                        │ apply_* / clean_up
//! ┌─────────────────────────────────────────────────────┐
//! │  TelemetryContext (context)                         │  ← one per scope
//! │  - Provider ownership                               │
//! │  - Apply pipeline and cleanup                       │
//! │  - Session-id resolution                            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Providers     │   │ Discovery     │   │ Environment   │
//! │ (providers/)  │   │ (discovery)   │   │ (environment/)│
//! │ - Attributes  │   │ - Search order│   │ - Probes      │
//! │ - Sessions    │   │ - Parsing     │   │ - W3C carrier │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/)                                   │
//! │  - Telemetry item and key names                     │
//! │  - Trace parent and `Request-Id` parser             │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`context`]: The per-scope context and apply pipeline
//! - [`discovery`]: Trace-parent search over ambient signals
//! - [`domain`]: Item, trace parent and error types
//! - [`environment`]: Hosting-environment probes
//! - [`providers`]: Context provider records
//! - [`observability`]: Subscriber setup for the crate's diagnostics
//!
//! # Example
//!
//! ```rust
//! use telemetry_context::environment::{Document, HostEnvironment, MetaElement};
//! use telemetry_context::{Config, TelemetryContext, TelemetryItem};
//!
//! let env = HostEnvironment::interactive().with_document(Document {
//!     meta: vec![MetaElement::new(
//!         "Request-Id",
//!         "|4bf92f3577b34da6a3ce929d0e0e4736.00f067aa0ba902b7.",
//!     )],
//! });
//!
//! let mut context = TelemetryContext::new(&Config::default(), &env);
//! context.renew_session(chrono::Utc::now());
//!
//! let mut item = TelemetryItem::with_base_type("PageviewData");
//! context.apply_all(&mut item);
//!
//! assert_eq!(item.ext_field("trace", "parentID"), Some("00f067aa0ba902b7"));
//! assert!(item.ext_field("app", "sesId").is_some());
//! ```
//!
//! # Failure Model
//!
//! Enrichment never fails. A malformed correlation token, a missing
//! environment capability or an absent provider field all result in an item
//! with fewer populated fields, never in an error or a dropped item.

#![allow(clippy::multiple_crate_versions)]

pub mod context;
pub mod discovery;
pub mod domain;
pub mod environment;
pub mod observability;
pub mod providers;

pub use context::TelemetryContext;
pub use domain::{ContextError, Result, TelemetryItem, TraceParent};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Default idle time before the automatic session is renewed (30 minutes).
pub const DEFAULT_SESSION_RENEWAL_MS: i64 = 30 * 60 * 1000;

/// Default maximum lifetime of the automatic session (24 hours).
pub const DEFAULT_SESSION_EXPIRATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Configuration for a [`TelemetryContext`].
///
/// # Example
///
/// ```toml
/// disable_trace_parent = false
/// session_renewal_ms = 1800000
/// sdk_extension = "ext1"
/// app_version = "2.4.1"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Skip trace-parent discovery at construction.
    pub disable_trace_parent: bool,

    /// Idle time, in milliseconds, after which a new automatic session starts.
    pub session_renewal_ms: i64,

    /// Maximum lifetime, in milliseconds, of an automatic session.
    pub session_expiration_ms: i64,

    /// Prefix for the reported SDK version, e.g. `ext1` gives `ext1_rust:0.1.0`.
    pub sdk_extension: Option<String>,

    /// Value of the internal snippet tag.
    pub snippet_version: Option<String>,

    /// Value of the internal SDK source tag.
    pub sdk_src: Option<String>,

    /// Initial application version.
    pub app_version: Option<String>,

    /// Initial application build.
    pub app_build: Option<String>,

    /// Filter for the crate's own diagnostics.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or `EnvFilter`
    /// directives. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            disable_trace_parent: false,
            session_renewal_ms: DEFAULT_SESSION_RENEWAL_MS,
            session_expiration_ms: DEFAULT_SESSION_EXPIRATION_MS,
            sdk_extension: None,
            snippet_version: None,
            sdk_src: None,
            app_version: None,
            app_build: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map, as hosts pass settings around.
    ///
    /// Unknown keys are ignored. Values that fail to parse fall back to their
    /// defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `disable_trace_parent`: `"true"`/`"false"` (case-insensitive)
    /// - `session_renewal_ms`, `session_expiration_ms`: positive integers
    /// - everything else: taken verbatim, empty strings ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use telemetry_context::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("disable_trace_parent".to_string(), "TRUE".to_string());
    /// map.insert("session_renewal_ms".to_string(), "oops".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert!(config.disable_trace_parent);
    /// assert_eq!(config.session_renewal_ms, telemetry_context::DEFAULT_SESSION_RENEWAL_MS);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| map.get(key).filter(|v| !v.is_empty()).cloned();
        let millis = |key: &str, fallback: i64| {
            map.get(key)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(fallback)
        };

        Self {
            disable_trace_parent: map
                .get("disable_trace_parent")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            session_renewal_ms: millis("session_renewal_ms", defaults.session_renewal_ms),
            session_expiration_ms: millis("session_expiration_ms", defaults.session_expiration_ms),
            sdk_extension: text("sdk_extension"),
            snippet_version: text("snippet_version"),
            sdk_src: text("sdk_src"),
            app_version: text("app_version"),
            app_build: text("app_build"),
            trace_level: text("trace_level"),
        }
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML, a field has the
    /// wrong type, or a session window is not positive.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading telemetry context configuration");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<()> {
        if self.session_renewal_ms <= 0 {
            return Err(ContextError::Config(
                "session_renewal_ms must be positive".to_string(),
            ));
        }
        if self.session_expiration_ms <= 0 {
            return Err(ContextError::Config(
                "session_expiration_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_map_reads_every_key() {
        let map: BTreeMap<String, String> = [
            ("disable_trace_parent", "true"),
            ("session_renewal_ms", "1000"),
            ("session_expiration_ms", "5000"),
            ("sdk_extension", "ext1"),
            ("snippet_version", "5"),
            ("sdk_src", "cdn"),
            ("app_version", "2.4.1"),
            ("app_build", "77"),
            ("trace_level", "debug"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(
            config,
            Config {
                disable_trace_parent: true,
                session_renewal_ms: 1000,
                session_expiration_ms: 5000,
                sdk_extension: Some("ext1".to_string()),
                snippet_version: Some("5".to_string()),
                sdk_src: Some("cdn".to_string()),
                app_version: Some("2.4.1".to_string()),
                app_build: Some("77".to_string()),
                trace_level: Some("debug".to_string()),
            }
        );
    }

    #[test]
    fn from_map_falls_back_on_bad_values() {
        let map: BTreeMap<String, String> = [
            ("disable_trace_parent", "yes"),
            ("session_renewal_ms", "-5"),
            ("sdk_extension", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(Config::from_map(&map), Config::default());
    }

    #[test]
    fn toml_uses_defaults_for_missing_fields() {
        let config = Config::from_toml_str("app_version = \"1.0\"").unwrap();
        assert_eq!(config.app_version.as_deref(), Some("1.0"));
        assert_eq!(config.session_renewal_ms, DEFAULT_SESSION_RENEWAL_MS);
        assert!(!config.disable_trace_parent);
    }

    #[test]
    fn toml_rejects_bad_documents() {
        assert!(matches!(
            Config::from_toml_str("disable_trace_parent = \"maybe\""),
            Err(ContextError::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml_str("session_expiration_ms = 0"),
            Err(ContextError::Config(_))
        ));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "disable_trace_parent = true\nsdk_extension = \"ext1\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.disable_trace_parent);
        assert_eq!(config.sdk_extension.as_deref(), Some("ext1"));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::from_file(dir.path().join("absent.toml")),
            Err(ContextError::Io(_))
        ));
    }
}

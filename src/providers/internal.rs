//! Internal (SDK) context provider.

use crate::Config;

/// Version string this crate reports, e.g. `rust:0.1.0`.
pub const SDK_VERSION: &str = concat!("rust:", env!("CARGO_PKG_VERSION"));

/// Metadata about the instrumentation itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Internal {
    pub agent_version: Option<String>,
    pub sdk_version: Option<String>,
    pub snippet_ver: Option<String>,
    pub sdk_src: Option<String>,
}

impl Internal {
    /// Builds the SDK version, prefixed by `<sdk_extension>_` when configured.
    ///
    /// # Example
    ///
    /// ```
    /// use telemetry_context::providers::Internal;
    /// use telemetry_context::Config;
    ///
    /// let config = Config { sdk_extension: Some("ext1".to_string()), ..Config::default() };
    /// let internal = Internal::new(&config);
    /// assert!(internal.sdk_version.unwrap().starts_with("ext1_rust:"));
    /// ```
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let sdk_version = match config.sdk_extension.as_deref().filter(|e| !e.is_empty()) {
            Some(extension) => format!("{extension}_{SDK_VERSION}"),
            None => SDK_VERSION.to_string(),
        };

        Self {
            agent_version: None,
            sdk_version: Some(sdk_version),
            snippet_ver: config.snippet_version.clone(),
            sdk_src: config.sdk_src.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reports_plain_sdk_version() {
        let internal = Internal::new(&Config::default());
        assert_eq!(internal.sdk_version.as_deref(), Some(SDK_VERSION));
        assert!(internal.agent_version.is_none());
        assert!(internal.snippet_ver.is_none());
    }

    #[test]
    fn empty_extension_is_ignored() {
        let config = Config {
            sdk_extension: Some(String::new()),
            ..Config::default()
        };
        assert_eq!(Internal::new(&config).sdk_version.as_deref(), Some(SDK_VERSION));
    }
}

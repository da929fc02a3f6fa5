//! Application context provider.

use crate::Config;

/// Version and build of the instrumented application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Application {
    pub ver: Option<String>,
    pub build: Option<String>,
}

impl Application {
    /// Seeds version and build from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            ver: config.app_version.clone(),
            build: config.app_build.clone(),
        }
    }
}

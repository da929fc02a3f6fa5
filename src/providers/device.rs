//! Device context provider.

/// Device class reported by interactive hosts.
pub const BROWSER_DEVICE_CLASS: &str = "Browser";

/// The device the telemetry originates from.
///
/// Only `device_class` has a default. The remaining fields are filled in by
/// the host when it knows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Device {
    pub id: Option<String>,
    pub ip: Option<String>,
    pub model: Option<String>,
    pub device_class: Option<String>,
}

impl Device {
    #[must_use]
    pub fn new() -> Self {
        Self {
            device_class: Some(BROWSER_DEVICE_CLASS.to_string()),
            ..Self::default()
        }
    }
}

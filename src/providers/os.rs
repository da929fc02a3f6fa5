//! Operating-system context provider.
//!
//! Stamped onto items as a whole object, so every populated field here ends
//! up under `ext.os` verbatim.

use serde::Serialize;

/// Operating system of the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperatingSystem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
}

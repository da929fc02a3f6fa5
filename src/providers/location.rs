//! Location context provider.

/// Client network location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub ip: Option<String>,
}

//! Probes into the hosting environment.
//!
//! Context construction and trace-parent discovery only read ambient state
//! through the [`Environment`] trait. Every probe is optional: a headless
//! process has no window, no document and no performance timeline, and that
//! is a normal answer rather than an error.
//!
//! [`HostEnvironment`] is an owned snapshot that implements the trait. Hosts
//! fill it in with the builder methods, or deserialize it from JSON handed
//! over by an embedding page.
//!
//! # Modules
//!
//! - [`carrier`]: Inbound W3C trace-context carriers

pub mod carrier;

pub use carrier::InboundCarrier;

use serde::Deserialize;

/// Read-only view of the hosting environment.
pub trait Environment {
    /// Whether an interactive UI host (a window) is present.
    fn has_window(&self) -> bool;

    /// The document metadata, if a document is available.
    fn document(&self) -> Option<&Document>;

    /// The performance timeline, if the host exposes one.
    fn performance(&self) -> Option<&Performance>;

    /// The inbound W3C trace-context carrier, if any.
    fn inbound_carrier(&self) -> Option<&InboundCarrier>;

    /// Path of the current location, used as the operation name.
    fn location_path(&self) -> Option<&str>;
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub meta: Vec<MetaElement>,
}

/// A `<meta name=".." content="..">` element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetaElement {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl MetaElement {
    #[must_use]
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            content: Some(content.to_string()),
        }
    }
}

impl Document {
    /// Content values of every meta element whose name equals `name`, in document order.
    pub fn meta_contents<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.meta
            .iter()
            .filter(move |m| m.name.as_deref() == Some(name))
            .filter_map(|m| m.content.as_deref())
    }
}

/// The performance timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Performance {
    /// Navigation-type timing entries, oldest first.
    #[serde(default)]
    pub navigation: Vec<NavigationTiming>,
}

/// A navigation timing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTiming {
    #[serde(default)]
    pub server_timing: Vec<ServerTiming>,
}

/// One `Server-Timing` metric reported by the server for a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerTiming {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ServerTiming {
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// An owned snapshot of the hosting environment.
///
/// # Example
///
/// ```
/// use telemetry_context::environment::{Document, Environment, HostEnvironment, MetaElement};
///
/// let env = HostEnvironment::interactive()
///     .with_document(Document { meta: vec![MetaElement::new("Request-Id", "|abc.def")] })
///     .with_location_path("/checkout");
///
/// assert!(env.has_window());
/// assert_eq!(env.location_path(), Some("/checkout"));
/// assert!(env.performance().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostEnvironment {
    #[serde(default)]
    pub window: bool,

    #[serde(default)]
    pub document: Option<Document>,

    #[serde(default)]
    pub performance: Option<Performance>,

    #[serde(skip)]
    pub inbound_carrier: Option<InboundCarrier>,

    #[serde(default)]
    pub location_path: Option<String>,
}

impl HostEnvironment {
    /// A non-interactive environment with no probes available.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// An interactive environment with a window and nothing else yet.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            window: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    #[must_use]
    pub fn with_performance(mut self, performance: Performance) -> Self {
        self.performance = Some(performance);
        self
    }

    #[must_use]
    pub fn with_inbound_carrier(mut self, carrier: InboundCarrier) -> Self {
        self.inbound_carrier = Some(carrier);
        self
    }

    #[must_use]
    pub fn with_location_path(mut self, path: impl Into<String>) -> Self {
        self.location_path = Some(path.into());
        self
    }
}

impl Environment for HostEnvironment {
    fn has_window(&self) -> bool {
        self.window
    }

    fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    fn performance(&self) -> Option<&Performance> {
        self.performance.as_ref()
    }

    fn inbound_carrier(&self) -> Option<&InboundCarrier> {
        self.inbound_carrier.as_ref()
    }

    fn location_path(&self) -> Option<&str> {
        self.location_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_contents_filters_by_exact_name() {
        let document = Document {
            meta: vec![
                MetaElement::new("request-id", "lowercase"),
                MetaElement::new("Request-Id", "first"),
                MetaElement {
                    name: Some("Request-Id".to_string()),
                    content: None,
                },
                MetaElement::new("Request-Id", "second"),
            ],
        };

        let contents: Vec<_> = document.meta_contents("Request-Id").collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn snapshot_deserializes_from_json() {
        let env: HostEnvironment = serde_json::from_str(
            r#"{
                "window": true,
                "document": {"meta": [{"name": "Request-Id", "content": "|x.y"}]},
                "performance": {"navigation": [{"serverTiming": [{"name": "Request-Id", "description": "|x.y"}]}]},
                "locationPath": "/home"
            }"#,
        )
        .unwrap();

        assert!(env.has_window());
        assert_eq!(env.document().unwrap().meta.len(), 1);
        assert_eq!(env.performance().unwrap().navigation[0].server_timing[0].description, "|x.y");
        assert_eq!(env.location_path(), Some("/home"));
        assert!(env.inbound_carrier().is_none());
    }

    #[test]
    fn detached_environment_exposes_nothing() {
        let env = HostEnvironment::detached();
        assert!(!env.has_window());
        assert!(env.document().is_none());
        assert!(env.performance().is_none());
        assert!(env.inbound_carrier().is_none());
        assert!(env.location_path().is_none());
    }
}

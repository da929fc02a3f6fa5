//! The telemetry item that context providers enrich.
//!
//! The item is owned by the host pipeline. Enrichment only ever touches two
//! well-known buckets:
//!
//! - `tags`: a flat map of namespaced keys (see [`tag_keys`]) to scalar values
//! - `ext`: a map of extension names (see [`ext_keys`]) to extension objects
//!
//! Both buckets are created lazily on first write and are never replaced
//! wholesale. Individual keys are added or overwritten.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Namespaced keys written into the `tags` bucket.
pub mod tag_keys {
    pub const APPLICATION_VERSION: &str = "ai.application.ver";
    pub const APPLICATION_BUILD: &str = "ai.application.build";
    pub const INTERNAL_AGENT_VERSION: &str = "ai.internal.agentVersion";
    pub const INTERNAL_SDK_VERSION: &str = "ai.internal.sdkVersion";
    pub const INTERNAL_SNIPPET: &str = "ai.internal.snippet";
    pub const INTERNAL_SDK_SRC: &str = "ai.internal.sdkSrc";
    pub const LOCATION_IP: &str = "ai.location.ip";
    pub const USER_ACCOUNT_ID: &str = "ai.user.accountId";
}

/// Extension bucket names and the fields written inside them.
pub mod ext_keys {
    pub const APP: &str = "app";
    pub const DEVICE: &str = "device";
    pub const OS: &str = "os";
    pub const TRACE: &str = "trace";
    pub const USER: &str = "user";
    pub const WEB: &str = "web";

    /// Buckets that cleanup removes when they end up empty.
    pub const CLEANED: [&str; 6] = [DEVICE, USER, WEB, OS, APP, TRACE];

    pub const SESSION_ID: &str = "sesId";
    pub const DEVICE_LOCAL_ID: &str = "localId";
    pub const DEVICE_IP: &str = "ip";
    pub const DEVICE_MODEL: &str = "model";
    pub const DEVICE_CLASS: &str = "deviceClass";
    pub const TRACE_ID: &str = "traceID";
    pub const TRACE_NAME: &str = "name";
    pub const TRACE_PARENT_ID: &str = "parentID";
    pub const USER_ID: &str = "id";
    pub const USER_AUTH_ID: &str = "authId";
}

/// Base-type names that select extra internal tags.
pub mod base_types {
    pub const MESSAGE: &str = "MessageData";
    pub const PAGE_VIEW: &str = "PageviewData";
}

/// An outgoing telemetry item.
///
/// # Example
///
/// ```
/// use telemetry_context::TelemetryItem;
///
/// let item: TelemetryItem = serde_json::from_str(
///     r#"{"name": "page", "baseType": "PageviewData", "tags": {"custom": 1}}"#,
/// ).unwrap();
/// assert_eq!(item.base_type.as_deref(), Some("PageviewData"));
/// assert!(item.ext.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Declared payload type, e.g. [`base_types::PAGE_VIEW`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Map<String, Value>>,

    /// Payload, untouched by enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TelemetryItem {
    /// Creates an empty item with the given base type.
    #[must_use]
    pub fn with_base_type(base_type: impl Into<String>) -> Self {
        Self {
            base_type: Some(base_type.into()),
            ..Self::default()
        }
    }

    /// Returns the `tags` bucket, attaching an empty one first if absent.
    pub fn tags_mut(&mut self) -> &mut Map<String, Value> {
        self.tags.get_or_insert_with(Map::new)
    }

    /// Returns the `ext` bucket, attaching an empty one first if absent.
    pub fn ext_mut(&mut self) -> &mut Map<String, Value> {
        self.ext.get_or_insert_with(Map::new)
    }

    /// Returns the named extension object, attaching an empty one first if absent.
    ///
    /// Returns `None` when the key is already occupied by something other than
    /// an object. That value is left as the host put it.
    pub fn ext_bucket_mut(&mut self, name: &str) -> Option<&mut Map<String, Value>> {
        self.ext_mut()
            .entry(name)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
    }

    /// Reads a string tag.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref()?.get(key)?.as_str()
    }

    /// Reads a string field from an extension object.
    #[must_use]
    pub fn ext_field(&self, bucket: &str, field: &str) -> Option<&str> {
        self.ext.as_ref()?.get(bucket)?.get(field)?.as_str()
    }

    /// Writes a tag when `value` is present and non-empty.
    pub fn set_tag_if(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = non_empty(value) {
            self.tags_mut()
                .insert(key.to_string(), Value::String(value.to_string()));
        }
    }
}

/// Writes `field` into `target` when `value` is present and non-empty.
pub fn set_field_if(target: &mut Map<String, Value>, field: &str, value: Option<&str>) {
    if let Some(value) = non_empty(value) {
        target.insert(field.to_string(), Value::String(value.to_string()));
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn buckets_are_created_on_first_write() {
        let mut item = TelemetryItem::default();
        assert!(item.tags.is_none());

        item.set_tag_if(tag_keys::LOCATION_IP, Some("10.0.0.1"));
        assert_eq!(item.tag(tag_keys::LOCATION_IP), Some("10.0.0.1"));

        let bucket = item.ext_bucket_mut(ext_keys::DEVICE).unwrap();
        assert!(bucket.is_empty());
        assert!(item.ext.as_ref().unwrap().contains_key(ext_keys::DEVICE));
    }

    #[test]
    fn absent_and_empty_values_are_skipped() {
        let mut item = TelemetryItem::default();
        item.set_tag_if(tag_keys::LOCATION_IP, None);
        item.set_tag_if(tag_keys::LOCATION_IP, Some(""));
        assert!(item.tags.is_none());

        let mut target = Map::new();
        set_field_if(&mut target, "ip", None);
        set_field_if(&mut target, "ip", Some(""));
        assert!(target.is_empty());
    }

    #[test]
    fn existing_keys_are_preserved() {
        let mut item: TelemetryItem = serde_json::from_value(json!({
            "tags": {"custom": "kept"},
            "ext": {"device": {"custom": "kept"}}
        }))
        .unwrap();

        item.set_tag_if(tag_keys::LOCATION_IP, Some("10.0.0.1"));
        let device = item.ext_bucket_mut(ext_keys::DEVICE).unwrap();
        set_field_if(device, ext_keys::DEVICE_IP, Some("10.0.0.2"));

        assert_eq!(item.tag("custom"), Some("kept"));
        assert_eq!(item.ext_field(ext_keys::DEVICE, "custom"), Some("kept"));
        assert_eq!(item.ext_field(ext_keys::DEVICE, ext_keys::DEVICE_IP), Some("10.0.0.2"));
    }

    #[test]
    fn non_object_extension_is_left_alone() {
        let mut item: TelemetryItem =
            serde_json::from_value(json!({"ext": {"device": "opaque"}})).unwrap();

        assert!(item.ext_bucket_mut(ext_keys::DEVICE).is_none());
        assert_eq!(item.ext.unwrap()["device"], json!("opaque"));
    }

    #[test]
    fn serializes_camel_case_without_absent_buckets() {
        let item = TelemetryItem::with_base_type(base_types::MESSAGE);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"baseType": "MessageData"})
        );
    }
}

//! Web context provider.
//!
//! Stamped onto items as a whole object under `ext.web`.

use serde::Serialize;

/// Browser-side details of the page emitting telemetry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_ver: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_lang: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_consent: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_manual: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_res: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

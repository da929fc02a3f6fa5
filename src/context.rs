//! The telemetry context: providers for one execution scope and the apply pipeline.
//!
//! [`TelemetryContext`] is built once per execution scope. Construction picks
//! the providers the environment supports and, unless disabled, seeds the
//! operation's parent id from trace-parent discovery. Afterwards the host runs
//! any of the `apply_*` operations on each outgoing item, followed by
//! [`TelemetryContext::clean_up`].
//!
//! # Pipeline
//!
//! ```text
//! application → device → internal → location → operation → web → os → user → session → clean_up
//! ```
//!
//! Every `apply_*` reads one provider, skips absent or empty values, and only
//! adds or overwrites individual keys on the item. Buckets created on the way
//! that end up empty are removed by `clean_up`.

use crate::discovery::discover_trace_parent;
use crate::domain::item::set_field_if;
use crate::domain::{base_types, ext_keys, tag_keys, TelemetryItem, TraceParent};
use crate::environment::Environment;
use crate::providers::{
    Application, Device, Internal, Location, OperatingSystem, Session, SessionManager,
    TelemetryTrace, User, WebContext,
};
use crate::Config;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Context providers for the current execution scope.
///
/// `application` and `internal` exist in every environment. The remaining
/// providers only exist when an interactive host is present, or when the host
/// sets them. An absent provider turns its `apply_*` into a no-op.
#[derive(Debug, Clone)]
pub struct TelemetryContext {
    pub application: Application,
    pub internal: Internal,
    pub session_manager: Option<SessionManager>,
    pub device: Option<Device>,
    pub location: Option<Location>,
    pub user: Option<User>,
    pub session: Option<Session>,
    pub telemetry_trace: Option<TelemetryTrace>,
    pub os: Option<OperatingSystem>,
    pub web: Option<WebContext>,
}

impl TelemetryContext {
    /// Builds the providers for the given environment.
    ///
    /// Discovery runs at most once, here, and only when an interactive host
    /// is present and `config.disable_trace_parent` is false. Only the span
    /// id of a discovered parent is kept; the operation always gets its own
    /// trace id.
    ///
    /// # Example
    ///
    /// ```
    /// use telemetry_context::environment::HostEnvironment;
    /// use telemetry_context::{Config, TelemetryContext};
    ///
    /// let headless = TelemetryContext::new(&Config::default(), &HostEnvironment::detached());
    /// assert!(headless.device.is_none());
    /// assert!(headless.telemetry_trace.is_none());
    ///
    /// let page = TelemetryContext::new(&Config::default(), &HostEnvironment::interactive());
    /// assert!(page.device.is_some());
    /// assert!(page.telemetry_trace.is_some());
    /// ```
    #[must_use]
    pub fn new(config: &Config, env: &dyn Environment) -> Self {
        let interactive = env.has_window();

        // Discovery reads the caller's span, so it runs before ours is entered.
        let trace_parent = if interactive && !config.disable_trace_parent {
            discover_trace_parent(env)
        } else {
            None
        };

        let _span = tracing::debug_span!(
            "telemetry_context_new",
            interactive,
            disable_trace_parent = config.disable_trace_parent
        )
        .entered();

        let mut context = Self {
            application: Application::new(config),
            internal: Internal::new(config),
            session_manager: None,
            device: None,
            location: None,
            user: None,
            session: None,
            telemetry_trace: None,
            os: None,
            web: None,
        };

        if interactive {
            context.session_manager = Some(SessionManager::new(config));
            context.device = Some(Device::new());
            context.location = Some(Location::default());
            context.user = Some(User::default());
            context.session = Some(Session::default());

            if config.disable_trace_parent {
                tracing::debug!("trace parent discovery disabled");
            }

            context.telemetry_trace = Some(TelemetryTrace::new(
                None,
                trace_parent.as_ref().map(TraceParent::span_id),
                env.location_path(),
            ));
        }

        tracing::debug!(
            interactive,
            parent_id = ?context.telemetry_trace.as_ref().and_then(|t| t.parent_id.as_deref()),
            "telemetry context initialized"
        );

        context
    }

    /// Resolves the session id: explicit session first, then the automatic one.
    ///
    /// Empty ids count as absent.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        let explicit = self
            .session
            .as_ref()
            .and_then(|session| session.id.as_deref())
            .filter(|id| !id.is_empty());

        explicit.or_else(|| {
            self.session_manager
                .as_ref()
                .and_then(|manager| manager.automatic_session.id.as_deref())
                .filter(|id| !id.is_empty())
        })
    }

    /// Records activity on the automatic session. Returns `true` when a new session started.
    pub fn renew_session(&mut self, now: DateTime<Utc>) -> bool {
        self.session_manager
            .as_mut()
            .is_some_and(|manager| manager.update(now))
    }

    /// Writes the resolved session id to `ext.app.sesId`.
    pub fn apply_session_context(&self, item: &mut TelemetryItem) {
        if let Some(session_id) = self.session_id() {
            if let Some(app) = item.ext_bucket_mut(ext_keys::APP) {
                set_field_if(app, ext_keys::SESSION_ID, Some(session_id));
            }
        }
    }

    /// Sets `ext.os` to the operating-system record.
    pub fn apply_operating_system_context(&self, item: &mut TelemetryItem) {
        if let Some(os) = &self.os {
            set_extension_object(item, ext_keys::OS, os);
        }
    }

    /// Writes application version and build tags.
    pub fn apply_application_context(&self, item: &mut TelemetryItem) {
        item.set_tag_if(tag_keys::APPLICATION_VERSION, self.application.ver.as_deref());
        item.set_tag_if(tag_keys::APPLICATION_BUILD, self.application.build.as_deref());
    }

    /// Writes the device fields under `ext.device`.
    pub fn apply_device_context(&self, item: &mut TelemetryItem) {
        let Some(device) = &self.device else {
            return;
        };

        if let Some(target) = item.ext_bucket_mut(ext_keys::DEVICE) {
            set_field_if(target, ext_keys::DEVICE_LOCAL_ID, device.id.as_deref());
            set_field_if(target, ext_keys::DEVICE_IP, device.ip.as_deref());
            set_field_if(target, ext_keys::DEVICE_MODEL, device.model.as_deref());
            set_field_if(target, ext_keys::DEVICE_CLASS, device.device_class.as_deref());
        }
    }

    /// Writes SDK version tags.
    ///
    /// Snippet and SDK source tags are only written on message and page-view items.
    pub fn apply_internal_context(&self, item: &mut TelemetryItem) {
        let internal = &self.internal;
        item.set_tag_if(tag_keys::INTERNAL_AGENT_VERSION, internal.agent_version.as_deref());
        item.set_tag_if(tag_keys::INTERNAL_SDK_VERSION, internal.sdk_version.as_deref());

        if matches!(
            item.base_type.as_deref(),
            Some(base_types::MESSAGE | base_types::PAGE_VIEW)
        ) {
            item.set_tag_if(tag_keys::INTERNAL_SNIPPET, internal.snippet_ver.as_deref());
            item.set_tag_if(tag_keys::INTERNAL_SDK_SRC, internal.sdk_src.as_deref());
        }
    }

    /// Writes the client address tag.
    pub fn apply_location_context(&self, item: &mut TelemetryItem) {
        if let Some(location) = &self.location {
            item.set_tag_if(tag_keys::LOCATION_IP, location.ip.as_deref());
        }
    }

    /// Writes the operation identity under `ext.trace`.
    pub fn apply_operation_context(&self, item: &mut TelemetryItem) {
        let Some(trace) = &self.telemetry_trace else {
            return;
        };

        if let Some(target) = item.ext_bucket_mut(ext_keys::TRACE) {
            set_field_if(target, ext_keys::TRACE_ID, Some(trace.trace_id.as_str()));
            set_field_if(target, ext_keys::TRACE_NAME, trace.name.as_deref());
            set_field_if(target, ext_keys::TRACE_PARENT_ID, trace.parent_id.as_deref());
        }
    }

    /// Sets `ext.web` to the web context record.
    pub fn apply_web_context(&self, item: &mut TelemetryItem) {
        if let Some(web) = &self.web {
            set_extension_object(item, ext_keys::WEB, web);
        }
    }

    /// Writes the account tag and the user fields under `ext.user`.
    pub fn apply_user_context(&self, item: &mut TelemetryItem) {
        let Some(user) = &self.user else {
            return;
        };

        item.set_tag_if(tag_keys::USER_ACCOUNT_ID, user.account_id.as_deref());
        if let Some(target) = item.ext_bucket_mut(ext_keys::USER) {
            set_field_if(target, ext_keys::USER_ID, user.id.as_deref());
            set_field_if(target, ext_keys::USER_AUTH_ID, user.authenticated_id.as_deref());
        }
    }

    /// Removes well-known extension buckets that ended up empty.
    pub fn clean_up(&self, item: &mut TelemetryItem) {
        let Some(ext) = item.ext.as_mut() else {
            return;
        };

        for name in ext_keys::CLEANED {
            if ext
                .get(name)
                .and_then(Value::as_object)
                .is_some_and(Map::is_empty)
            {
                ext.remove(name);
            }
        }
    }

    /// Runs every `apply_*` in pipeline order, then [`clean_up`](Self::clean_up).
    pub fn apply_all(&self, item: &mut TelemetryItem) {
        self.apply_application_context(item);
        self.apply_device_context(item);
        self.apply_internal_context(item);
        self.apply_location_context(item);
        self.apply_operation_context(item);
        self.apply_web_context(item);
        self.apply_operating_system_context(item);
        self.apply_user_context(item);
        self.apply_session_context(item);
        self.clean_up(item);

        tracing::trace!(name = ?item.name, base_type = ?item.base_type, "telemetry item enriched");
    }
}

/// Replaces `ext.<name>` with the serialized record.
fn set_extension_object<T: Serialize>(item: &mut TelemetryItem, name: &str, record: &T) {
    match serde_json::to_value(record) {
        Ok(value @ Value::Object(_)) => {
            item.ext_mut().insert(name.to_string(), value);
        }
        Ok(_) => tracing::debug!(extension = name, "extension record is not an object, skipping"),
        Err(e) => tracing::debug!(extension = name, error = %e, "failed to serialize extension record"),
    }
}

//! Session context provider and the automatic session manager.
//!
//! A host may set an explicit [`Session`] on the context. When it does not,
//! the [`SessionManager`] keeps an automatic session alive: a new id is
//! started when the current one has been idle longer than the renewal window
//! or has existed longer than the expiration window.

use crate::{Config, DEFAULT_SESSION_EXPIRATION_MS, DEFAULT_SESSION_RENEWAL_MS};
use chrono::{DateTime, Duration, Utc};

/// A telemetry session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub id: Option<String>,

    /// When the session was started.
    pub acquisition_date: Option<DateTime<Utc>>,

    /// When the session last saw activity.
    pub renewal_date: Option<DateTime<Utc>>,
}

impl Session {
    /// A session with only an id, as hosts set it explicitly.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Maintains the automatic session.
#[derive(Debug, Clone)]
pub struct SessionManager {
    pub automatic_session: Session,
    renewal: Duration,
    expiration: Duration,
}

impl SessionManager {
    /// Creates a manager with no session yet; the first [`update`](Self::update) starts one.
    ///
    /// Windows that are not positive or do not fit a [`Duration`] fall back to
    /// [`DEFAULT_SESSION_RENEWAL_MS`] and [`DEFAULT_SESSION_EXPIRATION_MS`].
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            automatic_session: Session::default(),
            renewal: window(
                "session_renewal_ms",
                config.session_renewal_ms,
                DEFAULT_SESSION_RENEWAL_MS,
            ),
            expiration: window(
                "session_expiration_ms",
                config.session_expiration_ms,
                DEFAULT_SESSION_EXPIRATION_MS,
            ),
        }
    }

    /// Records activity at `now`, starting a new session when needed.
    ///
    /// Returns `true` when a new session id was issued.
    pub fn update(&mut self, now: DateTime<Utc>) -> bool {
        let session = &mut self.automatic_session;
        let expired = session
            .acquisition_date
            .is_some_and(|acquired| now - acquired > self.expiration);
        let idle = session
            .renewal_date
            .is_some_and(|renewed| now - renewed > self.renewal);

        if session.id.is_none() || expired || idle {
            let id = super::ids::new_short_id();
            tracing::debug!(session_id = %id, expired, idle, "starting new automatic session");

            *session = Session {
                id: Some(id),
                acquisition_date: Some(now),
                renewal_date: Some(now),
            };
            return true;
        }

        session.acquisition_date.get_or_insert(now);
        session.renewal_date = Some(now);
        false
    }
}

fn window(key: &str, millis: i64, fallback: i64) -> Duration {
    match Duration::try_milliseconds(millis).filter(|d| *d > Duration::zero()) {
        Some(duration) => duration,
        None => {
            tracing::warn!(key, millis, fallback, "invalid session window, using default");
            Duration::milliseconds(fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(&Config::default())
    }

    #[test]
    fn first_update_starts_session() {
        let mut manager = manager();
        assert!(manager.automatic_session.id.is_none());

        let now = Utc::now();
        assert!(manager.update(now));
        assert!(manager.automatic_session.id.is_some());
        assert_eq!(manager.automatic_session.acquisition_date, Some(now));
    }

    #[test]
    fn activity_within_renewal_window_keeps_session() {
        let mut manager = manager();
        let start = Utc::now();
        manager.update(start);
        let id = manager.automatic_session.id.clone();

        let later = start + Duration::minutes(10);
        assert!(!manager.update(later));
        assert_eq!(manager.automatic_session.id, id);
        assert_eq!(manager.automatic_session.renewal_date, Some(later));
        assert_eq!(manager.automatic_session.acquisition_date, Some(start));
    }

    #[test]
    fn idle_session_is_renewed() {
        let mut manager = manager();
        let start = Utc::now();
        manager.update(start);
        let id = manager.automatic_session.id.clone();

        assert!(manager.update(start + Duration::minutes(31)));
        assert_ne!(manager.automatic_session.id, id);
    }

    #[test]
    fn long_session_expires_despite_activity() {
        let mut manager = manager();
        let start = Utc::now();
        manager.update(start);
        let id = manager.automatic_session.id.clone();

        let mut now = start;
        for _ in 0..60 {
            now += Duration::minutes(29);
            manager.update(now);
        }
        assert_ne!(manager.automatic_session.id, id);
        assert!(manager.automatic_session.acquisition_date > Some(start));
    }

    #[test]
    fn host_supplied_automatic_id_is_kept() {
        let mut manager = manager();
        manager.automatic_session = Session::with_id("restored");

        assert!(!manager.update(Utc::now()));
        assert_eq!(manager.automatic_session.id.as_deref(), Some("restored"));
        assert!(manager.automatic_session.acquisition_date.is_some());
    }

    #[test]
    fn unusable_windows_fall_back_to_defaults() {
        for millis in [0, -1, i64::MIN] {
            let mut manager = SessionManager::new(&Config {
                session_renewal_ms: millis,
                session_expiration_ms: millis,
                ..Config::default()
            });
            assert_eq!(manager.renewal, Duration::milliseconds(DEFAULT_SESSION_RENEWAL_MS));
            assert_eq!(
                manager.expiration,
                Duration::milliseconds(DEFAULT_SESSION_EXPIRATION_MS)
            );

            let now = Utc::now();
            assert!(manager.update(now));
            assert!(!manager.update(now), "window {millis} renewed at the same instant");
            assert!(!manager.update(now + Duration::minutes(29)));
        }
    }

    #[test]
    fn positive_windows_are_kept() {
        let manager = SessionManager::new(&Config {
            session_renewal_ms: 1_000,
            session_expiration_ms: 5_000,
            ..Config::default()
        });
        assert_eq!(manager.renewal, Duration::seconds(1));
        assert_eq!(manager.expiration, Duration::seconds(5));
    }
}

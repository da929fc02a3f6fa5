//! Context providers: the attribute holders stamped onto telemetry items.
//!
//! Each provider is plain data owned by [`crate::TelemetryContext`] for the
//! lifetime of the execution scope. Hosts read or replace them through the
//! context's public fields, e.g. to set an explicit session or user.
//!
//! # Modules
//!
//! - [`application`]: Application version and build
//! - [`device`]: Device id, address, model and class
//! - [`internal`]: SDK and agent versions
//! - [`location`]: Client address
//! - [`os`]: Operating-system record
//! - [`session`]: Explicit session and the automatic session manager
//! - [`trace`]: Operation identity (trace id, parent id, name)
//! - [`user`]: User, authenticated user and account ids
//! - [`web`]: Web context record

pub mod application;
pub mod device;
mod ids;
pub mod internal;
pub mod location;
pub mod os;
pub mod session;
pub mod trace;
pub mod user;
pub mod web;

pub use application::Application;
pub use device::Device;
pub use internal::Internal;
pub use location::Location;
pub use os::OperatingSystem;
pub use session::{Session, SessionManager};
pub use trace::TelemetryTrace;
pub use user::User;
pub use web::WebContext;

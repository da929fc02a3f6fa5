//! Error types for the telemetry context crate.
//!
//! This module defines the centralized error type [`ContextError`] and a type alias
//! [`Result`]. Errors only arise while building a [`crate::Config`]; the enrichment
//! path itself never fails and degrades to omitted fields instead.

use thiserror::Error;

/// The main error type for telemetry context operations.
///
/// # Examples
///
/// ```
/// use telemetry_context::ContextError;
///
/// fn validate() -> Result<(), ContextError> {
///     Err(ContextError::Config("session_renewal_ms must be positive".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ContextError {
    /// Configuration is invalid.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized `Result` type for telemetry context operations.
pub type Result<T> = std::result::Result<T, ContextError>;

//! Error types for the fallible edges of the crate.
//!
//! Distance, pricing, and matching are infallible. Errors only arise when
//! loading configuration, parsing identifiers, or talking to the external
//! providers that supply live counts and driver locations.

use thiserror::Error;

/// Invalid or unreadable pricing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pricing config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to parse pricing config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read pricing config: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// An external data provider could not answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Unknown vehicle tier identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown vehicle tier '{0}' (expected bike, car, or truck)")]
pub struct ParseTierError(pub String);

/// Errors surfaced by the ride request workflow.
#[derive(Debug, Error)]
pub enum RideError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Shorthand result type for workflow operations.
pub type RideResult<T> = Result<T, RideError>;

//! Error types for the SmartShopr integration.
//!
//! `ApiError` is what the transport and the facade return. `SyncError` is the
//! synchronization-failure condition the coordinator surfaces to its host, and
//! `SetupError` is the classification shown during setup.

use crate::constants::{ERROR_ACCESS_DENIED, ERROR_INVALID_API_KEY};

/// Errors returned by the transport client and the service facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401: the bearer token is invalid or revoked.
    #[error("{}", ERROR_INVALID_API_KEY)]
    Auth,

    /// HTTP 403: authenticated but not allowed.
    #[error("{}", ERROR_ACCESS_DENIED)]
    AccessDenied,

    /// Any other failure: bad status, undecodable body, timeout, connection error.
    #[error("{message}")]
    Api { message: String },
}

impl ApiError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// True only for a rejected credential. Access denial is a regular API error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth)
    }
}

/// A refresh cycle failed and no snapshot was published.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("Error communicating with API: {0}")]
    UpdateFailed(String),
}

impl From<ApiError> for SyncError {
    fn from(err: ApiError) -> Self {
        Self::UpdateFailed(err.to_string())
    }
}

/// Setup failures, each mapping to the error code the host displays.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Invalid API key")]
    InvalidAuth,

    #[error("Cannot connect: {0}")]
    CannotConnect(String),

    /// The first refresh failed, so there is no data to present.
    #[error("Initial refresh failed: {0}")]
    NotReady(#[from] SyncError),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl SetupError {
    /// Error code understood by the host's setup form.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAuth => "invalid_auth",
            Self::CannotConnect(_) | Self::NotReady(_) => "cannot_connect",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<ApiError> for SetupError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth => Self::InvalidAuth,
            other => Self::CannotConnect(other.to_string()),
        }
    }
}

//! Driven port for reading the viewer's current position.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::projection::GeoPoint;

define_port_error! {
    /// Errors reported by a positioning backend.
    ///
    /// Codes follow the W3C geolocation `PositionError` numbering.
    pub enum PositionError {
        /// The viewer denied access to their location.
        PermissionDenied { message: String } = 1 =>
            "position permission denied: {message}",
        /// No position could be determined.
        Unavailable { message: String } = 2 =>
            "position unavailable: {message}",
        /// The backend gave up waiting for a fix.
        Timeout { message: String } = 3 =>
            "position request timed out: {message}",
    }
}

impl PositionError {
    /// Builds an error from a geolocation code and message.
    ///
    /// Codes outside the known set are reported as [`Self::Unavailable`].
    #[must_use]
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            1 => Self::permission_denied(message),
            3 => Self::timeout(message),
            _ => Self::unavailable(message),
        }
    }

    /// The backend-provided message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::PermissionDenied { message }
            | Self::Unavailable { message }
            | Self::Timeout { message } => message,
        }
    }
}

/// Port for one-shot position requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Requests the current position once.
    async fn current_position(&self) -> Result<GeoPoint, PositionError>;
}

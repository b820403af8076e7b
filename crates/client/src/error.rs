//! Unified error type for client operations.
//!
//! Every fallible SDK operation returns `Result<T, ClientError>`; callers
//! decide how to notify the user. Nothing here panics or retries.

use reqwest::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by SDK operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected client-side before any network call.
    #[error("{0}")]
    Validation(String),

    /// Operation requires an authenticated session.
    #[error("Please login first")]
    AuthRequired,

    /// The gateway rejected our token mid-session; the local session has
    /// already been reset when this is returned.
    #[error("Session expired, please login again")]
    SessionExpired,

    /// The gateway answered with a non-success status.
    #[error("{message}")]
    Gateway {
        /// HTTP status the gateway returned.
        status: StatusCode,
        /// Message from the gateway's `detail` payload, or the operation's
        /// fallback text when the payload lacks one.
        message: String,
    },

    /// The request could not complete (DNS, connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The gateway answered 2xx but the body did not parse.
    #[error("Invalid gateway response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing the durable session entries failed.
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// Whether this error means the caller should send the user to login.
    #[must_use]
    pub const fn needs_login(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::SessionExpired)
    }

    /// Status code of the underlying gateway response, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_gateway_message_verbatim() {
        let err = ClientError::Gateway {
            status: StatusCode::BAD_REQUEST,
            message: "Not enough stock available".to_string(),
        };
        assert_eq!(err.to_string(), "Not enough stock available");
    }

    #[test]
    fn test_needs_login() {
        assert!(ClientError::AuthRequired.needs_login());
        assert!(ClientError::SessionExpired.needs_login());
        assert!(!ClientError::Validation("nope".to_string()).needs_login());
    }

    #[test]
    fn test_status_accessor() {
        let err = ClientError::Gateway {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid email or password".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(ClientError::AuthRequired.status(), None);
    }
}

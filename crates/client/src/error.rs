//! Unified error handling for the storefront client.
//!
//! Three families of failure, per the client's contract: network failures
//! (service unreachable, non-success status, undecodable body) are reported
//! and never retried automatically; validation failures are caught before any
//! network call; auth failures carry the service's message verbatim where the
//! response body provides one. Every failure leaves prior valid state
//! untouched.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::ApiError;
use crate::cart::PositionOutOfRange;
use crate::config::ConfigError;
use crate::session::StorageError;

/// Client-level error type for the storefront.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backing service was unreachable or misbehaved.
    #[error("network failure: {0}")]
    Network(#[from] ApiError),

    /// Credentials were rejected by the service.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The operation requires a signed-in session.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The operation requires the admin capability.
    #[error("admin capability required")]
    AdminRequired,

    /// Checkout was attempted with nothing in the cart.
    #[error("empty cart")]
    EmptyCart,

    /// A cart position did not exist.
    #[error(transparent)]
    OutOfRange(#[from] PositionOutOfRange),

    /// The durable session store could not be written.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration was missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Whether the caller should prompt the user to sign in.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::AuthenticationRequired)
    }

    /// Map an auth endpoint failure: 400/401 responses carry the service's
    /// rejection message and become [`ClientError::Auth`]; everything else
    /// is a network failure.
    pub(crate) fn from_auth_failure(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message }
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST =>
            {
                let message = if message.trim().is_empty() {
                    "invalid credentials".to_string()
                } else {
                    message
                };
                Self::Auth(message)
            }
            other => Self::Network(other),
        }
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

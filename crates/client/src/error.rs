//! Unified application error type.
//!
//! Aggregates the per-layer errors so a frontend can hold one error type
//! and turn any failure into a displayable message. Every failure path
//! returns control to the caller; nothing here is fatal to the process.

use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error for storefront frontends.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A remote service call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Local I/O failed (e.g., opening the data directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// User-supplied input failed validation before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<shopfront_core::EmailError> for AppError {
    fn from(e: shopfront_core::EmailError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl AppError {
    /// Message suitable for direct display to the user.
    ///
    /// Service-supplied messages are surfaced verbatim; everything else
    /// gets a terse description rather than internals.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Config(e) => e.to_string(),
            Self::Api(e) => e
                .service_message()
                .map_or_else(|| e.to_string(), std::borrow::ToOwned::to_owned),
            Self::Checkout(e) => e.display_message(),
            Self::Io(_) => "Local storage is unavailable.".to_owned(),
            Self::InvalidInput(message) => message.clone(),
        }
    }
}

/// Result type alias for [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_is_surfaced_verbatim() {
        let err = AppError::Api(ApiError::Service {
            status: 401,
            message: Some("Invalid username or password".to_owned()),
        });
        assert_eq!(err.display_message(), "Invalid username or password");
    }

    #[test]
    fn test_checkout_errors_delegate() {
        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.display_message(), "Your cart is empty.");
    }

    #[test]
    fn test_io_errors_stay_generic() {
        let err = AppError::Io(std::io::Error::other("disk on fire"));
        assert_eq!(err.display_message(), "Local storage is unavailable.");
    }
}

//! # Error Types
//!
//! Typed error handling for the pagseguro-rs gateway client.
//! All fallible operations return `Result<T, Error>`.
//!
//! The original gateway bindings mixed `false` returns and exceptions for the
//! same failure class; here every failure travels through this one enum.

use thiserror::Error;

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or missing caller input (credentials, reference, cart, customer shape)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors (missing environment variables, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The gateway rejected the request credentials
    #[error("Gateway rejected the request: unauthorized")]
    Unauthorized,

    /// Network/HTTP error communicating with the gateway (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// The gateway answered with a body this client cannot decode
    #[error("Malformed gateway response: {0}")]
    Response(String),

    /// Transaction status code outside the documented 0-7 table
    #[error("Unknown transaction status code: {code}")]
    StatusOutOfRange { code: u8 },

    /// Checkout form rendering failed
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Returns true if this error is retryable by the caller
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// Returns true if the failure originated from caller input
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Configuration(_) | Error::StatusOutOfRange { .. }
        )
    }
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

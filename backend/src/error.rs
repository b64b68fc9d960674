//! Error types for the Tokenforge pinning proxy.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ConfigError`] - missing or malformed process configuration
//! - [`PinError`] - failures talking to the pinning provider
//! - [`ServerError`] - top-level HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors reading process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither a JWT nor a key/secret pair is present.
    #[error("Pinata API credentials not configured on server")]
    MissingCredentials,

    /// A key was provided without its secret (or vice versa).
    #[error("Incomplete Pinata key pair: {0} is missing")]
    IncompleteKeyPair(&'static str),
}

// =============================================================================
// Pinning Errors
// =============================================================================

/// Errors from the pinning provider client.
#[derive(Debug, Error)]
pub enum PinError {
    /// HTTP transport failure.
    #[error("Pinning request failed: {0}")]
    Transport(String),

    /// Non-2xx response from the provider.
    #[error("Pinning provider rejected the request ({status}): {details}")]
    Rejected { status: u16, details: String },

    /// Response body did not match the expected shape.
    #[error("Invalid pinning provider response: {0}")]
    InvalidResponse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for PinError {
    fn from(err: reqwest::Error) -> Self {
        PinError::Transport(err.to_string())
    }
}

// =============================================================================
// Server Errors (top-level)
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pinning error.
    #[error("Pin error: {0}")]
    Pin(#[from] PinError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for pinning operations.
pub type PinResult<T> = Result<T, PinError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ConfigError -> ServerError
        let config_err = ConfigError::MissingCredentials;
        let server_err: ServerError = config_err.into();
        assert!(server_err.to_string().contains("credentials"));

        // PinError -> ServerError
        let pin_err = PinError::Rejected {
            status: 401,
            details: "invalid key".into(),
        };
        let server_err: ServerError = pin_err.into();
        assert!(server_err.to_string().contains("401"));
        assert!(server_err.to_string().contains("invalid key"));
    }

    #[test]
    fn test_incomplete_key_pair_format() {
        let err = ConfigError::IncompleteKeyPair("PINATA_SECRET_API_KEY");
        assert!(err.to_string().contains("PINATA_SECRET_API_KEY"));
    }
}

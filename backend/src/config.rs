//! Server configuration.
//!
//! Credentials are read from the environment (a `.env` file is loaded by the
//! CLI entry point). Pinata accepts either a JWT or an API key/secret pair;
//! the JWT wins when both are present, matching the provider's own
//! recommendation.
//!
//! | Variable                | Meaning                               |
//! |-------------------------|---------------------------------------|
//! | `PINATA_JWT`            | Bearer token (preferred)              |
//! | `PINATA_API_KEY`        | Legacy API key                        |
//! | `PINATA_SECRET_API_KEY` | Legacy API secret                     |
//! | `PINATA_GATEWAY`        | Gateway host for dereferencing pins   |

use crate::error::{ConfigError, ConfigResult};

/// Default public gateway used to dereference pinned content.
pub const DEFAULT_GATEWAY: &str = "gateway.pinata.cloud";

/// How the server authenticates against Pinata.
#[derive(Debug, Clone, PartialEq)]
pub enum PinataCredentials {
    /// Bearer JWT.
    Jwt(String),
    /// API key + secret pair.
    KeyPair { key: String, secret: String },
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: PinataCredentials,
    /// Gateway host (no scheme), e.g. `gateway.pinata.cloud`.
    pub gateway: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Returns [`ConfigError::MissingCredentials`] when no usable credential
    /// set is present. Handlers surface that as a fixed 500 before any
    /// upstream call.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_values(
            std::env::var("PINATA_JWT").ok(),
            std::env::var("PINATA_API_KEY").ok(),
            std::env::var("PINATA_SECRET_API_KEY").ok(),
            std::env::var("PINATA_GATEWAY").ok(),
        )
    }

    /// Build configuration from raw values (separated from `from_env` so
    /// tests never touch the process environment).
    pub fn from_values(
        jwt: Option<String>,
        api_key: Option<String>,
        secret: Option<String>,
        gateway: Option<String>,
    ) -> ConfigResult<Self> {
        let credentials = match (non_empty(jwt), non_empty(api_key), non_empty(secret)) {
            (Some(jwt), _, _) => PinataCredentials::Jwt(jwt),
            (None, Some(key), Some(secret)) => PinataCredentials::KeyPair { key, secret },
            (None, Some(_), None) => {
                return Err(ConfigError::IncompleteKeyPair("PINATA_SECRET_API_KEY"))
            }
            (None, None, Some(_)) => return Err(ConfigError::IncompleteKeyPair("PINATA_API_KEY")),
            (None, None, None) => return Err(ConfigError::MissingCredentials),
        };

        Ok(Config {
            credentials,
            gateway: non_empty(gateway).unwrap_or_else(|| DEFAULT_GATEWAY.to_string()),
        })
    }

    /// Gateway URL for a content address.
    pub fn gateway_url(&self, ipfs_hash: &str) -> String {
        format!("https://{}/ipfs/{}", self.gateway, ipfs_hash)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_preferred_over_key_pair() {
        let config = Config::from_values(
            Some("jwt-token".into()),
            Some("key".into()),
            Some("secret".into()),
            None,
        )
        .unwrap();
        assert_eq!(config.credentials, PinataCredentials::Jwt("jwt-token".into()));
    }

    #[test]
    fn test_key_pair_fallback() {
        let config =
            Config::from_values(None, Some("key".into()), Some("secret".into()), None).unwrap();
        assert_eq!(
            config.credentials,
            PinataCredentials::KeyPair {
                key: "key".into(),
                secret: "secret".into()
            }
        );
    }

    #[test]
    fn test_missing_credentials() {
        let err = Config::from_values(None, None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials));
    }

    #[test]
    fn test_incomplete_key_pair() {
        let err = Config::from_values(None, Some("key".into()), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteKeyPair(_)));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let err = Config::from_values(Some("  ".into()), Some("".into()), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials));
    }

    #[test]
    fn test_gateway_url() {
        let config = Config::from_values(Some("jwt".into()), None, None, None).unwrap();
        assert_eq!(
            config.gateway_url("QmHash"),
            "https://gateway.pinata.cloud/ipfs/QmHash"
        );

        let config = Config::from_values(
            Some("jwt".into()),
            None,
            None,
            Some("my-gateway.example.com".into()),
        )
        .unwrap();
        assert_eq!(
            config.gateway_url("QmHash"),
            "https://my-gateway.example.com/ipfs/QmHash"
        );
    }
}

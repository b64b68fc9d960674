//! Pinata pinning client.
//!
//! Thin wrapper over the Pinata REST API used by the proxy endpoints:
//!
//! - `pinFileToIPFS` - pin a binary blob (token logo)
//! - `pinJSONToIPFS` - pin a JSON document (token metadata)
//! - `testAuthentication` - credential self-test
//!
//! Calls are not idempotent: pinning the same content twice creates two
//! pins. There is no retry; a failed call surfaces as [`PinError`] and the
//! caller decides what to do (the proxy just forwards the failure).

use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::PinataCredentials;
use crate::error::{PinError, PinResult};

/// Pinata API base URL.
const API_BASE: &str = "https://api.pinata.cloud";

/// Successful pin response from Pinata.
#[derive(Debug, Clone, Deserialize)]
pub struct PinReceipt {
    /// Content address of the pinned blob.
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,

    /// Pinned size in bytes.
    #[serde(rename = "PinSize", default)]
    pub pin_size: u64,
}

/// Pinata API client.
pub struct PinataClient {
    http: reqwest::Client,
    credentials: PinataCredentials,
}

impl PinataClient {
    pub fn new(credentials: PinataCredentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    /// Pin a binary file. `name` becomes the pin's display name.
    pub async fn pin_file(&self, bytes: Vec<u8>, name: &str, mime: &str) -> PinResult<PinReceipt> {
        let part = Part::bytes(bytes)
            .file_name(name.to_string())
            .mime_str(mime)
            .map_err(|e| PinError::Transport(format!("invalid mime type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text(
                "pinataMetadata",
                serde_json::to_string(&json!({ "name": name }))?,
            )
            .text(
                "pinataOptions",
                serde_json::to_string(&json!({ "cidVersion": 0 }))?,
            );

        let request = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", API_BASE))
            .multipart(form);

        self.execute(request).await
    }

    /// Pin a JSON document itself (not a file wrapper around it).
    pub async fn pin_json(&self, content: &Value, name: &str) -> PinResult<PinReceipt> {
        let body = json!({
            "pinataContent": content,
            "pinataMetadata": { "name": name },
            "pinataOptions": { "cidVersion": 0 },
        });

        let request = self
            .http
            .post(format!("{}/pinning/pinJSONToIPFS", API_BASE))
            .json(&body);

        self.execute(request).await
    }

    /// Verify the configured credentials against Pinata.
    pub async fn test_authentication(&self) -> PinResult<()> {
        let request = self
            .http
            .get(format!("{}/data/testAuthentication", API_BASE));

        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(PinError::Rejected {
                status: status.as_u16(),
                details: extract_details(&body),
            });
        }
        Ok(())
    }

    async fn execute(&self, request: RequestBuilder) -> PinResult<PinReceipt> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(PinError::Rejected {
                status: status.as_u16(),
                details: extract_details(&body),
            });
        }

        response
            .json::<PinReceipt>()
            .await
            .map_err(|e| PinError::InvalidResponse(e.to_string()))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            PinataCredentials::Jwt(jwt) => request.bearer_auth(jwt),
            PinataCredentials::KeyPair { key, secret } => request
                .header("pinata_api_key", key)
                .header("pinata_secret_api_key", secret),
        }
    }
}

/// Best-effort extraction of a human-readable detail string from a Pinata
/// error body. The API is inconsistent: errors arrive as a plain string, as
/// `{ "error": "..." }`, or as `{ "error": { "reason": ..., "details": ... } }`.
pub fn extract_details(body: &Value) -> String {
    if let Some(error) = body.get("error") {
        if let Some(s) = error.as_str() {
            return s.to_string();
        }
        for key in ["details", "reason", "message"] {
            if let Some(s) = error.get(key).and_then(Value::as_str) {
                return s.to_string();
            }
        }
    }
    if let Some(s) = body.get("message").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(s) = body.as_str() {
        return s.to_string();
    }
    "Unknown error from pinning provider".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_deserialization() {
        let json = r#"{
            "IpfsHash": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
            "PinSize": 1234,
            "Timestamp": "2025-01-01T00:00:00.000Z"
        }"#;

        let receipt: PinReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(
            receipt.ipfs_hash,
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
        assert_eq!(receipt.pin_size, 1234);
    }

    #[test]
    fn test_extract_details_string_error() {
        let body = json!({ "error": "Invalid API key" });
        assert_eq!(extract_details(&body), "Invalid API key");
    }

    #[test]
    fn test_extract_details_nested_error() {
        let body = json!({ "error": { "reason": "KEY_REVOKED", "details": "Key has been revoked" } });
        assert_eq!(extract_details(&body), "Key has been revoked");

        let body = json!({ "error": { "reason": "KEY_REVOKED" } });
        assert_eq!(extract_details(&body), "KEY_REVOKED");
    }

    #[test]
    fn test_extract_details_fallbacks() {
        let body = json!({ "message": "rate limited" });
        assert_eq!(extract_details(&body), "rate limited");

        assert_eq!(
            extract_details(&Value::Null),
            "Unknown error from pinning provider"
        );
    }
}

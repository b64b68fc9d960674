//! Content publishing service.
//!
//! Talks to the backend pin endpoints, which hold the Pinata credentials.
//! Each call pins independently - repeating a call creates a new pin, and a
//! failed call is never retried here; the pipeline aborts instead.

use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::error::PublishError;
use crate::metadata::TokenMetadata;

/// Anything that can publish a blob and hand back its content address.
///
/// The pipeline only sees this trait, so tests substitute a fake.
#[allow(async_fn_in_trait)]
pub trait ContentPublisher {
    /// Publish a binary blob (the token logo). Returns the content address.
    async fn publish_file(
        &self,
        bytes: Vec<u8>,
        name: &str,
        mime: &str,
    ) -> Result<String, PublishError>;

    /// Publish the metadata document itself. Returns the content address.
    async fn publish_json(&self, document: &TokenMetadata) -> Result<String, PublishError>;
}

/// Successful pin response from the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinResponse {
    pub ipfs_hash: String,
}

/// Publisher backed by the tokenforge backend.
pub struct BackendPublisher {
    backend_url: String,
}

impl BackendPublisher {
    pub fn new(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.to_string(),
        }
    }

    async fn parse_response(response: gloo_net::http::Response) -> Result<String, PublishError> {
        let status = response.status();

        if !response.ok() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(PublishError::Rejected {
                status,
                details: extract_details(&body),
            });
        }

        response
            .json::<PinResponse>()
            .await
            .map(|r| r.ipfs_hash)
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))
    }
}

impl ContentPublisher for BackendPublisher {
    async fn publish_file(
        &self,
        bytes: Vec<u8>,
        name: &str,
        mime: &str,
    ) -> Result<String, PublishError> {
        // Wrap the bytes in a Blob so FormData carries a proper file part.
        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::of1(&array);
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| PublishError::Transport(format_js_error(&e)))?;

        let form_data = FormData::new()
            .map_err(|e| PublishError::Transport(format_js_error(&e)))?;
        form_data
            .append_with_blob_and_filename("file", &blob, name)
            .map_err(|e| PublishError::Transport(format_js_error(&e)))?;

        let url = format!("{}/api/pin", self.backend_url);
        let response = Request::post(&url)
            .body(form_data)
            .map_err(|e| PublishError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        Self::parse_response(response).await
    }

    async fn publish_json(&self, document: &TokenMetadata) -> Result<String, PublishError> {
        let url = format!("{}/api/pin/json", self.backend_url);
        let response = Request::post(&url)
            .json(document)
            .map_err(|e| PublishError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        Self::parse_response(response).await
    }
}

/// Best-effort extraction of the backend's error detail, preferring
/// `details` over `error` over a generic message.
pub fn extract_details(body: &Value) -> String {
    for key in ["details", "error"] {
        if let Some(s) = body.get(key).and_then(Value::as_str) {
            return s.to_string();
        }
    }
    "Upload failed with no detail from server".to_string()
}

fn format_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pin_response_deserialization() {
        let response: PinResponse =
            serde_json::from_str(r#"{"ipfsHash":"QmHash"}"#).unwrap();
        assert_eq!(response.ipfs_hash, "QmHash");
    }

    #[test]
    fn test_extract_details_prefers_details_field() {
        let body = json!({ "error": "Failed to pin file to IPFS", "details": "KEY_REVOKED" });
        assert_eq!(extract_details(&body), "KEY_REVOKED");

        let body = json!({ "error": "Failed to pin file to IPFS" });
        assert_eq!(extract_details(&body), "Failed to pin file to IPFS");

        assert_eq!(
            extract_details(&Value::Null),
            "Upload failed with no detail from server"
        );
    }
}

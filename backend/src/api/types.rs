//! REST API types for the pinning proxy.
//!
//! The response shapes mirror what the frontend consumes: a bare
//! `{ "ipfsHash": ... }` on success and `{ "error", "details" }` on failure.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Response sent to the frontend after a successful pin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinResponse {
    /// Content address of the pinned blob or document.
    pub ipfs_hash: String,
}

/// Create an error response body.
///
/// `error` is the stable summary, `details` the best-effort upstream detail.
pub fn error_response(error: &str, details: &str) -> Value {
    json!({
        "error": error,
        "details": details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_response_serialization() {
        let response = PinResponse {
            ipfs_hash: "QmHash".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, json!({ "ipfsHash": "QmHash" }));
    }

    #[test]
    fn test_error_response_shape() {
        let body = error_response("Failed to pin", "upstream timeout");
        assert_eq!(body["error"], "Failed to pin");
        assert_eq!(body["details"], "upstream timeout");
    }
}

//! HTTP server for the pinning proxy.
//!
//! The server keeps the Pinata credentials on the backend so the browser
//! never sees them. When no credentials are configured the pin endpoints
//! answer a fixed 500 *before* any upstream call is attempted.
//!
//! # API Endpoints
//!
//! | Method | Path            | Description                        |
//! |--------|-----------------|------------------------------------|
//! | GET    | `/health`       | Health check                       |
//! | POST   | `/api/pin`      | Pin a binary file (multipart)      |
//! | POST   | `/api/pin/json` | Pin a JSON document                |

use axum::{
    extract::{Multipart, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;

use super::types::{error_response, PinResponse};
use crate::config::Config;
use crate::error::ConfigError;
use crate::pinata::PinataClient;

/// Shared server state.
///
/// `client` is `None` when credentials are missing; the handlers then return
/// the fixed configuration-error response.
#[derive(Clone)]
pub struct AppState {
    client: Option<Arc<PinataClient>>,
}

impl AppState {
    pub fn new(config: Option<&Config>) -> Self {
        Self {
            client: config.map(|c| Arc::new(PinataClient::new(c.credentials.clone()))),
        }
    }
}

/// Build the router (separate from `start_server` so tests can drive it
/// without binding a socket).
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/pin", post(pin_file))
        .route("/api/pin/json", post(pin_json))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server.
pub async fn start_server(
    port: u16,
    config: Option<Config>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config.as_ref());

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Tokenforge server running on http://localhost:{}", port);
    println!("   POST /api/pin      - Pin a file (token logo)");
    println!("   POST /api/pin/json - Pin a JSON document (token metadata)");
    println!("   GET  /health       - Health check");
    println!();
    if config.is_none() {
        println!("⚠️  No Pinata credentials configured - pin endpoints will answer 500");
    }
    println!("📝 Transaction building and submission happen in the frontend");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tokenforge",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "pin": "POST /api/pin",
            "pinJson": "POST /api/pin/json"
        }
    }))
}

/// The fixed response for missing server credentials.
fn configuration_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_response(
            &ConfigError::MissingCredentials.to_string(),
            "Set PINATA_JWT or PINATA_API_KEY/PINATA_SECRET_API_KEY",
        )),
    )
}

/// Pin a binary file uploaded as the multipart field `file`.
async fn pin_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PinResponse>, (StatusCode, Json<Value>)> {
    let Some(client) = state.client else {
        return Err(configuration_error());
    };

    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut mime: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(error_response("Multipart error", &e.to_string())),
        )
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            file_name = field.file_name().map(|s| s.to_string());
            mime = field.content_type().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        (
                            StatusCode::BAD_REQUEST,
                            Json(error_response("Read error", &e.to_string())),
                        )
                    })?
                    .to_vec(),
            );
        }
    }

    let bytes = file_data.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(error_response("No file provided", "expected multipart field 'file'")),
        )
    })?;

    let name = file_name.unwrap_or_else(|| "token-logo".to_string());
    let mime = mime.unwrap_or_else(|| "application/octet-stream".to_string());

    println!("📌 Pinning file: {} ({} bytes)", name, bytes.len());

    let receipt = client.pin_file(bytes, &name, &mime).await.map_err(|e| {
        eprintln!("❌ Pin error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_response("Failed to pin file to IPFS", &e.to_string())),
        )
    })?;

    println!("   ✅ Pinned: {}", receipt.ipfs_hash);

    Ok(Json(PinResponse {
        ipfs_hash: receipt.ipfs_hash,
    }))
}

/// Pin a JSON document (the token metadata) as-is.
async fn pin_json(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<PinResponse>, (StatusCode, Json<Value>)> {
    let Some(client) = state.client else {
        return Err(configuration_error());
    };

    if !body.is_object() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(error_response("Invalid JSON body", "expected an object")),
        ));
    }

    // Name the pin after the token it describes.
    let pin_name = format!(
        "{}-Metadata.json",
        body.get("name").and_then(Value::as_str).unwrap_or("Token")
    );

    println!("📌 Pinning JSON document: {}", pin_name);

    let receipt = client.pin_json(&body, &pin_name).await.map_err(|e| {
        eprintln!("❌ Pin error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_response("Failed to pin JSON to IPFS", &e.to_string())),
        )
    })?;

    println!("   ✅ Pinned: {}", receipt.ipfs_hash);

    Ok(Json(PinResponse {
        ipfs_hash: receipt.ipfs_hash,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(AppState::new(None));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "tokenforge");
    }

    #[tokio::test]
    async fn test_pin_json_without_credentials_is_fixed_500() {
        let app = router(AppState::new(None));
        let response = app
            .oneshot(
                Request::post("/api/pin/json")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Foo"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("credentials not configured"));
    }

    #[tokio::test]
    async fn test_pin_file_without_file_field_is_400() {
        let config = Config::from_values(Some("test-jwt".into()), None, None, None).unwrap();
        let app = router(AppState::new(Some(&config)));

        let body = concat!(
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"other\"\r\n\r\n",
            "value\r\n",
            "--XBOUND--\r\n",
        );
        let response = app
            .oneshot(
                Request::post("/api/pin")
                    .header(
                        header::CONTENT_TYPE,
                        "multipart/form-data; boundary=XBOUND",
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No file provided");
    }

    #[tokio::test]
    async fn test_pin_file_without_credentials_is_fixed_500() {
        // Credentials are checked before the multipart body is touched,
        // so an empty body is fine here.
        let app = router(AppState::new(None));
        let response = app
            .oneshot(
                Request::post("/api/pin")
                    .header(
                        header::CONTENT_TYPE,
                        "multipart/form-data; boundary=xxxx",
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("credentials not configured"));
    }
}

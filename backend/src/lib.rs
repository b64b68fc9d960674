//! # Tokenforge backend - pinning proxy for the SPL token minter
//!
//! The backend's only job is to hold the Pinata credentials and forward pin
//! requests from the browser. Everything else (metadata composition,
//! transaction building, simulation, submission) happens in the frontend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │   Browser   │────▶│  Pin proxy   │────▶│   Pinata    │
//! │ (logo/JSON) │     │ (axum + env) │     │ (pinning)   │
//! └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Credential and gateway configuration
//! - [`pinata`] - Pinata REST client
//! - [`api`] - HTTP API server

pub mod api;
pub mod config;
pub mod error;
pub mod pinata;

pub use api::{router, start_server, AppState};
pub use config::{Config, PinataCredentials};
pub use error::{ConfigError, PinError, ServerError};
pub use pinata::{PinReceipt, PinataClient};

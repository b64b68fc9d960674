//! HTTP API for the pinning proxy.

pub mod server;
pub mod types;

pub use server::{router, start_server, AppState};
pub use types::{error_response, PinResponse};

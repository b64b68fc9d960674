//! Application configuration.
//!
//! Centralized configuration for the Tokenforge frontend.
//! In development, these are hardcoded. In production, they could be
//! loaded from environment or a config file.

/// Backend API base URL.
///
/// The tokenforge backend holding the pinning credentials.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Solana JSON-RPC endpoint.
pub const SOLANA_RPC_URL: &str = "https://api.devnet.solana.com";

/// Gateway host used to dereference pinned content.
pub const IPFS_GATEWAY: &str = "gateway.pinata.cloud";

/// Application name for wallet connection.
///
/// Displayed in wallet extension popups.
pub const APP_NAME: &str = "Tokenforge";

/// Decimal precision for every minted token.
pub const TOKEN_DECIMALS: u8 = 9;

/// Maximum logo size for upload (in bytes).
///
/// 2 MB limit.
pub const MAX_LOGO_SIZE: usize = 2 * 1024 * 1024;

/// Interval between confirmation polls, in milliseconds.
pub const CONFIRM_POLL_INTERVAL_MS: u32 = 2_000;

/// Maximum number of confirmation polls before giving up.
///
/// 30 polls at 2s each bounds the wait at one minute.
pub const CONFIRM_MAX_POLLS: u32 = 30;

/// Gateway URL for a content address.
pub fn gateway_url(ipfs_hash: &str) -> String {
    format!("https://{}/ipfs/{}", IPFS_GATEWAY, ipfs_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_url() {
        assert_eq!(
            gateway_url("QmHash"),
            "https://gateway.pinata.cloud/ipfs/QmHash"
        );
    }
}

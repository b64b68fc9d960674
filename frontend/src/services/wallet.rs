//! Wrapper for Phantom and other `window.solana` compatible wallet
//! extensions.
//!
//! The extension owns the keys: the frontend hands it a serialized
//! transaction and gets back a signature. The mint keypair's signature is
//! applied before the handoff; the wallet only adds the fee payer's.

use std::str::FromStr;

use solana_sdk::{pubkey::Pubkey, transaction::Transaction};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::WalletError;
use crate::services::ledger::encode_transaction;
use crate::types::WalletInfo;

/// Whatever signs and submits the final transaction.
#[allow(async_fn_in_trait)]
pub trait TransactionSigner {
    /// Fee payer's public key, when a wallet is connected.
    fn pubkey(&self) -> Option<Pubkey>;

    /// Sign as fee payer and submit. Returns the transaction signature.
    async fn sign_and_send(&self, transaction: &Transaction) -> Result<String, WalletError>;
}

/// Rust wrapper for the injected wallet provider.
pub struct SolanaWallet;

impl SolanaWallet {
    /// Check if a compatible extension is injected.
    pub fn is_available() -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };

        let has_provider = js_sys::Reflect::get(&window, &JsValue::from_str("solana"))
            .map(|v| !v.is_null() && !v.is_undefined())
            .unwrap_or(false);

        if has_provider {
            log::info!("✅ Solana wallet extension detected");
        } else {
            log::warn!("⚠️  No Solana wallet extension found");
        }

        has_provider
    }

    /// Connect the wallet and return the selected account.
    pub async fn connect() -> Result<WalletInfo, WalletError> {
        if !Self::is_available() {
            return Err(WalletError::NotAvailable);
        }

        log::info!("🔌 Connecting to wallet...");

        let promise = connect_wallet();
        let result = JsFuture::from(promise)
            .await
            .map_err(|e| WalletError::Rejected(js_error_message(&e)))?;

        let address = js_sys::Reflect::get(&result, &JsValue::from_str("address"))
            .map_err(|e| WalletError::Interop(js_error_message(&e)))?
            .as_string()
            .ok_or_else(|| WalletError::Interop("address is not a string".to_string()))?;

        log::info!("✅ Connected to wallet: {}", address);

        Ok(WalletInfo { address })
    }
}

/// Signer backed by the connected extension.
pub struct ExtensionSigner {
    address: Pubkey,
}

impl ExtensionSigner {
    pub fn new(address: &str) -> Result<Self, WalletError> {
        let address = Pubkey::from_str(address)
            .map_err(|_| WalletError::Interop(format!("invalid wallet address: {}", address)))?;
        Ok(Self { address })
    }
}

impl TransactionSigner for ExtensionSigner {
    fn pubkey(&self) -> Option<Pubkey> {
        Some(self.address)
    }

    async fn sign_and_send(&self, transaction: &Transaction) -> Result<String, WalletError> {
        let encoded = encode_transaction(transaction)
            .map_err(|e| WalletError::Interop(e.to_string()))?;

        log::info!("📤 Handing transaction to wallet for signing...");

        let promise = sign_and_send_transaction(&encoded);
        let result = JsFuture::from(promise)
            .await
            .map_err(|e| WalletError::Rejected(js_error_message(&e)))?;

        result
            .as_string()
            .ok_or_else(|| WalletError::Interop("signature is not a string".to_string()))
    }
}

/// Pull a readable message out of a JS error value.
fn js_error_message(value: &JsValue) -> String {
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Unknown wallet error".to_string())
}

/// Import of the JavaScript bridge in `src/js/wallet.js`.
#[wasm_bindgen(module = "/src/js/wallet.js")]
extern "C" {
    #[wasm_bindgen(js_name = "connectWallet")]
    fn connect_wallet() -> js_sys::Promise;

    #[wasm_bindgen(js_name = "signAndSendTransaction")]
    fn sign_and_send_transaction(tx_base64: &str) -> js_sys::Promise;
}

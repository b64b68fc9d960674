//! Ledger RPC client.
//!
//! Plain JSON-RPC over HTTP against a Solana node:
//!
//! - `getMinimumBalanceForRentExemption` - rent for the mint account
//! - `getLatestBlockhash` - blockhash for the transaction
//! - `simulateTransaction` - mandatory pre-flight check
//! - `getSignatureStatuses` - bounded confirmation polling
//!
//! Submission itself goes through the wallet extension, not through this
//! client. Transactions cross the wire bincode-serialized and base64
//! encoded. All reads use the `confirmed` commitment level.

use base64::Engine;
use gloo_net::http::Request;
use serde_json::{json, Value};
use solana_sdk::{hash::Hash, transaction::Transaction};

use crate::config::{CONFIRM_MAX_POLLS, CONFIRM_POLL_INTERVAL_MS};
use crate::error::LedgerError;

/// Result of a transaction simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Stringified error, when the dry run failed.
    pub err: Option<String>,
    /// Program log lines from the dry run.
    pub logs: Vec<String>,
}

/// Where a polled signature currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SignatureStatus {
    /// Not yet seen by the node.
    Unknown,
    /// Seen but below the requested commitment.
    Pending,
    /// Reached `confirmed` (or better).
    Confirmed,
    /// Landed with an execution error.
    Failed(String),
}

/// The ledger operations the pipeline depends on.
#[allow(async_fn_in_trait)]
pub trait Ledger {
    /// Minimum balance making an account of `space` bytes rent-exempt.
    async fn minimum_rent(&self, space: usize) -> Result<u64, LedgerError>;

    /// Latest blockhash at `confirmed` commitment.
    async fn latest_blockhash(&self) -> Result<Hash, LedgerError>;

    /// Dry-run the transaction against current network state.
    async fn simulate(&self, transaction: &Transaction) -> Result<SimulationOutcome, LedgerError>;

    /// Await network finality for a submitted signature.
    ///
    /// Implementations must bound the wait and return
    /// [`LedgerError::ConfirmationTimeout`] on exhaustion.
    async fn confirm(&self, signature: &str) -> Result<(), LedgerError>;
}

/// JSON-RPC backed ledger client.
pub struct JsonRpcLedger {
    url: String,
}

impl JsonRpcLedger {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = Request::post(&self.url)
            .json(&payload)
            .map_err(|e| LedgerError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

        check_rpc_error(&body)?;
        Ok(body)
    }
}

impl Ledger for JsonRpcLedger {
    async fn minimum_rent(&self, space: usize) -> Result<u64, LedgerError> {
        let body = self
            .call("getMinimumBalanceForRentExemption", json!([space]))
            .await?;
        body["result"]
            .as_u64()
            .ok_or_else(|| LedgerError::InvalidResponse("missing rent balance".into()))
    }

    async fn latest_blockhash(&self) -> Result<Hash, LedgerError> {
        let body = self
            .call(
                "getLatestBlockhash",
                json!([{ "commitment": "confirmed" }]),
            )
            .await?;
        parse_blockhash(&body)
    }

    async fn simulate(&self, transaction: &Transaction) -> Result<SimulationOutcome, LedgerError> {
        let encoded = encode_transaction(transaction)?;
        let body = self
            .call(
                "simulateTransaction",
                json!([
                    encoded,
                    {
                        "encoding": "base64",
                        "sigVerify": false,
                        "commitment": "confirmed",
                    }
                ]),
            )
            .await?;
        Ok(parse_simulation(&body))
    }

    async fn confirm(&self, signature: &str) -> Result<(), LedgerError> {
        for _ in 0..CONFIRM_MAX_POLLS {
            let body = self
                .call(
                    "getSignatureStatuses",
                    json!([[signature], { "searchTransactionHistory": true }]),
                )
                .await?;

            match parse_signature_status(&body) {
                SignatureStatus::Confirmed => return Ok(()),
                SignatureStatus::Failed(err) => {
                    return Err(LedgerError::Rpc(format!("Transaction failed: {}", err)))
                }
                SignatureStatus::Unknown | SignatureStatus::Pending => {
                    gloo_timers::future::TimeoutFuture::new(CONFIRM_POLL_INTERVAL_MS).await;
                }
            }
        }

        Err(LedgerError::ConfirmationTimeout {
            attempts: CONFIRM_MAX_POLLS,
        })
    }
}

/// Serialize a transaction to the base64 wire encoding.
pub fn encode_transaction(transaction: &Transaction) -> Result<String, LedgerError> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| LedgerError::InvalidResponse(format!("serialize: {}", e)))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Surface a JSON-RPC `error` object as [`LedgerError::Rpc`].
pub fn check_rpc_error(body: &Value) -> Result<(), LedgerError> {
    if let Some(error) = body.get("error") {
        if !error.is_null() {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| error.to_string());
            return Err(LedgerError::Rpc(message));
        }
    }
    Ok(())
}

/// Extract the blockhash from a `getLatestBlockhash` response.
pub fn parse_blockhash(body: &Value) -> Result<Hash, LedgerError> {
    body["result"]["value"]["blockhash"]
        .as_str()
        .ok_or_else(|| LedgerError::InvalidResponse("missing blockhash".into()))?
        .parse()
        .map_err(|_| LedgerError::InvalidResponse("unparseable blockhash".into()))
}

/// Extract the dry-run outcome from a `simulateTransaction` response.
pub fn parse_simulation(body: &Value) -> SimulationOutcome {
    let value = &body["result"]["value"];

    let err = match &value["err"] {
        Value::Null => None,
        other => Some(other.to_string()),
    };

    let logs = value["logs"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    SimulationOutcome { err, logs }
}

/// Classify the first entry of a `getSignatureStatuses` response.
pub fn parse_signature_status(body: &Value) -> SignatureStatus {
    let status = &body["result"]["value"][0];

    if !status.is_object() {
        return SignatureStatus::Unknown;
    }

    if let Some(err) = status.get("err") {
        if !err.is_null() {
            return SignatureStatus::Failed(err.to_string());
        }
    }

    match status["confirmationStatus"].as_str() {
        Some("confirmed") | Some("finalized") => SignatureStatus::Confirmed,
        _ => SignatureStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{pubkey::Pubkey, system_instruction};

    #[test]
    fn test_check_rpc_error() {
        assert!(check_rpc_error(&json!({ "result": 42 })).is_ok());

        let err = check_rpc_error(&json!({
            "error": { "code": -32002, "message": "Blockhash not found" }
        }))
        .unwrap_err();
        assert_eq!(err, LedgerError::Rpc("Blockhash not found".into()));
    }

    #[test]
    fn test_parse_blockhash() {
        let body = json!({
            "result": { "value": { "blockhash": Hash::default().to_string() } }
        });
        assert_eq!(parse_blockhash(&body).unwrap(), Hash::default());

        assert!(parse_blockhash(&json!({ "result": {} })).is_err());
    }

    #[test]
    fn test_parse_simulation_success_and_failure() {
        let body = json!({
            "result": { "value": { "err": null, "logs": ["Program log: ok"] } }
        });
        let outcome = parse_simulation(&body);
        assert!(outcome.err.is_none());
        assert_eq!(outcome.logs, vec!["Program log: ok"]);

        let body = json!({
            "result": {
                "value": {
                    "err": { "InstructionError": [4, { "Custom": 1 }] },
                    "logs": ["Program log: insufficient funds"]
                }
            }
        });
        let outcome = parse_simulation(&body);
        assert!(outcome.err.as_deref().unwrap().contains("InstructionError"));
        assert_eq!(outcome.logs.len(), 1);
    }

    #[test]
    fn test_parse_signature_status() {
        let body = json!({ "result": { "value": [null] } });
        assert_eq!(parse_signature_status(&body), SignatureStatus::Unknown);

        let body = json!({
            "result": { "value": [{ "err": null, "confirmationStatus": "processed" }] }
        });
        assert_eq!(parse_signature_status(&body), SignatureStatus::Pending);

        let body = json!({
            "result": { "value": [{ "err": null, "confirmationStatus": "confirmed" }] }
        });
        assert_eq!(parse_signature_status(&body), SignatureStatus::Confirmed);

        let body = json!({
            "result": { "value": [{ "err": null, "confirmationStatus": "finalized" }] }
        });
        assert_eq!(parse_signature_status(&body), SignatureStatus::Confirmed);

        let body = json!({
            "result": { "value": [{ "err": { "InstructionError": [0, "Custom"] } }] }
        });
        assert!(matches!(
            parse_signature_status(&body),
            SignatureStatus::Failed(_)
        ));
    }

    #[test]
    fn test_encode_transaction_round_trips() {
        let payer = Pubkey::new_unique();
        let instruction = system_instruction::transfer(&payer, &Pubkey::new_unique(), 1);
        let tx = Transaction::new_with_payer(&[instruction], Some(&payer));

        let encoded = encode_transaction(&tx).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        let decoded: Transaction = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, tx);
    }
}

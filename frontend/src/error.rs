//! Error types for the mint pipeline.
//!
//! Each service has its own error enum; everything converts into
//! [`MintError`] at the pipeline boundary via `From`, so `?` works across
//! service boundaries and the UI only ever deals with one type. Failures are
//! never retried and never silently swallowed - every one becomes a banner.

use thiserror::Error;

// =============================================================================
// Service Errors
// =============================================================================

/// Errors from the content publisher (backend pin endpoints).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PublishError {
    /// HTTP transport failure.
    #[error("Upload request failed: {0}")]
    Transport(String),

    /// Non-2xx response; `details` carries the backend's best-effort
    /// explanation (including server-side configuration errors).
    #[error("Upload rejected ({status}): {details}")]
    Rejected { status: u16, details: String },

    /// Response body did not match the expected shape.
    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),
}

/// Errors building the mint transaction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuilderError {
    /// Supply is missing, not a number, zero, or overflows at 10^9 decimals.
    #[error("Invalid supply '{0}': expected a positive integer up to 18,446,744,073 tokens")]
    InvalidSupply(String),

    /// No connected wallet to pay for and own the mint.
    #[error("Wallet not connected")]
    NoSigner,

    /// An SPL instruction constructor rejected its inputs.
    #[error("Instruction error: {0}")]
    Instruction(String),
}

/// Errors from the ledger RPC client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// HTTP transport failure.
    #[error("RPC request failed: {0}")]
    Transport(String),

    /// JSON-RPC level error object.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Response body did not match the expected shape.
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    /// The network never reported the signature within the polling budget.
    #[error("Transaction was not confirmed after {attempts} polls")]
    ConfirmationTimeout { attempts: u32 },
}

/// Errors from the wallet extension.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WalletError {
    /// No compatible extension injected into the page.
    #[error("No Solana wallet extension found. Please install Phantom or a compatible wallet.")]
    NotAvailable,

    /// The user or the extension rejected the request.
    #[error("Wallet rejected the request: {0}")]
    Rejected(String),

    /// JS interop failure.
    #[error("Wallet interop error: {0}")]
    Interop(String),
}

// =============================================================================
// Pipeline Error (top-level taxonomy)
// =============================================================================

/// Top-level pipeline error.
///
/// One variant per failure class the user can observe. The pipeline
/// normalizes every caught service error into this type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MintError {
    /// Content publishing failed (image or metadata upload).
    #[error("{0}")]
    Publish(#[from] PublishError),

    /// The request could not be turned into a transaction.
    #[error("{0}")]
    Builder(#[from] BuilderError),

    /// An RPC call failed before or after submission.
    #[error("{0}")]
    Rpc(String),

    /// Pre-flight simulation reported an error; the transaction was never
    /// submitted.
    #[error("Transaction simulation failed: {message}")]
    Simulation {
        message: String,
        logs: Vec<String>,
    },

    /// Signing or sending through the wallet failed.
    #[error("{0}")]
    Submission(String),

    /// The network did not finalize the transaction within the polling
    /// budget. The transaction may still land later.
    #[error("Confirmation timed out after {attempts} polls; the transaction may still confirm")]
    ConfirmationTimeout { attempts: u32 },
}

impl From<LedgerError> for MintError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ConfirmationTimeout { attempts } => {
                MintError::ConfirmationTimeout { attempts }
            }
            other => MintError::Rpc(other.to_string()),
        }
    }
}

impl From<WalletError> for MintError {
    fn from(err: WalletError) -> Self {
        MintError::Submission(err.to_string())
    }
}

impl MintError {
    /// Human-readable banner text, preferring explicit detail over generic
    /// wording. Simulation failures append the diagnostic log lines.
    pub fn user_message(&self) -> String {
        match self {
            MintError::Simulation { message, logs } if !logs.is_empty() => {
                format!("{} | Logs: {}", message, logs.join("\n"))
            }
            other => other.to_string(),
        }
    }
}

/// Result type for pipeline operations.
pub type MintResult<T> = Result<T, MintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_normalization() {
        let err: MintError = LedgerError::ConfirmationTimeout { attempts: 30 }.into();
        assert!(matches!(err, MintError::ConfirmationTimeout { attempts: 30 }));

        let err: MintError = LedgerError::Rpc("blockhash not found".into()).into();
        assert!(matches!(err, MintError::Rpc(_)));
        assert!(err.user_message().contains("blockhash not found"));
    }

    #[test]
    fn test_publish_error_detail_preferred() {
        let err: MintError = PublishError::Rejected {
            status: 500,
            details: "Pinata API credentials not configured on server".into(),
        }
        .into();
        assert!(err.user_message().contains("credentials not configured"));
    }

    #[test]
    fn test_simulation_message_includes_logs() {
        let err = MintError::Simulation {
            message: "InstructionError(4, Custom(1))".into(),
            logs: vec!["Program log: insufficient funds".into()],
        };
        let msg = err.user_message();
        assert!(msg.contains("InstructionError"));
        assert!(msg.contains("insufficient funds"));
    }
}

//! Service layer: everything that talks to the outside world.
//!
//! | Service     | Talks to                  | Trait seam           |
//! |-------------|---------------------------|----------------------|
//! | `publisher` | Backend pin endpoints     | [`ContentPublisher`] |
//! | `ledger`    | Solana JSON-RPC node      | [`Ledger`]           |
//! | `wallet`    | Injected wallet extension | [`TransactionSigner`]|
//! | `pipeline`  | All of the above          | -                    |
//!
//! The pipeline composes the three seams; production wires the real
//! implementations, tests wire fakes.

pub mod ledger;
pub mod pipeline;
pub mod publisher;
pub mod wallet;

pub use ledger::{JsonRpcLedger, Ledger, SimulationOutcome};
pub use pipeline::MintPipeline;
pub use publisher::{BackendPublisher, ContentPublisher};
pub use wallet::{ExtensionSigner, SolanaWallet, TransactionSigner};

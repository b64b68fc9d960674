//! The submission pipeline.
//!
//! Drives one mint attempt end to end:
//!
//! ```text
//! Idle ─▶ UploadingImage ─▶ UploadingMetadata ─▶ Minting ─▶ Succeeded
//!   │        (skipped when no image)   │            │
//!   └────────────────┴────────────────┴──────▶ Failed (terminal)
//! ```
//!
//! Every stage gates the next; the first failure aborts the attempt. There
//! is no retry and no rollback: content pinned before the failure stays
//! pinned (and stays visible to the user), the mint keypair and instructions
//! are discarded, and a fresh submission restarts the whole pipeline.
//!
//! Within `Minting`: fetch rent and blockhash, build, sign with the mint
//! keypair, simulate, and only when the dry run is clean hand the
//! transaction to the wallet and poll for confirmation. At most one
//! simulate-then-submit cycle happens per attempt.

use solana_sdk::transaction::Transaction;

use crate::builder::{build_mint_plan, MINT_ACCOUNT_SPACE};
use crate::config::gateway_url;
use crate::error::{BuilderError, MintError, MintResult};
use crate::metadata::compose;
use crate::services::ledger::Ledger;
use crate::services::publisher::ContentPublisher;
use crate::services::wallet::TransactionSigner;
use crate::types::{MintPhase, MintReceipt, PipelineEvent, TokenRequest};

/// The orchestrator, generic over its collaborators so tests run against
/// fakes.
pub struct MintPipeline<P, L, S> {
    publisher: P,
    ledger: L,
    signer: S,
}

impl<P, L, S> MintPipeline<P, L, S>
where
    P: ContentPublisher,
    L: Ledger,
    S: TransactionSigner,
{
    pub fn new(publisher: P, ledger: L, signer: S) -> Self {
        Self {
            publisher,
            ledger,
            signer,
        }
    }

    /// Run one attempt. Progress and the terminal outcome are reported
    /// through `emit`; the result mirrors the terminal event.
    pub async fn run(
        &self,
        request: &TokenRequest,
        emit: impl Fn(PipelineEvent),
    ) -> MintResult<MintReceipt> {
        let result = self.execute(request, &emit).await;

        match &result {
            Ok(receipt) => emit(PipelineEvent::Phase(MintPhase::Succeeded(receipt.clone()))),
            Err(error) => emit(PipelineEvent::Phase(MintPhase::Failed(error.user_message()))),
        }

        result
    }

    async fn execute(
        &self,
        request: &TokenRequest,
        emit: &impl Fn(PipelineEvent),
    ) -> MintResult<MintReceipt> {
        let payer = self.signer.pubkey().ok_or(BuilderError::NoSigner)?;

        // Stage 1: image upload, skipped entirely when no logo was chosen.
        let image_url = match &request.image {
            Some(image) => {
                emit(PipelineEvent::Phase(MintPhase::UploadingImage));
                let hash = self
                    .publisher
                    .publish_file(image.bytes.clone(), &image.name, &image.mime)
                    .await?;
                let url = gateway_url(&hash);
                emit(PipelineEvent::ImagePublished(url.clone()));
                Some(url)
            }
            None => None,
        };

        // Stage 2: metadata document.
        emit(PipelineEvent::Phase(MintPhase::UploadingMetadata));
        let document = compose(request, image_url.as_deref());
        let hash = self.publisher.publish_json(&document).await?;
        let metadata_url = gateway_url(&hash);
        emit(PipelineEvent::MetadataPublished(metadata_url.clone()));

        // Stage 3: build, simulate, submit, confirm.
        emit(PipelineEvent::Phase(MintPhase::Minting));

        let rent = self.ledger.minimum_rent(MINT_ACCOUNT_SPACE).await?;
        let plan = build_mint_plan(&payer, request, &metadata_url, rent)?;
        let blockhash = self.ledger.latest_blockhash().await?;

        let mut transaction = Transaction::new_with_payer(&plan.instructions, Some(&payer));
        transaction.partial_sign(&[&plan.mint], blockhash);

        let simulation = self.ledger.simulate(&transaction).await?;
        if let Some(err) = simulation.err {
            // Never submit a transaction the dry run rejected.
            return Err(MintError::Simulation {
                message: err,
                logs: simulation.logs,
            });
        }

        let signature = self.signer.sign_and_send(&transaction).await?;
        self.ledger.confirm(&signature).await?;

        Ok(MintReceipt {
            signature,
            mint_address: plan.mint_address().to_string(),
        })
    }
}

//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Request Types** - the immutable token creation request
//! - **Pipeline Types** - submission pipeline phases and events
//! - **Wallet Types** - connected wallet info

use serde::{Deserialize, Serialize};

// =============================================================================
// Request Types
// =============================================================================

/// Optional social links attached to the token metadata.
///
/// Empty strings are treated as "not provided" and never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub website: String,
    pub twitter: String,
    pub telegram: String,
    pub discord: String,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.website.is_empty()
            && self.twitter.is_empty()
            && self.telegram.is_empty()
            && self.discord.is_empty()
    }
}

/// Display-only creator override.
///
/// Shown in the metadata document as an unverified creator; never checked
/// against the chain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreatorOverride {
    pub name: String,
    pub address: String,
}

impl CreatorOverride {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.address.is_empty()
    }
}

/// The token logo selected in the form.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    pub name: String,
    pub mime: String,
}

/// A complete token creation request.
///
/// Captured from the form when the user submits; immutable for the lifetime
/// of one pipeline attempt. `supply` stays a raw string here - the
/// transaction builder parses and validates it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenRequest {
    pub name: String,
    pub symbol: String,
    pub supply: String,
    pub description: String,
    pub image: Option<ImageAttachment>,
    pub links: SocialLinks,
    pub creator_override: Option<CreatorOverride>,
    pub revoke_update_authority: bool,
    pub revoke_freeze_authority: bool,
    pub revoke_mint_authority: bool,
}

// =============================================================================
// Pipeline Types
// =============================================================================

/// The single linear progress state of a submission attempt.
///
/// Transitions are strictly forward; `Failed` is terminal for the attempt
/// and only a fresh user-initiated submission re-enters from `Idle`.
#[derive(Clone, Debug, PartialEq)]
pub enum MintPhase {
    Idle,
    UploadingImage,
    UploadingMetadata,
    Minting,
    Succeeded(MintReceipt),
    Failed(String),
}

impl MintPhase {
    /// Whether a pipeline is currently in flight (submit control disabled).
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            MintPhase::UploadingImage | MintPhase::UploadingMetadata | MintPhase::Minting
        )
    }

    /// Short label for the progress indicator.
    pub fn label(&self) -> &'static str {
        match self {
            MintPhase::Idle => "Ready",
            MintPhase::UploadingImage => "Uploading image to IPFS...",
            MintPhase::UploadingMetadata => "Uploading metadata to IPFS...",
            MintPhase::Minting => "Minting token on Solana...",
            MintPhase::Succeeded(_) => "Token minted!",
            MintPhase::Failed(_) => "Failed",
        }
    }
}

/// Outcome of a successful mint.
#[derive(Clone, Debug, PartialEq)]
pub struct MintReceipt {
    /// Transaction signature, base58.
    pub signature: String,
    /// The new mint address, base58.
    pub mint_address: String,
}

/// Progress notifications emitted by the pipeline.
///
/// Published content addresses stay visible even when a later stage fails -
/// there is no rollback of already-pinned content.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineEvent {
    Phase(MintPhase),
    ImagePublished(String),
    MetadataPublished(String),
}

// =============================================================================
// Wallet Types
// =============================================================================

/// Connected wallet information.
#[derive(Clone, Debug, PartialEq)]
pub struct WalletInfo {
    /// Base58 encoded address.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_links_emptiness() {
        assert!(SocialLinks::default().is_empty());

        let links = SocialLinks {
            website: "https://example.com".into(),
            ..Default::default()
        };
        assert!(!links.is_empty());
    }

    #[test]
    fn test_phase_busy_states() {
        assert!(!MintPhase::Idle.is_busy());
        assert!(MintPhase::UploadingImage.is_busy());
        assert!(MintPhase::UploadingMetadata.is_busy());
        assert!(MintPhase::Minting.is_busy());
        assert!(!MintPhase::Failed("boom".into()).is_busy());
        assert!(!MintPhase::Succeeded(MintReceipt {
            signature: "sig".into(),
            mint_address: "mint".into(),
        })
        .is_busy());
    }
}

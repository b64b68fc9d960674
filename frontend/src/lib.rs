//! Tokenforge - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for minting SPL tokens with on-chain metadata,
//! with logo and metadata pinned to IPFS through the Tokenforge backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (wallet connection)                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── TokenForm (request capture, pipeline launch)           │
//! │  └── StatusSection (progress, pinned links, banners)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (TokenRequest, MintPhase, etc.)
//! - [`metadata`] - Metadata document composition
//! - [`builder`] - Mint transaction construction
//! - [`components`] - UI components (Header, TokenForm, Status, etc.)
//! - [`services`] - Outside-world communication (pinning, RPC, wallet)

use leptos::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod builder;
pub mod components;
pub mod config;
pub mod error;
pub mod metadata;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Request
    CreatorOverride, ImageAttachment, SocialLinks, TokenRequest,
    // Pipeline
    MintPhase, MintReceipt, PipelineEvent,
    // Wallet
    WalletInfo,
};

// Errors
pub use error::{MintError, MintResult};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Tokenforge - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Global state for the application
    let (wallet_address, set_wallet_address) = create_signal(None::<String>);
    let (phase, set_phase) = create_signal(MintPhase::Idle);
    let (image_url, set_image_url) = create_signal(None::<String>);
    let (metadata_url, set_metadata_url) = create_signal(None::<String>);

    view! {
        <Header
            wallet_address=wallet_address
            set_wallet_address=set_wallet_address
        />

        <div class="container">
            <Hero/>

            <TokenForm
                wallet_address=wallet_address
                phase=phase
                set_phase=set_phase
                set_image_url=set_image_url
                set_metadata_url=set_metadata_url
            />

            // Status appears as soon as the first attempt starts
            <Show
                when=move || !matches!(phase.get(), MintPhase::Idle)
                fallback=|| view! { }
            >
                <StatusSection
                    phase=phase
                    image_url=image_url
                    metadata_url=metadata_url
                />
            </Show>
        </div>

        <Footer/>
    }
}

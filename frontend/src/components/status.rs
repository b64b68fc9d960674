//! Pipeline status display.
//!
//! Shows the current phase while a submission is in flight, links to the
//! pinned image and metadata as soon as they exist, and ends on either a
//! success banner (signature + mint address with explorer links) or an
//! error banner. Pinned links stay visible after a failure so the user can
//! see what was already published.

use leptos::*;
use crate::types::MintPhase;

#[component]
pub fn StatusSection(
    phase: ReadSignal<MintPhase>,
    image_url: ReadSignal<Option<String>>,
    metadata_url: ReadSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="status-section" id="statusSection">
            // In-flight progress line
            <Show
                when=move || phase.get().is_busy()
                fallback=|| view! { }
            >
                <div class="progress-line">
                    <span class="spinner"></span>
                    <span>{move || phase.get().label()}</span>
                </div>
            </Show>

            // Published content links
            <Show
                when=move || image_url.get().is_some()
                fallback=|| view! { }
            >
                <div class="pinned-link">
                    "Logo pinned: "
                    <a href=move || image_url.get().unwrap_or_default() target="_blank">
                        {move || image_url.get().unwrap_or_default()}
                    </a>
                </div>
            </Show>

            <Show
                when=move || metadata_url.get().is_some()
                fallback=|| view! { }
            >
                <div class="pinned-link">
                    "Metadata pinned: "
                    <a href=move || metadata_url.get().unwrap_or_default() target="_blank">
                        {move || metadata_url.get().unwrap_or_default()}
                    </a>
                </div>
            </Show>

            // Terminal banners
            {move || match phase.get() {
                MintPhase::Succeeded(receipt) => {
                    let tx_url = format!(
                        "https://explorer.solana.com/tx/{}?cluster=devnet",
                        receipt.signature
                    );
                    let mint_url = format!(
                        "https://explorer.solana.com/address/{}?cluster=devnet",
                        receipt.mint_address
                    );
                    view! {
                        <div class="banner success">
                            <div class="banner-title">"✅ Token minted!"</div>
                            <div>
                                "Mint address: "
                                <a href=mint_url target="_blank">{receipt.mint_address}</a>
                            </div>
                            <div>
                                "Transaction: "
                                <a href=tx_url target="_blank">{receipt.signature}</a>
                            </div>
                        </div>
                    }.into_view()
                }
                MintPhase::Failed(message) => view! {
                    <div class="banner error">
                        <div class="banner-title">"❌ Mint failed"</div>
                        <div class="banner-detail">{message}</div>
                    </div>
                }.into_view(),
                _ => view! { }.into_view(),
            }}
        </div>
    }
}

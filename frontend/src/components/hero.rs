//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Tokenforge - Create Your Token"</h1>
            <p class="subtitle">
                "Launch an SPL token on Solana in one transaction. "
                "Logo and metadata are pinned to IPFS, then the mint, "
                "token account and on-chain metadata are created together."
            </p>
        </div>
    }
}

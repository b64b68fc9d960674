//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Copyright © 2026 Tokenforge • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href="https://solana.com" class="footer-link" target="_blank">
                    "Solana"
                </a>
                <a href="https://www.pinata.cloud" class="footer-link" target="_blank">
                    "Pinata"
                </a>
                <a href="https://docs.metaplex.com" class="footer-link" target="_blank">
                    "Metaplex"
                </a>
            </div>
        </footer>
    }
}

use leptos::*;
use crate::services::wallet::SolanaWallet;

#[component]
pub fn Header(
    wallet_address: ReadSignal<Option<String>>,
    set_wallet_address: WriteSignal<Option<String>>,
) -> impl IntoView {
    // Handler for wallet connection
    let on_wallet_click = move |_| {
        if wallet_address.get().is_none() {
            log::info!("🔑 Attempting to connect wallet...");

            spawn_local(async move {
                match SolanaWallet::connect().await {
                    Ok(info) => {
                        log::info!("✅ Wallet connected: {}", info.address);
                        set_wallet_address.set(Some(info.address));
                    }
                    Err(e) => {
                        log::error!("❌ Wallet connection failed: {}", e);
                    }
                }
            });
        }
    };

    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">"TOKENFORGE"</a>
                <span class="badge">"Devnet"</span>
            </div>
            <div class="header-right">
                <div
                    class="wallet-status"
                    class:connected=move || wallet_address.get().is_some()
                    on:click=on_wallet_click
                    style="cursor: pointer;"
                >
                    <span class="wallet-dot" class:connected=move || wallet_address.get().is_some()></span>
                    <span id="walletText">
                        {move || if let Some(addr) = wallet_address.get() {
                            format!("{}...{}", &addr[0..6.min(addr.len())], &addr[addr.len().saturating_sub(4)..])
                        } else {
                            "Connect Wallet".to_string()
                        }}
                    </span>
                </div>
            </div>
        </header>
    }
}

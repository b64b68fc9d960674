//! Token creation form.
//!
//! Collects the request (identity, logo, socials, authority flags), freezes
//! it on submit and hands it to the pipeline. The submit control is disabled
//! while an attempt is in flight and while no wallet is connected.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use crate::config::{BACKEND_URL, MAX_LOGO_SIZE, SOLANA_RPC_URL};
use crate::services::{BackendPublisher, ExtensionSigner, JsonRpcLedger, MintPipeline};
use crate::types::{
    CreatorOverride, ImageAttachment, MintPhase, PipelineEvent, SocialLinks, TokenRequest,
};

#[component]
pub fn TokenForm(
    wallet_address: ReadSignal<Option<String>>,
    phase: ReadSignal<MintPhase>,
    set_phase: WriteSignal<MintPhase>,
    set_image_url: WriteSignal<Option<String>>,
    set_metadata_url: WriteSignal<Option<String>>,
) -> impl IntoView {
    // Identity
    let (name, set_name) = create_signal(String::new());
    let (symbol, set_symbol) = create_signal(String::new());
    let (supply, set_supply) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());

    // Logo
    let (image, set_image) = create_signal(None::<ImageAttachment>);
    let (file_error, set_file_error) = create_signal(None::<String>);

    // Social links
    let (website, set_website) = create_signal(String::new());
    let (twitter, set_twitter) = create_signal(String::new());
    let (telegram, set_telegram) = create_signal(String::new());
    let (discord, set_discord) = create_signal(String::new());

    // Creator override
    let (creator_name, set_creator_name) = create_signal(String::new());
    let (creator_address, set_creator_address) = create_signal(String::new());

    // Authority flags
    let (revoke_update, set_revoke_update) = create_signal(false);
    let (revoke_freeze, set_revoke_freeze) = create_signal(false);
    let (revoke_mint, set_revoke_mint) = create_signal(false);

    // Handler for logo selection: read the bytes eagerly so submit never
    // has to touch the File object again.
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);

        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        if file.size() > MAX_LOGO_SIZE as f64 {
            set_file_error.set(Some(format!(
                "Logo is too large ({} KB); maximum is {} KB",
                (file.size() / 1024.0) as u64,
                MAX_LOGO_SIZE / 1024
            )));
            set_image.set(None);
            return;
        }

        set_file_error.set(None);

        let file_name = file.name();
        let mime = if file.type_().is_empty() {
            "application/octet-stream".to_string()
        } else {
            file.type_()
        };

        spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                Ok(buffer) => {
                    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                    log::info!("🖼️  Logo selected: {} ({} bytes)", file_name, bytes.len());
                    set_image.set(Some(ImageAttachment {
                        bytes,
                        name: file_name,
                        mime,
                    }));
                }
                Err(_) => {
                    set_file_error.set(Some("Could not read the selected file".to_string()));
                }
            }
        });
    };

    let trigger_file_input = move |_| {
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(input) = document.get_element_by_id("logoInput") {
                    if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                        html_input.click();
                    }
                }
            }
        }
    };

    // Submit: freeze the request and run one pipeline attempt.
    let on_submit = move |_| {
        if phase.get().is_busy() {
            return;
        }

        let Some(address) = wallet_address.get() else {
            set_phase.set(MintPhase::Failed(
                "Connect a wallet before minting".to_string(),
            ));
            return;
        };

        let name = name.get().trim().to_string();
        let symbol = symbol.get().trim().to_string();
        let supply = supply.get();
        if name.is_empty() || symbol.is_empty() || supply.trim().is_empty() {
            set_phase.set(MintPhase::Failed(
                "Name, symbol and supply are required".to_string(),
            ));
            return;
        }

        let creator = CreatorOverride {
            name: creator_name.get().trim().to_string(),
            address: creator_address.get().trim().to_string(),
        };

        let request = TokenRequest {
            name,
            symbol,
            supply,
            description: description.get().trim().to_string(),
            image: image.get(),
            links: SocialLinks {
                website: website.get().trim().to_string(),
                twitter: twitter.get().trim().to_string(),
                telegram: telegram.get().trim().to_string(),
                discord: discord.get().trim().to_string(),
            },
            creator_override: creator.is_complete().then_some(creator),
            revoke_update_authority: revoke_update.get(),
            revoke_freeze_authority: revoke_freeze.get(),
            revoke_mint_authority: revoke_mint.get(),
        };

        // Each attempt starts from a clean slate.
        set_image_url.set(None);
        set_metadata_url.set(None);

        spawn_local(async move {
            log::info!("🚀 Starting mint pipeline for '{}'", request.name);

            let signer = match ExtensionSigner::new(&address) {
                Ok(signer) => signer,
                Err(e) => {
                    set_phase.set(MintPhase::Failed(e.to_string()));
                    return;
                }
            };

            let pipeline = MintPipeline::new(
                BackendPublisher::new(BACKEND_URL),
                JsonRpcLedger::new(SOLANA_RPC_URL),
                signer,
            );

            let emit = move |event| match event {
                PipelineEvent::Phase(phase) => set_phase.set(phase),
                PipelineEvent::ImagePublished(url) => set_image_url.set(Some(url)),
                PipelineEvent::MetadataPublished(url) => set_metadata_url.set(Some(url)),
            };

            match pipeline.run(&request, emit).await {
                Ok(receipt) => {
                    log::info!("✅ Mint complete: {}", receipt.mint_address);
                }
                Err(e) => {
                    log::error!("❌ Mint failed: {}", e);
                }
            }
        });
    };

    view! {
        <div class="token-form">
            <div class="form-section">
                <h2>"Token Details"</h2>
                <div class="form-row">
                    <label for="tokenName">"Name *"</label>
                    <input
                        type="text"
                        id="tokenName"
                        placeholder="My Token"
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label for="tokenSymbol">"Symbol *"</label>
                    <input
                        type="text"
                        id="tokenSymbol"
                        placeholder="MTK"
                        prop:value=symbol
                        on:input=move |ev| set_symbol.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label for="tokenSupply">"Supply *"</label>
                    <input
                        type="text"
                        id="tokenSupply"
                        placeholder="1000000"
                        prop:value=supply
                        on:input=move |ev| set_supply.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label for="tokenDescription">"Description"</label>
                    <textarea
                        id="tokenDescription"
                        placeholder="What is this token for?"
                        prop:value=description
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                </div>
            </div>

            <div class="form-section">
                <h2>"Logo"</h2>
                <div class="upload-zone" on:click=trigger_file_input>
                    <div class="upload-icon">"🖼️"</div>
                    <div class="upload-text">
                        {move || match image.get() {
                            Some(attachment) => format!("{} selected", attachment.name),
                            None => "Click to choose a logo (max 2 MB)".to_string(),
                        }}
                    </div>
                    <input
                        type="file"
                        id="logoInput"
                        accept="image/*"
                        style="display:none"
                        on:change=on_file_change
                    />
                </div>
                <Show
                    when=move || file_error.get().is_some()
                    fallback=|| view! { }
                >
                    <div class="error-message">
                        {move || file_error.get().unwrap_or_default()}
                    </div>
                </Show>
            </div>

            <div class="form-section">
                <h2>"Social Links"</h2>
                <div class="form-row">
                    <label for="linkWebsite">"Website"</label>
                    <input
                        type="text"
                        id="linkWebsite"
                        placeholder="https://example.com"
                        prop:value=website
                        on:input=move |ev| set_website.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label for="linkTwitter">"Twitter"</label>
                    <input
                        type="text"
                        id="linkTwitter"
                        placeholder="@mytoken or https://twitter.com/mytoken"
                        prop:value=twitter
                        on:input=move |ev| set_twitter.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label for="linkTelegram">"Telegram"</label>
                    <input
                        type="text"
                        id="linkTelegram"
                        placeholder="https://t.me/mytoken"
                        prop:value=telegram
                        on:input=move |ev| set_telegram.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label for="linkDiscord">"Discord"</label>
                    <input
                        type="text"
                        id="linkDiscord"
                        placeholder="https://discord.gg/mytoken"
                        prop:value=discord
                        on:input=move |ev| set_discord.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="form-section">
                <h2>"Creator (optional)"</h2>
                <p class="section-hint">
                    "Shown in the metadata document. Both fields are required for it to apply."
                </p>
                <div class="form-row">
                    <label for="creatorName">"Creator name"</label>
                    <input
                        type="text"
                        id="creatorName"
                        prop:value=creator_name
                        on:input=move |ev| set_creator_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label for="creatorAddress">"Creator address"</label>
                    <input
                        type="text"
                        id="creatorAddress"
                        prop:value=creator_address
                        on:input=move |ev| set_creator_address.set(event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="form-section">
                <h2>"Authorities"</h2>
                <div class="form-row checkbox-row">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=revoke_update
                            on:change=move |ev| set_revoke_update.set(event_target_checked(&ev))
                        />
                        "Revoke update authority (metadata becomes immutable)"
                    </label>
                </div>
                <div class="form-row checkbox-row">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=revoke_freeze
                            on:change=move |ev| set_revoke_freeze.set(event_target_checked(&ev))
                        />
                        "Revoke freeze authority (accounts can never be frozen)"
                    </label>
                </div>
                <div class="form-row checkbox-row">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=revoke_mint
                            on:change=move |ev| set_revoke_mint.set(event_target_checked(&ev))
                        />
                        "Revoke mint authority (supply becomes fixed)"
                    </label>
                </div>
            </div>

            <button
                class="submit-button"
                disabled=move || phase.get().is_busy() || wallet_address.get().is_none()
                on:click=on_submit
            >
                {move || if phase.get().is_busy() {
                    "⏳ Minting..."
                } else if wallet_address.get().is_none() {
                    "Connect a wallet to mint"
                } else {
                    "🚀 Create Token"
                }}
            </button>
        </div>
    }
}

//! Tokenforge CLI - pinning proxy and debugging tools
//!
//! # Main Commands
//!
//! ```bash
//! tokenforge serve                  # Start HTTP server (port 3000)
//! tokenforge check                  # Verify Pinata credentials
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! tokenforge pin logo.png           # Pin a file from disk
//! tokenforge pin-json metadata.json # Pin a JSON document from disk
//! ```

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokenforge::{Config, PinataClient};

#[derive(Parser)]
#[command(name = "tokenforge")]
#[command(about = "Pinning proxy for the Tokenforge SPL token minter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Verify the configured Pinata credentials
    Check,

    /// Pin a file from disk (debug)
    Pin {
        /// File to pin
        input: PathBuf,
    },

    /// Pin a JSON document from disk (debug)
    PinJson {
        /// JSON file to pin
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::Check => cmd_check().await,
        Commands::Pin { input } => cmd_pin(&input).await,
        Commands::PinJson { input } => cmd_pin_json(&input).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::from_env() {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("⚠️  {}", e);
            None
        }
    };

    tokenforge::start_server(port, config).await
}

async fn cmd_check() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let client = PinataClient::new(config.credentials.clone());

    eprintln!("🔑 Testing Pinata authentication...");
    client.test_authentication().await?;
    eprintln!("✅ Credentials are valid");
    eprintln!("   Gateway: https://{}/ipfs/<hash>", config.gateway);

    Ok(())
}

async fn cmd_pin(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let client = PinataClient::new(config.credentials.clone());

    let bytes = tokio::fs::read(input).await?;
    let name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string();
    let mime = guess_mime(&name);

    eprintln!("📌 Pinning {} ({} bytes)...", name, bytes.len());
    let receipt = client.pin_file(bytes, &name, mime).await?;

    eprintln!("✅ Pinned!");
    println!("{}", config.gateway_url(&receipt.ipfs_hash));

    Ok(())
}

async fn cmd_pin_json(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let client = PinataClient::new(config.credentials.clone());

    let content = tokio::fs::read_to_string(input).await?;
    let document: Value = serde_json::from_str(&content)?;
    let name = format!(
        "{}-Metadata.json",
        document.get("name").and_then(Value::as_str).unwrap_or("Token")
    );

    eprintln!("📌 Pinning {}...", name);
    let receipt = client.pin_json(&document, &name).await?;

    eprintln!("✅ Pinned!");
    println!("{}", config.gateway_url(&receipt.ipfs_hash));

    Ok(())
}

fn guess_mime(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

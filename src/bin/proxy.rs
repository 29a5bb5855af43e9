//! AddressMatch Proxy - holds the model credential server-side
//!
//! Run with: API_KEY=... cargo run --bin addressmatch-proxy

use addressmatch::config::Config;
use addressmatch::oracle::GeminiOracle;
use addressmatch::server::{self, ProxyState};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind, e.g. 127.0.0.1:3000
    #[arg(short, long)]
    bind: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    // Setup logging; RUST_LOG wins over the config level
    let default_level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 AddressMatch proxy v{} starting...", env!("CARGO_PKG_VERSION"));

    let api_key = config
        .require_api_key()
        .context("refusing to start: set API_KEY or GEMINI_API_KEY")?;
    let oracle = GeminiOracle::new(&config, api_key)?;
    info!("🧠 Model: {}", config.model);

    server::run(ProxyState::new(Arc::new(oracle)), &config).await
}

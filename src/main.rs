//! AddressMatch - compare two postal addresses
//!
//! Runs immediately when both addresses are given (as arguments or as a
//! query string), otherwise asks for them.

use addressmatch::broadcast::{BroadcastMessage, Broadcaster};
use addressmatch::config::{config_path, Config, OracleMode};
use addressmatch::oracle::{create_oracle, VerificationResult};
use addressmatch::session::Session;
use addressmatch::trigger;
use addressmatch::verify::Verifier;
use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

const SAMPLE_ADDRESS1: &str = "456 Oak Avenue, Springfield, IL 62704";
const SAMPLE_ADDRESS2: &str = "456 Oak Ave, Springfield, Illinois 62704";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First address
    address1: Option<String>,

    /// Second address
    address2: Option<String>,

    /// Addresses in URL query syntax: "address1=...&address2=..."
    #[arg(short, long)]
    query: Option<String>,

    /// Call the model directly with API_KEY instead of going through the proxy
    #[arg(long)]
    direct: bool,

    /// Proxy endpoint to use
    #[arg(long)]
    proxy_url: Option<String>,

    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,

    /// Unix socket of an embedding process to notify with the result
    #[arg(long)]
    notify_socket: Option<PathBuf>,

    /// Write the effective settings (flags included) to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Ask for one address on stdin, offering a default
fn prompt_address(label: &str, default: &str) -> Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{label} [{default}]: ")?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();

    Ok(if line.is_empty() {
        default.to_string()
    } else {
        line.to_string()
    })
}

fn print_result(result: &VerificationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(result)?);
    } else if result.are_same {
        println!("✅ Same location\n\n{}", result.reasoning);
    } else {
        println!("❌ Different locations\n\n{}", result.reasoning);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging; stdout is reserved for the verdict
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load()?;
    if args.direct {
        config.oracle_mode = OracleMode::Direct;
    }
    if let Some(url) = args.proxy_url {
        config.proxy_url = url;
    }

    if args.save_config {
        config.save()?;
        println!("💾 Saved settings to {}", config_path().display());
        return Ok(());
    }

    // Fail fast on a missing credential before asking for input
    let verifier = Verifier::new(create_oracle(&config)?);
    let broadcaster = Broadcaster::detect(args.notify_socket.as_deref());
    if let Some(broadcaster) = &broadcaster {
        debug!("📡 Result will be sent to {:?}", broadcaster.socket_path());
    }

    let supplied = trigger::addresses_from_args(args.address1.as_deref(), args.address2.as_deref())
        .or_else(|| args.query.as_deref().and_then(trigger::addresses_from_query));

    let (address1, address2) = match supplied {
        Some(pair) => {
            debug!("🎯 Both addresses supplied, running immediately");
            pair
        }
        None => (
            prompt_address("Address 1", SAMPLE_ADDRESS1)?,
            prompt_address("Address 2", SAMPLE_ADDRESS2)?,
        ),
    };

    info!("🔎 Comparing via {}", verifier.oracle_name());
    let mut session = Session::new();
    let outcome = verifier.run(&mut session, &address1, &address2).await;

    if let Some(broadcaster) = &broadcaster {
        broadcaster.notify(&outcome);
    }

    match outcome {
        Ok(result) => print_result(&result, args.json),
        Err(e) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string(&BroadcastMessage::Error {
                        error: e.to_string()
                    })?
                );
            } else {
                eprintln!("❌ {}", e);
            }
            std::process::exit(1);
        }
    }
}

//! Oracle Module
//!
//! The external model that gives the final same/different verdict.
//! One interface, two transports: a direct client holding the credential
//! and a proxied client that posts to the proxy endpoint.

use crate::config::{Config, OracleMode};
use crate::core::VerifyRequest;
use crate::error::AddrResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub mod gemini;
pub mod proxied;

pub use gemini::GeminiOracle;
pub use proxied::ProxiedOracle;

/// The oracle's structured verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub are_same: bool,
    pub reasoning: String,
}

/// Trait for oracle clients
#[async_trait]
pub trait Oracle: Send + Sync + std::fmt::Debug {
    /// Ask for a verdict on a prepared request
    async fn verify(&self, request: &VerifyRequest) -> AddrResult<VerificationResult>;

    /// Get the client name
    fn name(&self) -> &str;
}

/// JSON schema requested from the model for its response
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "areSame": {
                "type": "BOOLEAN",
                "description": "True if the addresses are the same, false otherwise."
            },
            "reasoning": {
                "type": "STRING",
                "description": "A brief explanation for the decision."
            }
        },
        "required": ["areSame", "reasoning"]
    })
}

/// Factory to create the configured oracle client
pub fn create_oracle(config: &Config) -> AddrResult<Arc<dyn Oracle>> {
    info!("🛠️ Creating oracle client: {:?}", config.oracle_mode);
    let oracle: Arc<dyn Oracle> = match config.oracle_mode {
        OracleMode::Direct => {
            let key = config.require_api_key()?;
            info!("  - Calling {} directly", config.model);
            Arc::new(GeminiOracle::new(config, key)?)
        }
        OracleMode::Proxied => {
            info!("  - Using proxy at {}", config.proxy_url);
            Arc::new(ProxiedOracle::new(config)?)
        }
    };
    info!("✅ Oracle client '{}' initialized", oracle.name());
    Ok(oracle)
}

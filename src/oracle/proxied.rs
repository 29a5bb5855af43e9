//! Proxied client
//!
//! Posts the verify request to the proxy endpoint. Holds no credential.

use super::{Oracle, VerificationResult};
use crate::config::Config;
use crate::core::VerifyRequest;
use crate::error::{AddrError, AddrResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Error body returned by the proxy
#[derive(Debug, Deserialize)]
struct ProxyError {
    error: String,
}

/// Oracle reached through the proxy endpoint
#[derive(Debug, Clone)]
pub struct ProxiedOracle {
    client: reqwest::Client,
    url: String,
}

impl ProxiedOracle {
    pub fn new(config: &Config) -> AddrResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.proxy_url.clone(),
        })
    }
}

#[async_trait]
impl Oracle for ProxiedOracle {
    async fn verify(&self, request: &VerifyRequest) -> AddrResult<VerificationResult> {
        debug!("📨 Posting verify request to {}", self.url);

        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ProxyError>(&body_text)
                .map(|e| e.error)
                .unwrap_or(body_text);
            warn!("❌ Proxy Error ({}): {}", status, reason);
            return Err(AddrError::Oracle(format!("proxy returned {status}: {reason}")));
        }

        debug!("📨 Proxy raw body: {}", body_text);
        let result: VerificationResult = serde_json::from_str(&body_text)?;
        Ok(result)
    }

    fn name(&self) -> &str {
        "proxied"
    }
}

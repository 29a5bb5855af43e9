//! Direct Gemini client
//!
//! Calls the `generateContent` REST endpoint with a structured-output
//! schema. Holds the credential, so it belongs on the server side.

use super::{response_schema, Oracle, VerificationResult};
use crate::config::Config;
use crate::core::{build_prompt, VerifyRequest};
use crate::error::{AddrError, AddrResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Oracle that talks to the model provider directly
#[derive(Clone)]
pub struct GeminiOracle {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiOracle")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiOracle {
    /// Create a client from config and an explicitly injected key
    pub fn new(config: &Config, api_key: &str) -> AddrResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.gemini_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.url, self.model)
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        })
    }
}

#[async_trait]
impl Oracle for GeminiOracle {
    async fn verify(&self, request: &VerifyRequest) -> AddrResult<VerificationResult> {
        let prompt = build_prompt(request);
        debug!("🧠 Oracle prompt: {}", prompt);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(&prompt))
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Gemini API Error ({}): {}", status, body_text);
            return Err(AddrError::Oracle(format!("model provider returned {status}")));
        }

        debug!("🧠 Gemini raw body: {}", body_text);

        let generated: GenerateResponse = serde_json::from_str(&body_text)?;
        let text = generated
            .text()
            .ok_or_else(|| AddrError::Oracle("response carried no text".to_string()))?;

        let result: VerificationResult = serde_json::from_str(text.trim())?;
        Ok(result)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

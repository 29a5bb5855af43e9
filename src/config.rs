use crate::error::{AddrError, AddrResult};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which oracle client the CLI talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleMode {
    /// Post to the proxy endpoint; no credential on this side
    #[default]
    Proxied,
    /// Call the model provider with a locally held key
    Direct,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Oracle
    pub oracle_mode: OracleMode,
    pub model: String,
    pub gemini_url: String,
    pub proxy_url: String,
    pub request_timeout_secs: u64,

    // Proxy server
    pub bind_addr: String,
    pub allowed_origin: String,

    // Meta
    pub log_level: String,

    /// Oracle credential. Injected from the environment, never written to disk.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oracle_mode: OracleMode::Proxied,
            model: "gemini-2.5-flash".to_string(),
            gemini_url: "https://generativelanguage.googleapis.com".to_string(),
            proxy_url: "http://127.0.0.1:3000/api/verify".to_string(),
            request_timeout_secs: 30,
            bind_addr: "127.0.0.1:3000".to_string(),
            allowed_origin: "*".to_string(),
            log_level: "info".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load config from the default path (or defaults), then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// `API_KEY` wins over `GEMINI_API_KEY`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("API_KEY").or_else(|| get("GEMINI_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(v) = get("ADDRESSMATCH_PROXY_URL") {
            self.proxy_url = v;
        }
        if let Some(v) = get("ADDRESSMATCH_BIND") {
            self.bind_addr = v;
        }
        if let Some(v) = get("ADDRESSMATCH_MODEL") {
            self.model = v;
        }
    }

    /// Fail-fast credential check, run once at process start
    pub fn require_api_key(&self) -> AddrResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AddrError::Config("API_KEY is not configured".to_string()))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("addressmatch")
        .join("config.json")
}

// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Claude API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// Claude API key
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Token budget for a single reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl AnthropicConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: default_model(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

/// Web UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8501")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Longest passage accepted from the form, in characters
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

fn default_bind_address() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_max_input_chars() -> usize {
    20_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub anthropic: AnthropicConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    pub fn new(api_key: String) -> Self {
        Self {
            anthropic: AnthropicConfig::new(api_key),
            server: ServerConfig::default(),
        }
    }

    /// Reject settings that would only fail later at request time
    pub fn validate(&self) -> Result<()> {
        if self.anthropic.api_key.trim().is_empty() {
            bail!("anthropic.api_key is empty");
        }
        if self.anthropic.model.trim().is_empty() {
            bail!("anthropic.model is empty");
        }
        if self.anthropic.max_tokens == 0 {
            bail!("anthropic.max_tokens must be greater than zero");
        }
        if self.anthropic.timeout_secs == 0 {
            bail!("anthropic.timeout_secs must be greater than zero");
        }
        if self.server.max_input_chars == 0 {
            bail!("server.max_input_chars must be greater than zero");
        }
        Ok(())
    }
}

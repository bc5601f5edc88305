// Claude API provider implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::{ProviderRequest, ProviderResponse};
use super::LlmProvider;
use crate::claude::retry::{HttpStatusError, RetryPolicy};
use crate::claude::types::{MessageRequest, MessageResponse};
use crate::config::{AnthropicConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API provider
///
/// Implements the LlmProvider trait for Anthropic's Messages API.
#[derive(Clone)]
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
    retry: RetryPolicy,
}

impl ClaudeProvider {
    /// Create a new Claude provider
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// Build from the [anthropic] config section
    pub fn from_config(config: &AnthropicConfig) -> Result<Self> {
        Ok(Self::new(config.api_key.clone(), Duration::from_secs(config.timeout_secs))?
            .with_base_url(&config.base_url)
            .with_model(&config.model))
    }

    /// Create with custom default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point at a different API host (proxies, test servers)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MESSAGES_PATH)
    }

    /// Convert ProviderRequest to Claude's MessageRequest format
    fn to_message_request(&self, request: &ProviderRequest) -> MessageRequest {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        MessageRequest {
            model,
            max_tokens: request.max_tokens,
            system: request.system.clone(),
            messages: request.messages.clone(),
            temperature: request.temperature,
        }
    }

    /// Send a single message request (no retry)
    async fn send_message_once(&self, msg_request: &MessageRequest) -> Result<ProviderResponse> {
        tracing::debug!(
            model = %msg_request.model,
            max_tokens = msg_request.max_tokens,
            "Sending request to Claude API"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(msg_request)
            .send()
            .await
            .context("Failed to send request to Claude API")?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpStatusError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let message_response: MessageResponse = response
            .json()
            .await
            .context("Failed to parse Claude API response")?;

        tracing::debug!(
            id = %message_response.id,
            stop_reason = ?message_response.stop_reason,
            "Received response"
        );

        Ok(ProviderResponse {
            id: message_response.id,
            model: message_response.model,
            content: message_response.content,
            stop_reason: message_response.stop_reason,
            usage: message_response.usage,
            provider: "claude".to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let msg_request = self.to_message_request(request);
        self.retry
            .run(|| self.send_message_once(&msg_request))
            .await
    }

    fn name(&self) -> &str {
        "claude"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

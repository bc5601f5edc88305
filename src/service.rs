// Assistant pipeline
//
// input check -> prompt -> one provider call -> fenced JSON -> validation

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::extract::{parse_fenced_json, ExtractError};
use crate::metrics::Metrics;
use crate::model::{Interpretation, TaskKind, TaskResult, Vowelization};
use crate::prompts;
use crate::providers::{ClaudeProvider, LlmProvider, ProviderRequest};

/// Shown in the UI for every failure that isn't the user's input
pub const GENERIC_ERROR_MESSAGE: &str = "אירעה שגיאה בעיבוד התשובה. נסו שוב.";

pub const EMPTY_INPUT_MESSAGE: &str = "נא להזין טקסט";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("input text is too long ({chars} characters, limit {limit})")]
    InputTooLong { chars: usize, limit: usize },

    #[error("LLM request failed: {0:#}")]
    Provider(anyhow::Error),

    #[error("could not parse model reply: {0}")]
    Parse(#[from] ExtractError),
}

impl AssistantError {
    /// Rejected before any network call
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AssistantError::EmptyInput | AssistantError::InputTooLong { .. }
        )
    }

    /// Metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            AssistantError::EmptyInput => "empty_input",
            AssistantError::InputTooLong { .. } => "input_too_long",
            AssistantError::Provider(_) => "provider",
            AssistantError::Parse(_) => "parse",
        }
    }

    /// Text for the UI; details stay in the log
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
            AssistantError::InputTooLong { limit, .. } => {
                format!("הטקסט ארוך מדי (עד {} תווים)", limit)
            }
            AssistantError::Provider(_) | AssistantError::Parse(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Request parameters taken from config
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub max_input_chars: usize,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.anthropic.model.clone(),
            max_tokens: config.anthropic.max_tokens,
            temperature: config.anthropic.temperature,
            max_input_chars: config.server.max_input_chars,
        }
    }
}

pub struct AssistantService {
    provider: Arc<dyn LlmProvider>,
    settings: ServiceSettings,
    metrics: Arc<Metrics>,
}

impl AssistantService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        settings: ServiceSettings,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            provider,
            settings,
            metrics,
        }
    }

    /// Service backed by the Claude API
    pub fn from_config(config: &Config, metrics: Arc<Metrics>) -> Result<Self> {
        let provider = ClaudeProvider::from_config(&config.anthropic)?;
        Ok(Self::new(
            Arc::new(provider),
            ServiceSettings::from_config(config),
            metrics,
        ))
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Torah interpretation of a passage
    pub async fn interpret(&self, text: &str) -> Result<Interpretation, AssistantError> {
        self.run(text).await
    }

    /// Add nikud to a passage
    pub async fn vowelize(&self, text: &str) -> Result<Vowelization, AssistantError> {
        self.run(text).await
    }

    fn check_input(&self, text: &str) -> Result<(), AssistantError> {
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyInput);
        }
        let chars = text.trim().chars().count();
        if chars > self.settings.max_input_chars {
            return Err(AssistantError::InputTooLong {
                chars,
                limit: self.settings.max_input_chars,
            });
        }
        Ok(())
    }

    async fn run<T: TaskResult>(&self, text: &str) -> Result<T, AssistantError> {
        let task = T::TASK;
        let request_id = Uuid::new_v4();
        self.metrics.record_request(task);

        let result = self.run_inner::<T>(task, request_id, text).await;

        if let Err(e) = &result {
            self.metrics.record_failure(task, e.kind());
            if e.is_input_error() {
                tracing::info!(%request_id, %task, error = %e, "Rejected input");
            } else {
                tracing::error!(%request_id, %task, error = %e, "Assistant request failed");
            }
        }

        result
    }

    async fn run_inner<T: TaskResult>(
        &self,
        task: TaskKind,
        request_id: Uuid,
        text: &str,
    ) -> Result<T, AssistantError> {
        self.check_input(text)?;

        let (system, user_prompt) = prompts::build(task, text);
        let request = ProviderRequest::user(user_prompt)
            .with_system(system)
            .with_model(self.settings.model.as_str())
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);

        tracing::info!(
            %request_id,
            %task,
            chars = text.trim().chars().count(),
            provider = self.provider.name(),
            "Sending assistant request"
        );

        let started = Instant::now();
        let response = self
            .provider
            .send_message(&request)
            .await
            .map_err(AssistantError::Provider)?;
        let elapsed = started.elapsed();
        self.metrics.observe_llm_latency(task, elapsed.as_secs_f64());

        if response.is_truncated() {
            tracing::warn!(%request_id, %task, "Reply hit the max_tokens limit");
        }

        let reply = response.text();
        let parsed: T = parse_fenced_json(&reply).map_err(|e| {
            tracing::debug!(%request_id, reply = %reply, "Unparseable reply");
            e
        })?;
        parsed.validate().map_err(ExtractError::Invalid)?;

        tracing::info!(
            %request_id,
            %task,
            elapsed_ms = elapsed.as_millis() as u64,
            "Assistant request completed"
        );

        Ok(parsed)
    }
}

// LLM provider abstraction
//
// The assistant talks to the model through this trait so the HTTP provider
// can be swapped for a scripted one in tests.

use anyhow::Result;
use async_trait::async_trait;

pub mod claude;
pub mod types;

pub use claude::ClaudeProvider;
pub use types::{ProviderRequest, ProviderResponse};

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a message and wait for the complete response
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse>;

    /// Get the provider name (e.g., "claude")
    fn name(&self) -> &str;

    /// Model used when the request leaves it empty
    fn default_model(&self) -> &str;
}

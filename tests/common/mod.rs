// Shared test helpers: a scripted LLM provider

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use mendy::claude::ContentBlock;
use mendy::metrics::Metrics;
use mendy::providers::{LlmProvider, ProviderRequest, ProviderResponse};
use mendy::service::{AssistantService, ServiceSettings};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const INTERPRETATION_REPLY: &str = r#"הנה הפירוש המבוקש:

```json
{
  "original_text": "בראשית ברא אלהים",
  "letter": "לקורא היקר, בפסוק הראשון התורה מלמדת שהעולם נברא.",
  "difficult_words": [
    {"word": "ברא", "explanation": "יצר יש מאין"}
  ],
  "quotes": [
    {"quote": "בשביל התורה שנקראת ראשית", "explanation": "רש\"י דורש את המילה בראשית"}
  ]
}
```
"#;

pub const NIKUD_REPLY: &str = "```json\n{\"original_text\": \"שלום עולם\", \"vowelized_text\": \"שָׁלוֹם עוֹלָם\"}\n```";

/// Provider that returns a fixed reply (or error) and records requests
pub struct MockProvider {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ProviderRequest>>,
}

impl MockProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn send_message(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.reply {
            Ok(text) => Ok(ProviderResponse {
                id: "msg_test".to_string(),
                model: request.model.clone(),
                content: vec![ContentBlock::text(text.clone())],
                stop_reason: Some("end_turn".to_string()),
                usage: None,
                provider: "mock".to_string(),
            }),
            Err(message) => anyhow::bail!("{}", message),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }
}

pub fn settings() -> ServiceSettings {
    ServiceSettings {
        model: "claude-test".to_string(),
        max_tokens: 1024,
        temperature: None,
        max_input_chars: 200,
    }
}

pub fn service_with(provider: Arc<MockProvider>) -> AssistantService {
    AssistantService::new(
        provider,
        settings(),
        Arc::new(Metrics::new().expect("metrics")),
    )
}

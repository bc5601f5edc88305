// JSON extraction from free-text model replies
//
// The prompts ask for a single ```json fenced block, but models sometimes
// drop the language tag or skip the fence entirely. All three shapes are
// accepted; anything else is an ExtractError, never a panic.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Opening of a json-tagged fence, e.g. "```json\n" or "```JSON "
static JSON_FENCE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```json[^\S\n]*\n?").expect("Failed to compile json fence regex")
});

/// Untagged fence whose opening line carries nothing but whitespace
static BARE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[^\S\n]*\n(.*?)```").expect("Failed to compile bare fence regex")
});

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("reply contains no fenced JSON block")]
    MissingFence,

    #[error("```json fence is never closed")]
    UnterminatedFence,

    #[error("fenced block is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("reply JSON failed validation: {0}")]
    Invalid(String),
}

/// Locate the JSON payload inside a model reply
///
/// Order of preference:
/// 1. the first ```json fence (tag is case-insensitive)
/// 2. the first untagged ``` fence whose body starts with `{`
/// 3. the whole reply, when it is a bare JSON object
pub fn extract_fenced_json(reply: &str) -> Result<&str, ExtractError> {
    if let Some(open) = JSON_FENCE_OPEN.find(reply) {
        let rest = &reply[open.end()..];
        let close = rest.find(FENCE).ok_or(ExtractError::UnterminatedFence)?;
        return Ok(rest[..close].trim());
    }

    for capture in BARE_FENCE.captures_iter(reply) {
        if let Some(body) = capture.get(1) {
            let body = body.as_str().trim();
            if body.starts_with('{') {
                return Ok(body);
            }
        }
    }

    let trimmed = reply.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed);
    }

    Err(ExtractError::MissingFence)
}

/// Extract the fenced payload and deserialize it
pub fn parse_fenced_json<T: DeserializeOwned>(reply: &str) -> Result<T, ExtractError> {
    let payload = extract_fenced_json(reply)?;
    let value = serde_json::from_str(payload)?;
    Ok(value)
}

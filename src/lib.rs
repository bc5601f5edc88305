// Mendy - Torah-commentary and nikud assistant
// Library exports

pub mod claude; // Claude API wire types and retry
pub mod config;
pub mod errors;
pub mod export; // Plain-text downloads
pub mod extract; // Fenced JSON extraction from model replies
pub mod metrics;
pub mod model;
pub mod prompts;
pub mod providers; // LLM provider abstraction
pub mod server; // Web UI
pub mod service; // Assistant pipeline

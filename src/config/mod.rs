// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{
    apply_overrides, default_config_path, load_config, load_config_from, load_default_config,
};
pub use settings::{AnthropicConfig, Config, ServerConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

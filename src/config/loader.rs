// Configuration loader
// Loads settings from ~/.mendy/config.toml, then applies environment overrides

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;
use crate::errors;

/// Default location of the config file
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".mendy/config.toml"))
}

/// Load configuration from an explicit path, the default file, or the environment
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let lookup = |key: &str| std::env::var(key).ok();

    match path {
        Some(path) => finish(load_config_from(path)?, lookup),
        None => load_default_config(&default_config_path()?, lookup),
    }
}

/// Load `default_path` if it exists, else fall back to `ANTHROPIC_API_KEY`
///
/// `lookup` is `std::env::var` in production; tests pass a map.
pub fn load_default_config<F>(default_path: &Path, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config = if default_path.exists() {
        load_config_from(default_path)?
    } else if let Some(api_key) = lookup("ANTHROPIC_API_KEY").filter(|k| !k.is_empty()) {
        tracing::debug!("No config file, using ANTHROPIC_API_KEY from environment");
        Config::new(api_key)
    } else {
        bail!("{}", errors::missing_config_error(&default_path.display().to_string()));
    };

    finish(config, lookup)
}

fn finish<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    apply_overrides(&mut config, lookup);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Parse a TOML config file
pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("{}", errors::config_parse_error(&e.to_string())))?;

    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Apply environment overrides
///
/// `lookup` is `std::env::var` in production; tests pass a map.
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup("ANTHROPIC_API_KEY").filter(|v| !v.is_empty()) {
        config.anthropic.api_key = api_key;
    }
    if let Some(model) = lookup("MENDY_MODEL").filter(|v| !v.is_empty()) {
        config.anthropic.model = model;
    }
    if let Some(bind) = lookup("MENDY_BIND").filter(|v| !v.is_empty()) {
        config.server.bind_address = bind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
[anthropic]
api_key = "sk-ant-test"
model = "claude-3-opus-20240229"
max_tokens = 2048
timeout_secs = 30

[server]
bind_address = "0.0.0.0:9000"
max_input_chars = 500
"#,
        );

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.anthropic.api_key, "sk-ant-test");
        assert_eq!(config.anthropic.model, "claude-3-opus-20240229");
        assert_eq!(config.anthropic.max_tokens, 2048);
        assert_eq!(config.anthropic.timeout_secs, 30);
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.server.max_input_chars, 500);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let file = write_config("[anthropic]\napi_key = \"sk-ant-test\"\n");

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.anthropic.max_tokens, 4096);
        assert_eq!(config.anthropic.base_url, "https://api.anthropic.com");
        assert_eq!(config.server.bind_address, "127.0.0.1:8501");
    }

    #[test]
    fn test_parse_error_has_hint() {
        let file = write_config("[anthropic\napi_key = ");
        let err = load_config_from(file.path()).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let result = load_config(Some(Path::new("/nonexistent/mendy/config.toml")));
        assert!(result.is_err());
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_no_file_falls_back_to_env_key() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        let vars = env(&[("ANTHROPIC_API_KEY", "sk-ant-env"), ("MENDY_BIND", "0.0.0.0:80")]);

        let config =
            load_default_config(&missing, |key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.anthropic.api_key, "sk-ant-env");
        assert_eq!(config.anthropic.model, "claude-3-5-sonnet-20241022");
        assert_eq!(config.server.bind_address, "0.0.0.0:80");
    }

    #[test]
    fn test_no_file_and_no_key_explains_setup() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        let vars = env(&[("ANTHROPIC_API_KEY", "")]);

        let err = load_default_config(&missing, |key| vars.get(key).map(|v| v.to_string()))
            .unwrap_err()
            .to_string();

        assert!(err.contains("No configuration found"));
        assert!(err.contains(&missing.display().to_string()));
        assert!(err.contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_existing_default_file_wins_over_env_key() {
        let file = write_config("[anthropic]\napi_key = \"sk-ant-file\"\n");
        let vars = env(&[("MENDY_MODEL", "claude-3-haiku-20240307")]);

        let config =
            load_default_config(file.path(), |key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.anthropic.api_key, "sk-ant-file");
        assert_eq!(config.anthropic.model, "claude-3-haiku-20240307");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::new("from-file".to_string());
        let env: HashMap<&str, &str> = [
            ("ANTHROPIC_API_KEY", "from-env"),
            ("MENDY_MODEL", "claude-3-haiku-20240307"),
            ("MENDY_BIND", ""),
        ]
        .into_iter()
        .collect();

        apply_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.anthropic.api_key, "from-env");
        assert_eq!(config.anthropic.model, "claude-3-haiku-20240307");
        // Empty values are ignored
        assert_eq!(config.server.bind_address, "127.0.0.1:8501");
    }
}

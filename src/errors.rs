// User-friendly error messages
//
// Turns configuration and API failures into actionable CLI messages.

/// No config file and no ANTHROPIC_API_KEY
pub fn missing_config_error(config_path: &str) -> String {
    format!(
        "No configuration found\n\n\
        \x1b[1;33mCreate {}:\x1b[0m\n\n\
        \x1b[36m[anthropic]\n\
        api_key = \"sk-ant-...\"\n\
        model = \"claude-3-5-sonnet-20241022\"\x1b[0m\n\n\
        Alternatively, set environment variable:\n\
        export ANTHROPIC_API_KEY=\"sk-ant-...\"",
        config_path
    )
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(error: &str) -> String {
    format!(
        "Failed to parse config file\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat ~/.mendy/config.toml\x1b[0m\n\n\
        2. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Unclosed section headers [anthropic]\n\
           • api_key placed outside the [anthropic] section",
        error
    )
}

/// Format an API key error with helpful suggestions
pub fn api_key_invalid_error() -> String {
    "Claude API key is invalid or missing\n\n\
    \x1b[1;33mPossible causes:\x1b[0m\n\
    • API key not set in config\n\
    • API key format is incorrect (expected sk-ant-...)\n\
    • API key has been revoked\n\n\
    \x1b[1;32mTry:\x1b[0m\n\
    1. Check your config file:\n\
       \x1b[36mcat ~/.mendy/config.toml\x1b[0m\n\n\
    2. Get a new API key:\n\
       https://console.anthropic.com/"
        .to_string()
}

/// Pick a friendlier message for well-known failures
pub fn describe(err: &anyhow::Error) -> String {
    let unauthorized = err.chain().any(|cause| {
        cause
            .downcast_ref::<crate::claude::HttpStatusError>()
            .map(|e| e.status == 401 || e.status == 403)
            .unwrap_or(false)
    });

    if unauthorized {
        api_key_invalid_error()
    } else {
        format!("{:#}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claude::HttpStatusError;

    #[test]
    fn test_missing_config_mentions_path_and_env() {
        let msg = missing_config_error("/home/u/.mendy/config.toml");
        assert!(msg.contains("/home/u/.mendy/config.toml"));
        assert!(msg.contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_api_key_invalid_has_console_url() {
        let msg = api_key_invalid_error();
        assert!(msg.contains("console.anthropic.com"));
        assert!(msg.contains("sk-ant-"));
    }

    #[test]
    fn test_describe_unauthorized() {
        let err = anyhow::Error::new(HttpStatusError {
            status: 401,
            body: "invalid x-api-key".to_string(),
        });
        assert!(describe(&err).contains("console.anthropic.com"));

        let other = anyhow::anyhow!("connection reset");
        assert_eq!(describe(&other), "connection reset");
    }
}

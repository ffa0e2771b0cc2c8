//! Settings resolved from the process environment.

use codebox_error::{Error, Result};
use codebox_llm::{OpenAIProvider, ProviderConfig};
use codebox_sandbox::SandboxClient;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const COGNITORA_API_KEY: &str = "COGNITORA_API_KEY";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const CODEBOX_MODEL: &str = "CODEBOX_MODEL";

#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub cognitora_api_key: String,
    pub openai_base_url: Option<String>,
    pub model: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Both API keys are required; empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get(OPENAI_API_KEY).ok_or_else(|| Error::config_missing(OPENAI_API_KEY))?;
        let cognitora_api_key =
            get(COGNITORA_API_KEY).ok_or_else(|| Error::config_missing(COGNITORA_API_KEY))?;

        Ok(Self {
            openai_api_key,
            cognitora_api_key,
            openai_base_url: get(OPENAI_BASE_URL),
            model: get(CODEBOX_MODEL).unwrap_or_else(|| codebox_agent::DEFAULT_MODEL.to_string()),
        })
    }

    pub fn provider(&self) -> Result<OpenAIProvider> {
        let mut config = ProviderConfig::openai(&self.openai_api_key).with_model(&self.model);
        if let Some(url) = &self.openai_base_url {
            config = config.with_base_url(url);
        }
        OpenAIProvider::new(config).map_err(|e| e.into_error("config::provider"))
    }

    /// Sandbox client; base URL and timeout still come from `COGNITORA_*`.
    pub fn sandbox(&self) -> Result<SandboxClient> {
        SandboxClient::builder()
            .api_key(&self.cognitora_api_key)
            .build()
            .map_err(|e| e.into_error("config::sandbox"))
    }
}

/// What to tell the user when a required variable is missing.
pub fn missing_hint(variable: &str) -> &'static str {
    match variable {
        OPENAI_API_KEY => "Please set it: export OPENAI_API_KEY=\"your-key-here\"",
        COGNITORA_API_KEY => {
            "Get your API key at https://www.cognitora.dev/home/api-keys\nThen set it: export COGNITORA_API_KEY=\"your-key-here\""
        }
        _ => "Set it in the environment and try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebox_error::ErrorKind;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn both_keys_required() {
        let err = Settings::from_lookup(lookup(&[(COGNITORA_API_KEY, "cgk")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigMissing);
        assert!(err.context().iter().any(|(k, v)| *k == "variable" && v == OPENAI_API_KEY));

        let err = Settings::from_lookup(lookup(&[(OPENAI_API_KEY, "sk"), (COGNITORA_API_KEY, "  ")])).unwrap_err();
        assert!(err.context().iter().any(|(_, v)| v == COGNITORA_API_KEY));
    }

    #[test]
    fn defaults_and_overrides() {
        let settings = Settings::from_lookup(lookup(&[(OPENAI_API_KEY, "sk"), (COGNITORA_API_KEY, "cgk")])).unwrap();
        assert_eq!(settings.model, "gpt-4o");
        assert!(settings.openai_base_url.is_none());

        let settings = Settings::from_lookup(lookup(&[
            (OPENAI_API_KEY, "sk"),
            (COGNITORA_API_KEY, "cgk"),
            (CODEBOX_MODEL, "gpt-4o-mini"),
            (OPENAI_BASE_URL, "http://localhost:8080/v1"),
        ]))
        .unwrap();
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.openai_base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert!(settings.provider().is_ok());
    }
}

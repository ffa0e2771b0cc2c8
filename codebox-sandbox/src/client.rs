use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;

use crate::error::{error_from_status, Result, SandboxError};
use crate::types::{ExecuteRequest, ExecutionResult, Language};

const USER_AGENT_VALUE: &str = concat!("codebox/", env!("CARGO_PKG_VERSION"));
const DEFAULT_BASE_URL: &str = "https://api.cognitora.dev";
const EXECUTE_PATH: &str = "/api/v1/interpreter/execute";

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// Builder for constructing a [`SandboxClient`].
pub struct SandboxClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl SandboxClientBuilder {
    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key for Bearer authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SandboxClient> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(ref key) = self.api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|e| SandboxError::Auth(e.to_string()))?,
            );
        }

        let mut http = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(SandboxClient {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http: http.build()?,
        })
    }
}

/// Client for the code-interpreter HTTP API.
///
/// Cloning is cheap; clones share one connection pool, so a single client can
/// back every tool an agent holds.
#[derive(Clone)]
pub struct SandboxClient {
    base_url: String,
    http: reqwest::Client,
}

impl SandboxClient {
    /// Create a new builder with defaults resolved from env vars
    /// (`COGNITORA_BASE_URL`, `COGNITORA_API_KEY`, `COGNITORA_TIMEOUT_SECS`).
    pub fn builder() -> SandboxClientBuilder {
        SandboxClientBuilder {
            base_url: std::env::var("COGNITORA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("COGNITORA_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout: std::env::var("COGNITORA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs),
        }
    }

    /// Run `code` in a fresh interpreter session.
    ///
    /// A failing program is not an error here: it comes back as a result
    /// whose status is `error` or `failed`. Only transport, auth and
    /// malformed-response problems surface as [`SandboxError`].
    pub async fn execute(
        &self,
        code: &str,
        language: Language,
        networking: bool,
    ) -> Result<ExecutionResult> {
        let body = ExecuteRequest {
            code: code.to_string(),
            language,
            networking,
        };
        tracing::debug!(%language, networking, bytes = code.len(), "executing in sandbox");

        let result: ExecutionResult = self.post(EXECUTE_PATH, &body).await?;
        tracing::debug!(status = %result.status, outputs = result.outputs.len(), "sandbox execution finished");
        Ok(result)
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if status >= 400 {
            return Err(error_from_status(status, &text));
        }

        let parsed: ApiResponse<T> = serde_json::from_str(&text)?;
        match (parsed.data, parsed.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(SandboxError::Server(error)),
            (None, None) => Err(SandboxError::Server("Missing data field".to_string())),
        }
    }
}

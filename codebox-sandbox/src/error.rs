use codebox_error::{Error, ErrorKind};

/// Errors returned by the sandbox client.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// 401 Unauthorized.
    #[error("authentication error: {0}")]
    Auth(String),

    /// 404 Not Found.
    #[error("not found: {0}")]
    NotFound(String),

    /// 400 Bad Request.
    #[error("validation error: {0}")]
    Validation(String),

    /// 429 Too Many Requests.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other error status.
    #[error("server error: {0}")]
    Server(String),

    /// Network / connection error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SandboxError>;

impl SandboxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SandboxError::Auth(_) => ErrorKind::AuthenticationFailed,
            SandboxError::Validation(_) => ErrorKind::InvalidArgument,
            SandboxError::RateLimited(_) => ErrorKind::RateLimited,
            SandboxError::Network(_) => ErrorKind::NetworkFailed,
            SandboxError::Json(_) => ErrorKind::ParseFailed,
            SandboxError::NotFound(_) | SandboxError::Server(_) => ErrorKind::SandboxFailed,
        }
    }

    /// Wrap into a codebox error, keeping this error as the source
    pub fn into_error(self, operation: &'static str) -> Error {
        Error::new(self.kind(), self.to_string())
            .with_operation(operation)
            .set_source(self)
    }
}

/// Map an HTTP status + body to the appropriate error variant.
pub fn error_from_status(status: u16, body: &str) -> SandboxError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message", "detail"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|e| e.as_str().map(String::from)))
        })
        .unwrap_or_else(|| body.to_string());

    match status {
        400 => SandboxError::Validation(message),
        401 => SandboxError::Auth(message),
        404 => SandboxError::NotFound(message),
        429 => SandboxError::RateLimited(message),
        _ => SandboxError::Server(message),
    }
}

//! The main Error type for codebox

use crate::{ErrorKind, ErrorStatus};
use std::fmt;

/// The unified error type for all codebox operations.
///
/// - `kind`: What type of error occurred
/// - `message`: Human-readable description
/// - `status`: Whether the error is retryable
/// - `operation`: What operation caused the error
/// - `context`: Key-value pairs for debugging
/// - `source`: The underlying error (if any)
///
/// # Example
///
/// ```rust
/// use codebox_error::{Error, ErrorKind, ErrorStatus};
///
/// let err = Error::new(ErrorKind::SandboxFailed, "connection reset")
///     .with_operation("sandbox::execute")
///     .with_context("language", "python")
///     .with_context("networking", "false");
///
/// assert_eq!(err.kind(), ErrorKind::SandboxFailed);
/// assert_eq!(err.status(), ErrorStatus::Temporary);
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: ErrorStatus,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let status = if kind.is_retryable() {
            ErrorStatus::Temporary
        } else {
            ErrorStatus::Permanent
        };

        Self {
            kind,
            message: message.into(),
            status,
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Get the source error (if any)
    pub fn source_ref(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(source.into());
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.status.is_retryable()
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.status)?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}) at {}", self.kind, self.status, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// The only blanket conversion: local filesystem writes (CSV, downloaded charts).
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

// =============================================================================
// Convenience constructors
// =============================================================================

impl Error {
    /// A required environment variable is absent or empty
    pub fn config_missing(variable: &'static str) -> Self {
        Self::new(ErrorKind::ConfigMissing, format!("{} not set", variable))
            .with_context("variable", variable)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// The sandbox reported a failing status for the submitted code
    pub fn execution_failed(status: impl Into<String>) -> Self {
        let status = status.into();
        Self::new(ErrorKind::ExecutionFailed, format!("execution ended with status '{}'", status))
            .with_context("status", status)
    }

    pub fn transfer_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransferFailed, reason).with_context("path", path)
    }

    pub fn tool_not_found(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(ErrorKind::ToolFailed, format!("tool '{}' not found", name))
            .with_context("tool", name)
    }

    pub fn max_turns_exceeded(max_turns: usize) -> Self {
        Self::new(ErrorKind::MaxTurnsExceeded, format!("max turns ({}) exceeded", max_turns))
            .with_context("max_turns", max_turns.to_string())
    }

    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseFailed, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::ToolFailed, "tool 'plot' not found");
        assert_eq!(err.kind(), ErrorKind::ToolFailed);
        assert_eq!(err.message(), "tool 'plot' not found");
        assert_eq!(err.status(), ErrorStatus::Permanent);
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::InferenceFailed, "timeout")
            .with_operation("runner::run")
            .with_context("agent", "TaskExecutor")
            .with_context("turn", "3");

        assert_eq!(err.operation(), "runner::run");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("agent", "TaskExecutor".to_string()));
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::IoFailed, "write failed")
            .with_operation("transfer::write_local")
            .with_operation("transfer::download_file");

        assert_eq!(err.operation(), "transfer::download_file");
        assert_eq!(err.context().len(), 1);
        assert_eq!(err.context()[0], ("called", "transfer::write_local".to_string()));
    }

    #[test]
    fn test_default_status_follows_kind() {
        assert!(Error::new(ErrorKind::RateLimited, "slow down").is_retryable());
        assert!(!Error::config_missing("OPENAI_API_KEY").is_retryable());
    }

    #[test]
    fn test_display_shows_temporary_status() {
        let err = Error::new(ErrorKind::SandboxFailed, "502 Bad Gateway").with_operation("sandbox::execute");
        assert_eq!(err.status(), ErrorStatus::Temporary);
        assert_eq!(err.to_string(), "SandboxFailed (temporary) at sandbox::execute => 502 Bad Gateway");
    }

    #[test]
    fn test_display() {
        let err = Error::max_turns_exceeded(10).with_operation("runner::run");

        let display = format!("{}", err);
        assert!(display.contains("MaxTurnsExceeded"));
        assert!(display.contains("permanent"));
        assert!(display.contains("runner::run"));
        assert!(display.contains("max_turns: 10"));
    }

    #[test]
    fn test_display_without_operation() {
        let err = Error::parse_failed("invalid base64 payload");
        assert_eq!(err.to_string(), "ParseFailed (permanent) => invalid base64 payload");
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = Error::from(io_err);

        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(err.source_ref().is_some());
    }
}

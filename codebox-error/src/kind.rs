//! Error kinds for codebox operations

use std::fmt;

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to decide how to react; the message and
/// context only help humans locate the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// A required credential or setting is absent
    ConfigMissing,

    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Sandbox errors
    // =========================================================================
    /// The sandbox rejected or failed an execute request
    SandboxFailed,

    /// The sandbox ran the code but reported a failing status
    ExecutionFailed,

    /// A file could not be moved out of the sandbox
    TransferFailed,

    // =========================================================================
    // Agent runtime errors
    // =========================================================================
    /// A tool call could not be resolved or executed
    ToolFailed,

    /// The model kept calling tools past the turn limit
    MaxTurnsExceeded,

    // =========================================================================
    // Inference/LLM errors
    // =========================================================================
    /// LLM inference failed
    InferenceFailed,

    /// Provider rejected the credentials
    AuthenticationFailed,

    /// Rate limit exceeded
    RateLimited,

    // =========================================================================
    // IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    /// Network error
    NetworkFailed,

    // =========================================================================
    // Parse errors
    // =========================================================================
    /// Failed to parse input
    ParseFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            // General
            ErrorKind::ConfigMissing => "ConfigMissing",
            ErrorKind::InvalidArgument => "InvalidArgument",

            // Sandbox
            ErrorKind::SandboxFailed => "SandboxFailed",
            ErrorKind::ExecutionFailed => "ExecutionFailed",
            ErrorKind::TransferFailed => "TransferFailed",

            // Agent runtime
            ErrorKind::ToolFailed => "ToolFailed",
            ErrorKind::MaxTurnsExceeded => "MaxTurnsExceeded",

            // Inference
            ErrorKind::InferenceFailed => "InferenceFailed",
            ErrorKind::AuthenticationFailed => "AuthenticationFailed",
            ErrorKind::RateLimited => "RateLimited",

            // IO
            ErrorKind::FileNotFound => "FileNotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::IoFailed => "IoFailed",
            ErrorKind::NetworkFailed => "NetworkFailed",

            // Parse
            ErrorKind::ParseFailed => "ParseFailed",
        }
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::InferenceFailed
                | ErrorKind::NetworkFailed
                | ErrorKind::RateLimited
                | ErrorKind::SandboxFailed
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

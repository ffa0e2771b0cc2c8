use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the code interpreter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    JavaScript,
    Bash,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::JavaScript, Language::Bash];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Bash => "bash",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of an execute request.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteRequest {
    pub code: String,
    pub language: Language,
    pub networking: bool,
}

/// Lifecycle status reported for an execution.
///
/// Statuses the service may add later are kept verbatim in `Other` so they
/// can still be reported back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExecutionStatus {
    Queued,
    Running,
    Completed,
    Succeeded,
    Error,
    Failed,
    Other(String),
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ExecutionStatus::Queued => "queued",
            ExecutionStatus::Running => "running",
            ExecutionStatus::Completed => "completed",
            ExecutionStatus::Succeeded => "succeeded",
            ExecutionStatus::Error => "error",
            ExecutionStatus::Failed => "failed",
            ExecutionStatus::Other(s) => s,
        }
    }

    /// `error` and `failed` are the only statuses treated as failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionStatus::Error | ExecutionStatus::Failed)
    }
}

impl From<String> for ExecutionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "queued" => ExecutionStatus::Queued,
            "running" => ExecutionStatus::Running,
            "completed" => ExecutionStatus::Completed,
            "succeeded" => ExecutionStatus::Succeeded,
            "error" => ExecutionStatus::Error,
            "failed" => ExecutionStatus::Failed,
            _ => ExecutionStatus::Other(s),
        }
    }
}

impl From<ExecutionStatus> for String {
    fn from(status: ExecutionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stream an output item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Stdout,
    Stderr,
    /// Rich outputs (images, display data) are carried but never formatted.
    #[serde(other)]
    Other,
}

/// One captured unit of program output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub kind: OutputKind,
    #[serde(default)]
    pub data: String,
}

impl OutputItem {
    pub fn stdout(data: impl Into<String>) -> Self {
        Self { kind: OutputKind::Stdout, data: data.into() }
    }

    pub fn stderr(data: impl Into<String>) -> Self {
        Self { kind: OutputKind::Stderr, data: data.into() }
    }
}

/// Result of one execute call. Output order is the order the program wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub outputs: Vec<OutputItem>,
    #[serde(default, alias = "executionTimeMs", skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<f64>,
}

impl ExecutionResult {
    pub fn new(status: ExecutionStatus, outputs: Vec<OutputItem>) -> Self {
        Self { status, outputs, execution_time_ms: None }
    }

    pub fn with_execution_time(mut self, ms: f64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    fn lines_of(&self, kind: OutputKind) -> impl Iterator<Item = &str> {
        self.outputs
            .iter()
            .filter(move |item| item.kind == kind)
            .map(|item| item.data.as_str())
    }

    /// Stdout items, in order
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.lines_of(OutputKind::Stdout)
    }

    /// Stderr items, in order
    pub fn stderr_lines(&self) -> impl Iterator<Item = &str> {
        self.lines_of(OutputKind::Stderr)
    }

    /// All stdout items joined with newlines
    pub fn stdout_text(&self) -> String {
        self.stdout_lines().collect::<Vec<_>>().join("\n")
    }

    /// Execution time rendered without a trailing `.0`; `0` when unknown.
    pub fn execution_time_display(&self) -> String {
        match self.execution_time_ms {
            Some(ms) if ms.fract() == 0.0 => format!("{}", ms as i64),
            Some(ms) => format!("{}", ms),
            None => "0".to_string(),
        }
    }
}

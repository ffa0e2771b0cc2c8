//! Turning an execution result into the text a tool returns to the model.
//!
//! Every variant follows the same rules:
//! - a failing status is reported as a failure that names the status
//! - stdout items are kept in order, and stderr is only shown after stdout
//! - a run that printed nothing still produces a non-empty message

use std::fmt::Display;

use crate::error::Result;
use crate::types::ExecutionResult;

/// How a finished execution is summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// General purpose execution. `show_timing` adds the execution time to
    /// the empty-output message.
    Plain { show_timing: bool },
    /// Data analysis with check/cross markers.
    Analysis,
    /// Chart generation: stdout is the analysis narrative, stderr becomes a
    /// warnings section.
    Chart,
}

impl ReportStyle {
    pub fn plain() -> Self {
        ReportStyle::Plain { show_timing: true }
    }

    /// Summarize the outcome of a call, transport errors included.
    pub fn render_outcome(&self, outcome: &Result<ExecutionResult>) -> String {
        match outcome {
            Ok(result) => self.render(result),
            Err(err) => self.render_error(err),
        }
    }

    pub fn render(&self, result: &ExecutionResult) -> String {
        if result.is_failure() {
            return self.render_failure(result);
        }

        let stdout: Vec<&str> = result.stdout_lines().collect();
        let stderr: Vec<&str> = result.stderr_lines().collect();

        match self {
            ReportStyle::Plain { show_timing } => {
                let mut blocks = Vec::new();
                if !stdout.is_empty() {
                    blocks.push(stdout.join("\n"));
                }
                if !stderr.is_empty() {
                    blocks.push(format!("Errors:\n{}", stderr.join("\n")));
                }
                if !blocks.is_empty() {
                    return blocks.join("\n\n");
                }
                if *show_timing {
                    format!(
                        "Code executed successfully (status: {}, execution time: {}ms) but produced no output.",
                        result.status,
                        result.execution_time_display()
                    )
                } else {
                    format!(
                        "Code executed successfully (status: {}) but produced no output.",
                        result.status
                    )
                }
            }
            ReportStyle::Analysis => {
                if stdout.is_empty() && stderr.is_empty() {
                    return "⚠️ Code executed but no output captured. Make sure to use print() statements!"
                        .to_string();
                }
                let mut parts = stdout;
                if !stderr.is_empty() {
                    parts.push("Errors:");
                    parts.extend(stderr);
                }
                format!("✅ Analysis complete:\n{}", parts.join("\n"))
            }
            ReportStyle::Chart => {
                let mut text = if stdout.is_empty() {
                    "⚠️ Chart created but no analysis output captured.".to_string()
                } else {
                    format!("✅ Chart created successfully!\n\n{}", stdout.join("\n"))
                };
                if !stderr.is_empty() {
                    text.push_str("\n\n⚠️ Warnings/Errors:\n");
                    text.push_str(&stderr.join("\n"));
                }
                text
            }
        }
    }

    fn render_failure(&self, result: &ExecutionResult) -> String {
        match self {
            ReportStyle::Plain { .. } => format!("Execution failed with status: {}", result.status),
            ReportStyle::Analysis => format!("❌ Execution failed with status: {}", result.status),
            ReportStyle::Chart => format!("❌ Execution failed: {}", result.status),
        }
    }

    /// Summarize a call that never produced a result.
    pub fn render_error(&self, err: &dyn Display) -> String {
        match self {
            ReportStyle::Plain { .. } => format!("Error executing code: {}", err),
            ReportStyle::Analysis => format!("❌ Execution failed: {}", err),
            ReportStyle::Chart => format!("❌ Error: {}", err),
        }
    }
}

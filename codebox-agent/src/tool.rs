//! The tool seam between the runner and everything an agent can call.

use async_trait::async_trait;
use codebox_error::{Error, Result};
use codebox_llm::{ToolDefinition, UsageTracker};
use serde::de::DeserializeOwned;
use std::fmt::Display;

/// A named function the model may call.
///
/// Every call produces text. Failures are reported to the model as text
/// too, so a bad call never aborts the run.
#[async_trait(?Send)]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments object
    fn parameters(&self) -> serde_json::Value;

    async fn call(&self, arguments: serde_json::Value) -> String;

    /// Usage spent by model calls made inside the tool since the last take.
    fn take_usage(&self) -> Option<UsageTracker> {
        None
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(self.parameters())
    }
}

/// The text handed back to the model when a tool call could not run.
pub fn tool_error(err: impl Display) -> String {
    format!(
        "An error occurred while running the tool. Please try again. Error: {}",
        err
    )
}

/// Decode a tool's arguments object into its typed form.
pub fn decode_arguments<T: DeserializeOwned>(tool: &str, arguments: serde_json::Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| {
        Error::invalid_argument(format!("invalid arguments for '{}': {}", tool, e))
            .with_operation("tool::decode_arguments")
            .with_context("tool", tool)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Args {
        title: String,
    }

    #[test]
    fn decode_reports_missing_fields() {
        let err = decode_arguments::<Args>("save_finding", serde_json::json!({})).unwrap_err();
        assert!(err.message().contains("save_finding"));
        assert!(err.message().contains("title"));

        let ok: Args = decode_arguments("save_finding", serde_json::json!({ "title": "t" })).unwrap();
        assert_eq!(ok.title, "t");
    }

    #[test]
    fn error_text_wording() {
        assert_eq!(
            tool_error("tool 'x' not found"),
            "An error occurred while running the tool. Please try again. Error: tool 'x' not found"
        );
    }
}

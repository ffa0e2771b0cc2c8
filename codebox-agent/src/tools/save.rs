//! Save helpers. Both are acknowledgements only: nothing is persisted.

use async_trait::async_trait;
use chrono::Local;
use serde::Deserialize;

use crate::tool::{decode_arguments, tool_error, Tool};

pub struct SaveResultTool;

#[derive(Debug, Deserialize)]
struct SaveResultArgs {
    filename: String,
    content: String,
}

impl SaveResultTool {
    pub fn acknowledge(filename: &str, content: &str) -> String {
        format!(
            "✓ Results saved to {} ({} characters)",
            filename,
            content.chars().count()
        )
    }
}

#[async_trait(?Send)]
impl Tool for SaveResultTool {
    fn name(&self) -> &str {
        "save_result"
    }

    fn description(&self) -> &str {
        "Save results to a file in the sandbox environment. Returns a confirmation message."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "filename": { "type": "string", "description": "Name of the file to save" },
                "content": { "type": "string", "description": "Content to save" }
            },
            "required": ["filename", "content"]
        })
    }

    async fn call(&self, arguments: serde_json::Value) -> String {
        match decode_arguments::<SaveResultArgs>(self.name(), arguments) {
            Ok(args) => Self::acknowledge(&args.filename, &args.content),
            Err(e) => tool_error(e.message()),
        }
    }
}

pub struct SaveFindingTool;

#[derive(Debug, Deserialize)]
struct SaveFindingArgs {
    title: String,
    #[allow(dead_code)]
    finding: String,
}

impl SaveFindingTool {
    pub fn acknowledge(title: &str, at: &chrono::DateTime<Local>) -> String {
        format!("📝 Saved finding '{}' at {}", title, at.format("%H:%M:%S"))
    }
}

#[async_trait(?Send)]
impl Tool for SaveFindingTool {
    fn name(&self) -> &str {
        "save_finding"
    }

    fn description(&self) -> &str {
        "Save an important research finding for the final report. Returns a confirmation message."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "Short title for the finding" },
                "finding": { "type": "string", "description": "The actual finding or insight" }
            },
            "required": ["title", "finding"]
        })
    }

    async fn call(&self, arguments: serde_json::Value) -> String {
        match decode_arguments::<SaveFindingArgs>(self.name(), arguments) {
            Ok(args) => Self::acknowledge(&args.title, &Local::now()),
            Err(e) => tool_error(e.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn result_counts_characters_not_bytes() {
        assert_eq!(
            SaveResultTool::acknowledge("report.md", "héllo ✓"),
            "✓ Results saved to report.md (7 characters)"
        );
    }

    #[test]
    fn finding_uses_wall_clock_time() {
        let at = Local.with_ymd_and_hms(2024, 10, 7, 9, 5, 3).unwrap();
        assert_eq!(
            SaveFindingTool::acknowledge("Growth", &at),
            "📝 Saved finding 'Growth' at 09:05:03"
        );
    }

    #[tokio::test]
    async fn calls_decode_arguments() {
        let text = SaveResultTool
            .call(serde_json::json!({ "filename": "a.txt", "content": "abc" }))
            .await;
        assert_eq!(text, "✓ Results saved to a.txt (3 characters)");

        let text = SaveFindingTool.call(serde_json::json!({ "title": "Lift" })).await;
        assert!(text.starts_with("An error occurred while running the tool."));

        let text = SaveFindingTool
            .call(serde_json::json!({ "title": "Lift", "finding": "B wins" }))
            .await;
        assert!(text.starts_with("📝 Saved finding 'Lift' at "));
    }
}

use async_trait::async_trait;
use codebox_sandbox::{Language, ReportStyle, SandboxClient};
use serde::Deserialize;

use crate::tool::{decode_arguments, tool_error, Tool};

const BASIC_DESCRIPTION: &str = "Execute code in a secure sandbox environment. \
CRITICAL: you MUST use print() (Python), console.log() (JavaScript) or echo (Bash) \
to display ALL results. Code that doesn't print anything returns no output! \
Returns the execution result including output and any errors.";

const NETWORK_DESCRIPTION: &str = "Execute code with NETWORKING ENABLED to fetch real \
data from the internet. Returns the execution result including output and any errors.";

const ANALYSIS_DESCRIPTION: &str = "Execute Python code for data analysis in a secure \
sandbox. Use this for data processing, calculations and statistics. \
CRITICAL: you MUST use print() statements to display ALL results! \
Code without print() will execute but show no output. Returning a value from a \
function does not display it; print it instead.";

/// Forwards model-written code to the sandbox and reports the result as text.
///
/// The networking flag is fixed per instance and never exposed to the model.
pub struct ExecuteCodeTool {
    client: SandboxClient,
    name: &'static str,
    description: &'static str,
    networking: bool,
    style: ReportStyle,
    python_only: bool,
}

#[derive(Debug, Deserialize)]
struct ExecuteArgs {
    code: String,
    #[serde(default)]
    language: Option<Language>,
}

impl ExecuteCodeTool {
    /// `execute_code`: any language, networking off.
    pub fn basic(client: SandboxClient) -> Self {
        Self {
            client,
            name: "execute_code",
            description: BASIC_DESCRIPTION,
            networking: false,
            style: ReportStyle::Plain { show_timing: true },
            python_only: false,
        }
    }

    /// `execute_code_with_network`: any language, networking on.
    pub fn with_network(client: SandboxClient) -> Self {
        Self {
            client,
            name: "execute_code_with_network",
            description: NETWORK_DESCRIPTION,
            networking: true,
            style: ReportStyle::Plain { show_timing: false },
            python_only: false,
        }
    }

    /// `execute_python_analysis`: Python only, networking off.
    pub fn python_analysis(client: SandboxClient) -> Self {
        Self {
            client,
            name: "execute_python_analysis",
            description: ANALYSIS_DESCRIPTION,
            networking: false,
            style: ReportStyle::Analysis,
            python_only: true,
        }
    }
}

#[async_trait(?Send)]
impl Tool for ExecuteCodeTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters(&self) -> serde_json::Value {
        if self.python_only {
            return serde_json::json!({
                "type": "object",
                "properties": {
                    "code": {
                        "type": "string",
                        "description": "Python code to execute (MUST include print() statements!)"
                    }
                },
                "required": ["code"]
            });
        }

        let languages: Vec<&str> = Language::ALL.iter().map(|l| l.as_str()).collect();
        serde_json::json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The code to execute (MUST include print/console.log/echo statements!)"
                },
                "language": {
                    "type": "string",
                    "enum": languages,
                    "description": "Programming language. Default: python"
                }
            },
            "required": ["code"]
        })
    }

    async fn call(&self, arguments: serde_json::Value) -> String {
        let args: ExecuteArgs = match decode_arguments(self.name, arguments) {
            Ok(args) => args,
            Err(e) => return tool_error(e.message()),
        };
        let language = if self.python_only {
            Language::Python
        } else {
            args.language.unwrap_or_default()
        };

        let outcome = self.client.execute(&args.code, language, self.networking).await;
        if let Err(e) = &outcome {
            tracing::warn!(tool = self.name, error = %e, "sandbox call failed");
        }
        self.style.render_outcome(&outcome)
    }
}

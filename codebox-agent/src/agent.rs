//! Agent definition and agents-as-tools.

use async_trait::async_trait;
use codebox_llm::{LlmProvider, ToolDefinition, UsageTracker};
use serde::Deserialize;
use std::sync::{Arc, Mutex};

use crate::runner::Runner;
use crate::tool::{decode_arguments, tool_error, Tool};

pub const DEFAULT_MODEL: &str = "gpt-4o";

/// A named set of instructions plus the tools the model may call.
///
/// Agents are plain data; the [`Runner`] drives them. Cloning shares the
/// registered tools.
#[derive(Clone)]
pub struct Agent {
    name: String,
    model: String,
    instructions: String,
    tools: Vec<Arc<dyn Tool>>,
}

impl Agent {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: DEFAULT_MODEL.to_string(),
            instructions: instructions.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn find_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Expose this agent as a tool another agent can call with a single
    /// `input` string. The call runs this agent to completion on `runner`.
    pub fn as_tool<P: LlmProvider + 'static>(
        &self,
        tool_name: impl Into<String>,
        tool_description: impl Into<String>,
        runner: &Runner<P>,
    ) -> AgentTool<P> {
        AgentTool {
            name: tool_name.into(),
            description: tool_description.into(),
            agent: self.clone(),
            runner: runner.clone(),
            usage: Mutex::new(UsageTracker::new()),
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("tools", &self.tools.iter().map(|t| t.name().to_string()).collect::<Vec<_>>())
            .finish()
    }
}

/// An agent wrapped as a tool; see [`Agent::as_tool`].
pub struct AgentTool<P> {
    name: String,
    description: String,
    agent: Agent,
    runner: Runner<P>,
    usage: Mutex<UsageTracker>,
}

#[derive(Debug, Deserialize)]
struct AgentToolArgs {
    input: String,
}

#[async_trait(?Send)]
impl<P: LlmProvider + 'static> Tool for AgentTool<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "input": {
                    "type": "string",
                    "description": "The task or question for this specialist"
                }
            },
            "required": ["input"]
        })
    }

    async fn call(&self, arguments: serde_json::Value) -> String {
        let args: AgentToolArgs = match decode_arguments(&self.name, arguments) {
            Ok(args) => args,
            Err(e) => return tool_error(e.message()),
        };

        tracing::debug!(tool = %self.name, agent = %self.agent.name(), "delegating to sub-agent");
        match self.runner.run(&self.agent, &args.input).await {
            Ok(result) => {
                if let Ok(mut usage) = self.usage.lock() {
                    usage.merge(&result.usage);
                }
                result.final_output
            }
            Err(e) => {
                tracing::warn!(tool = %self.name, error = %e, "sub-agent run failed");
                tool_error(e.message())
            }
        }
    }

    fn take_usage(&self) -> Option<UsageTracker> {
        let mut usage = self.usage.lock().ok()?;
        if usage.total_calls == 0 {
            return None;
        }
        Some(std::mem::take(&mut *usage))
    }
}

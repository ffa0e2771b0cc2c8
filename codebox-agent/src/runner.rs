//! Runner - drives the model <-> tool loop for one agent

use codebox_error::{Error, Result};
use codebox_llm::{ChatMessage, CompletionRequest, LlmProvider, ToolCall, UsageTracker};
use std::sync::Arc;

use crate::agent::Agent;
use crate::tool::tool_error;

pub const DEFAULT_MAX_TURNS: usize = 10;

/// Result of running an agent to completion
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The model's last answer, the one that asked for no tools
    pub final_output: String,
    /// Model turns taken
    pub turns: usize,
    /// Tool calls executed across all turns
    pub tool_calls: usize,
    /// Token usage, sub-agents included
    pub usage: UsageTracker,
}

/// Runs agents against a provider.
///
/// Cheap to clone; clones share the provider.
pub struct Runner<P> {
    provider: Arc<P>,
    max_turns: usize,
}

impl<P> Clone for Runner<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            max_turns: self.max_turns,
        }
    }
}

impl<P: LlmProvider> Runner<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Run `agent` on `input` until the model answers without calling a tool.
    ///
    /// Tool calls within a turn run sequentially, in the order the model
    /// listed them. Provider failures abort the run; tool failures do not.
    pub async fn run(&self, agent: &Agent, input: &str) -> Result<RunResult> {
        let mut messages = vec![
            ChatMessage::system(agent.instructions()),
            ChatMessage::user(input),
        ];
        let definitions = agent.tool_definitions();
        let mut usage = UsageTracker::new();
        let mut tool_calls = 0;

        for turn in 1..=self.max_turns {
            tracing::debug!(
                provider = self.provider.name(),
                agent = %agent.name(),
                turn,
                messages = messages.len(),
                "requesting completion"
            );

            let request = CompletionRequest::new(messages.clone())
                .with_model(agent.model())
                .with_tools(definitions.clone());
            let response = self
                .provider
                .complete(request)
                .await
                .map_err(|e| e.into_error("runner::run").with_context("agent", agent.name()))?;
            usage.track(&response.model, &response.usage);

            if response.tool_calls.is_empty() {
                tracing::debug!(agent = %agent.name(), turn, tool_calls, "agent finished");
                return Ok(RunResult {
                    final_output: response.content.unwrap_or_default(),
                    turns: turn,
                    tool_calls,
                    usage,
                });
            }

            let calls = response.tool_calls;
            messages.push(ChatMessage::assistant_tool_calls(response.content, calls.clone()));

            for call in &calls {
                let output = self.invoke(agent, call, &mut usage).await;
                messages.push(ChatMessage::tool_result(&call.id, output));
                tool_calls += 1;
            }
        }

        Err(Error::max_turns_exceeded(self.max_turns)
            .with_operation("runner::run")
            .with_context("agent", agent.name()))
    }

    async fn invoke(&self, agent: &Agent, call: &ToolCall, usage: &mut UsageTracker) -> String {
        let Some(tool) = agent.find_tool(&call.name) else {
            tracing::warn!(agent = %agent.name(), tool = %call.name, "model called an unknown tool");
            return tool_error(Error::tool_not_found(&call.name).message());
        };

        let arguments = match call.parse_arguments::<serde_json::Value>() {
            Ok(arguments) => arguments,
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "undecodable tool arguments");
                return tool_error(e);
            }
        };

        tracing::debug!(tool = %call.name, "calling tool");
        let output = tool.call(arguments).await;
        if let Some(spent) = tool.take_usage() {
            usage.merge(&spent);
        }
        output
    }
}

//! # Codebox Agent
//!
//! The agent orchestrates the model <-> sandbox loop:
//! 1. The caller hands an agent and a task to the [`Runner`]
//! 2. The model answers with text, or asks for one or more tool calls
//! 3. Each tool call runs in order; code tools forward to the sandbox
//! 4. Tool results go back to the model and the loop continues
//! 5. The first answer without tool calls is the final output
//!
//! The model is the brain, the sandbox is the body.

mod agent;
mod runner;
mod tool;
pub mod tools;

pub use agent::{Agent, AgentTool, DEFAULT_MODEL};
pub use runner::{RunResult, Runner, DEFAULT_MAX_TURNS};
pub use tool::{decode_arguments, tool_error, Tool};

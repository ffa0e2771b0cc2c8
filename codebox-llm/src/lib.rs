//! # codebox-llm
//!
//! The model side of a codebox agent: a trait-based chat-completion interface
//! with function/tool calling, plus an OpenAI-compatible implementation.
//!
//! ## Core Concepts
//! - **Messages**: system / user / assistant / tool turns of a conversation
//! - **Tool definitions**: JSON-schema described functions the model may call
//! - **Provider**: `LlmProvider` trait, implemented by `OpenAIProvider`
//! - **Usage**: per-model token accounting across a run

pub mod provider;

pub use provider::{
    LlmProvider, ProviderConfig, ProviderError,
    ChatMessage, Role, CompletionRequest, CompletionResponse,
    ToolDefinition, ToolCall,
    FinishReason, Usage, UsageTracker,
    OpenAIProvider,
};

//! Agent definition and turn execution.
//!
//! An agent is a named configuration: a model, an instruction, and the tools
//! it may call. The [`Runner`] executes chat turns against that
//! configuration, keeping per-session conversation history in memory.

mod runner;

pub use runner::{Runner, SessionStore};

use crate::config::Config;
use crate::llm::RetryConfig;

/// Configuration of a single conversational agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub name: String,
    /// Model identifier (e.g. "gemini-2.5-flash-lite")
    pub model: String,
    pub description: String,
    /// System instruction sent with every turn
    pub instruction: String,
    /// Retry policy for model API calls
    pub retry: RetryConfig,
}

impl AgentConfig {
    /// The default helpful-assistant agent for this service.
    pub fn helpful_assistant(config: &Config) -> Self {
        Self {
            name: "helpful_assistant".to_string(),
            model: config.model.clone(),
            description: "A simple agent that can answer general questions.".to_string(),
            instruction: "You are a helpful assistant. Use Google Search for current info or if unsure.".to_string(),
            retry: config.retry.clone(),
        }
    }
}

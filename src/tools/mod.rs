//! Tools the agent can call during a chat turn.

mod search;

pub use search::GoogleSearch;

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::ToolDefinition;

/// A tool the model can invoke by name with JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as advertised to the model.
    fn name(&self) -> &str;

    /// Human-readable description for the model.
    fn description(&self) -> &str;

    /// JSON schema of the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Registry of available tools.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the agent's default tool set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GoogleSearch));
        registry
    }

    /// Add a tool to the registry.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Tool definitions to advertise to the model.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute the named tool.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        match self.tools.get(name) {
            Some(tool) => tool.execute(args).await,
            None => Err(anyhow::anyhow!("Unknown tool: {}", name)),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

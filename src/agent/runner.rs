//! Turn execution against a configured agent.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::llm::{ChatMessage, GeminiClient, LlmClient, Role};
use crate::tools::ToolRegistry;

use super::AgentConfig;

/// In-memory store of conversation histories, keyed by session id.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Vec<ChatMessage>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conversation history for a session; empty for an unknown id.
    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned().unwrap_or_default()
    }

    /// Append messages to a session, creating it on first use.
    pub async fn append(&self, session_id: &str, messages: Vec<ChatMessage>) {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .extend(messages);
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Executes chat turns for a single agent.
pub struct Runner {
    agent: AgentConfig,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    sessions: SessionStore,
    max_tool_rounds: usize,
}

impl Runner {
    /// Create a runner for the default agent from service configuration.
    pub fn new(config: &Config) -> Self {
        let agent = AgentConfig::helpful_assistant(config);
        let llm = Arc::new(GeminiClient::with_retry_config(
            config.api_key.clone(),
            agent.retry.clone(),
        ));
        Self::with_parts(agent, llm, ToolRegistry::with_defaults(), config.max_tool_rounds)
    }

    /// Create a runner from explicit parts (useful for testing).
    pub fn with_parts(
        agent: AgentConfig,
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        max_tool_rounds: usize,
    ) -> Self {
        Self {
            agent,
            llm,
            tools,
            sessions: SessionStore::new(),
            max_tool_rounds,
        }
    }

    /// The agent this runner executes.
    pub fn agent(&self) -> &AgentConfig {
        &self.agent
    }

    /// The runner's session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Run one chat turn and return the agent's final text.
    ///
    /// Tool calls requested by the model are executed and fed back until the
    /// model produces text, up to the configured round limit. The full
    /// exchange, tool traffic included, is appended to the session history.
    pub async fn run(&self, session_id: &str, message: &str) -> anyhow::Result<String> {
        let mut messages = vec![ChatMessage::new(Role::System, &self.agent.instruction)];
        messages.extend(self.sessions.history(session_id).await);

        let turn_start = messages.len();
        messages.push(ChatMessage::new(Role::User, message));

        let tool_defs = self.tools.definitions();

        for round in 0..self.max_tool_rounds {
            tracing::debug!(session_id, round, "Calling model");

            let response = self
                .llm
                .chat_completion(&self.agent.model, &messages, Some(&tool_defs))
                .await?;

            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content.clone(),
                        tool_calls: Some(tool_calls.clone()),
                        tool_name: None,
                    });

                    for call in tool_calls {
                        tracing::info!(tool = %call.name, "Executing tool call");

                        let output = match self.tools.execute(&call.name, call.arguments.clone()).await
                        {
                            Ok(output) => output,
                            Err(e) => format!("Error: {}", e),
                        };

                        messages.push(ChatMessage::tool_result(call.name.clone(), output));
                    }

                    continue;
                }
            }

            if let Some(content) = response.content {
                messages.push(ChatMessage::new(Role::Assistant, &content));
                self.sessions
                    .append(session_id, messages.split_off(turn_start))
                    .await;
                return Ok(content);
            }

            return Err(anyhow::anyhow!("Model returned an empty response"));
        }

        Err(anyhow::anyhow!(
            "No final response after {} tool rounds",
            self.max_tool_rounds
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    use crate::llm::{ChatResponse, ToolCall, ToolDefinition};
    use crate::tools::Tool;

    /// Replays a fixed script of responses and records the requests it saw.
    struct ScriptedLlm {
        responses: Mutex<Vec<ChatResponse>>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedLlm {
        fn new(mut responses: Vec<ChatResponse>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            messages: &[ChatMessage],
            _tools: Option<&[ToolDefinition]>,
        ) -> anyhow::Result<ChatResponse> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }
    }

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input"
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }

        async fn execute(&self, args: Value) -> anyhow::Result<String> {
            Ok(format!("echo: {}", args["text"].as_str().unwrap_or("")))
        }
    }

    fn text_response(text: &str) -> ChatResponse {
        ChatResponse {
            content: Some(text.to_string()),
            tool_calls: None,
            finish_reason: Some("STOP".to_string()),
            usage: None,
        }
    }

    fn tool_response(name: &str, args: Value) -> ChatResponse {
        ChatResponse {
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call-1".to_string(),
                name: name.to_string(),
                arguments: args,
            }]),
            finish_reason: None,
            usage: None,
        }
    }

    fn test_runner(responses: Vec<ChatResponse>) -> (Runner, Arc<ScriptedLlm>) {
        let llm = Arc::new(ScriptedLlm::new(responses));
        let agent = AgentConfig {
            name: "helpful_assistant".to_string(),
            model: "gemini-2.5-flash-lite".to_string(),
            description: "test".to_string(),
            instruction: "Be helpful.".to_string(),
            retry: crate::llm::RetryConfig::default(),
        };
        let mut tools = ToolRegistry::new();
        tools.register(Box::new(EchoTool));
        let runner = Runner::with_parts(agent, llm.clone(), tools, 4);
        (runner, llm)
    }

    #[tokio::test]
    async fn test_plain_text_turn() {
        let (runner, llm) = test_runner(vec![text_response("42")]);

        let answer = runner.run("s1", "What is the answer?").await.unwrap();
        assert_eq!(answer, "42");

        // System instruction then user message
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0][0].role, Role::System);
        assert_eq!(seen[0][1].content.as_deref(), Some("What is the answer?"));
    }

    #[tokio::test]
    async fn test_tool_round_trip() {
        let (runner, llm) = test_runner(vec![
            tool_response("echo", json!({"text": "hi"})),
            text_response("the tool said hi"),
        ]);

        let answer = runner.run("s1", "use the tool").await.unwrap();
        assert_eq!(answer, "the tool said hi");

        // Second request carries the assistant tool call and the tool result
        let seen = llm.seen.lock().unwrap();
        let second = &seen[1];
        let tool_msg = second.iter().find(|m| m.role == Role::Tool).unwrap();
        assert_eq!(tool_msg.tool_name.as_deref(), Some("echo"));
        assert_eq!(tool_msg.content.as_deref(), Some("echo: hi"));
    }

    #[tokio::test]
    async fn test_unknown_tool_feeds_error_back() {
        let (runner, llm) = test_runner(vec![
            tool_response("missing_tool", json!({})),
            text_response("could not do that"),
        ]);

        let answer = runner.run("s1", "go").await.unwrap();
        assert_eq!(answer, "could not do that");

        let seen = llm.seen.lock().unwrap();
        let tool_msg = seen[1].iter().find(|m| m.role == Role::Tool).unwrap();
        assert!(tool_msg.content.as_deref().unwrap().contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_tool_round_limit() {
        let (runner, _llm) = test_runner(vec![
            tool_response("echo", json!({"text": "1"})),
            tool_response("echo", json!({"text": "2"})),
            tool_response("echo", json!({"text": "3"})),
            tool_response("echo", json!({"text": "4"})),
        ]);

        let err = runner.run("s1", "loop forever").await.unwrap_err();
        assert!(err.to_string().contains("tool rounds"));
    }

    #[tokio::test]
    async fn test_sessions_keep_separate_history() {
        let (runner, llm) = test_runner(vec![
            text_response("first"),
            text_response("second"),
            text_response("third"),
        ]);

        runner.run("a", "hello from a").await.unwrap();
        runner.run("b", "hello from b").await.unwrap();
        runner.run("a", "again from a").await.unwrap();

        let seen = llm.seen.lock().unwrap();
        // Session b saw nothing of session a
        assert_eq!(seen[1].len(), 2);
        // Third call replays session a's first exchange
        let third = &seen[2];
        assert_eq!(third.len(), 4);
        assert_eq!(third[1].content.as_deref(), Some("hello from a"));
        assert_eq!(third[2].content.as_deref(), Some("first"));
        assert_eq!(third[3].content.as_deref(), Some("again from a"));
    }

    #[tokio::test]
    async fn test_session_store_tracks_live_sessions() {
        let (runner, _llm) = test_runner(vec![text_response("a"), text_response("b")]);
        assert!(runner.sessions().is_empty().await);

        runner.run("s1", "hi").await.unwrap();
        runner.run("s2", "hi").await.unwrap();

        assert_eq!(runner.sessions().len().await, 2);
    }

    #[tokio::test]
    async fn test_empty_response_is_an_error() {
        let (runner, _llm) = test_runner(vec![ChatResponse {
            content: None,
            tool_calls: None,
            finish_reason: None,
            usage: None,
        }]);

        let err = runner.run("s1", "hi").await.unwrap_err();
        assert!(err.to_string().contains("empty response"));
    }
}

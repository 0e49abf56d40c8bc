//! Gemini API client implementation with automatic retry for transient errors.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};

use super::error::{classify_http_status, LlmError, LlmErrorKind, RetryConfig};
use super::{ChatMessage, ChatResponse, LlmClient, Role, TokenUsage, ToolCall, ToolDefinition};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client with automatic retry for transient errors.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    retry_config: RetryConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with default retry configuration.
    pub fn new(api_key: String) -> Self {
        Self::with_retry_config(api_key, RetryConfig::default())
    }

    /// Create a new Gemini client with custom retry configuration.
    pub fn with_retry_config(api_key: String, retry_config: RetryConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: GEMINI_API_URL.to_string(),
            api_key,
            retry_config,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parse Retry-After header if present (seconds form only).
    fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
        headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok().map(Duration::from_secs))
    }

    /// Create an LlmError from HTTP response status and body.
    fn create_error(
        status: reqwest::StatusCode,
        body: &str,
        retry_after: Option<Duration>,
    ) -> LlmError {
        let status_code = status.as_u16();
        match classify_http_status(status_code) {
            LlmErrorKind::RateLimited => LlmError::rate_limited(body.to_string(), retry_after),
            LlmErrorKind::ClientError => LlmError::client_error(status_code, body.to_string()),
            _ => LlmError::server_error(status_code, body.to_string()),
        }
    }

    /// Execute a single request without retry.
    async fn execute_request(
        &self,
        model: &str,
        body: &serde_json::Value,
    ) -> Result<ChatResponse, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let response = match self.client.post(&url).json(body).send().await {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    return Err(LlmError::network_error(format!("Request timeout: {}", e)));
                } else if e.is_connect() {
                    return Err(LlmError::network_error(format!("Connection failed: {}", e)));
                } else {
                    return Err(LlmError::network_error(format!("Request failed: {}", e)));
                }
            }
        };

        let status = response.status();
        let retry_after = Self::parse_retry_after(response.headers());
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(Self::create_error(status, &text, retry_after));
        }

        parse_response(&text)
    }

    /// Execute a request with automatic retry for transient errors.
    async fn execute_with_retry(
        &self,
        model: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<ChatResponse> {
        let start = Instant::now();
        let mut attempt = 0;

        loop {
            match self.execute_request(model, body).await {
                Ok(response) => {
                    if attempt > 0 {
                        tracing::info!(
                            "Request succeeded after {} retries (total time: {:?})",
                            attempt,
                            start.elapsed()
                        );
                    }
                    return Ok(response);
                }
                Err(error) => {
                    let should_retry = self.retry_config.should_retry(&error)
                        && attempt + 1 < self.retry_config.attempts;

                    if !should_retry {
                        if attempt > 0 {
                            tracing::error!(
                                "Request failed after {} retries (total time: {:?}): {}",
                                attempt,
                                start.elapsed(),
                                error
                            );
                        } else {
                            tracing::error!("Request failed (non-retryable): {}", error);
                        }
                        return Err(anyhow::anyhow!("{}", error));
                    }

                    let delay = self.retry_config.suggested_delay(&error, attempt);
                    let remaining = self
                        .retry_config
                        .max_retry_duration
                        .saturating_sub(start.elapsed());
                    let actual_delay = delay.min(remaining);

                    if actual_delay.is_zero() {
                        tracing::warn!(
                            "Retry attempt {} failed, no time remaining: {}",
                            attempt + 1,
                            error
                        );
                        return Err(anyhow::anyhow!("{}", error));
                    }

                    tracing::warn!(
                        "Retry attempt {} failed with {}, retrying in {:?}: {}",
                        attempt + 1,
                        error.kind,
                        actual_delay,
                        error.message
                    );

                    tokio::time::sleep(actual_delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> anyhow::Result<ChatResponse> {
        let body = build_request_body(messages, tools);

        tracing::debug!("Sending request to Gemini: model={}", model);

        self.execute_with_retry(model, &body).await
    }
}

/// Build a `generateContent` request body from chat messages.
///
/// System messages become the `systemInstruction`; user/assistant messages
/// become `contents` entries with roles `user`/`model`; tool results become
/// `functionResponse` parts under the `function` role.
fn build_request_body(
    messages: &[ChatMessage],
    tools: Option<&[ToolDefinition]>,
) -> serde_json::Value {
    let mut system_instruction = None;
    let mut contents = Vec::new();

    for msg in messages {
        match msg.role {
            Role::System => {
                system_instruction = Some(json!({
                    "parts": [{"text": msg.content.clone().unwrap_or_default()}]
                }));
            }
            Role::User => {
                contents.push(json!({
                    "role": "user",
                    "parts": [{"text": msg.content.clone().unwrap_or_default()}],
                }));
            }
            Role::Assistant => {
                let mut parts = Vec::new();
                if let Some(text) = &msg.content {
                    if !text.is_empty() {
                        parts.push(json!({"text": text}));
                    }
                }
                if let Some(tool_calls) = &msg.tool_calls {
                    for call in tool_calls {
                        parts.push(json!({
                            "functionCall": {
                                "name": call.name,
                                "args": call.arguments,
                            }
                        }));
                    }
                }
                if !parts.is_empty() {
                    contents.push(json!({"role": "model", "parts": parts}));
                }
            }
            Role::Tool => {
                contents.push(json!({
                    "role": "function",
                    "parts": [{
                        "functionResponse": {
                            "name": msg.tool_name.clone().unwrap_or_default(),
                            "response": {
                                "output": msg.content.clone().unwrap_or_default(),
                            },
                        }
                    }],
                }));
            }
        }
    }

    let mut body = json!({ "contents": contents });
    let obj = body.as_object_mut().unwrap();

    if let Some(sys) = system_instruction {
        obj.insert("systemInstruction".into(), sys);
    }

    if let Some(tools) = tools {
        if !tools.is_empty() {
            let fn_decls: Vec<serde_json::Value> = tools
                .iter()
                .map(|t| {
                    json!({
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.parameters,
                    })
                })
                .collect();
            obj.insert("tools".into(), json!([{"functionDeclarations": fn_decls}]));
        }
    }

    body
}

/// Parse a `generateContent` response body.
fn parse_response(body: &str) -> Result<ChatResponse, LlmError> {
    let parsed: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        LlmError::parse_error(format!("Failed to parse response: {}, body: {}", e, body))
    })?;

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::parse_error("No candidates in response".to_string()))?;

    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for part in candidate.content.parts {
        if let Some(t) = part.text {
            text.push_str(&t);
        }
        if let Some(fc) = part.function_call {
            tool_calls.push(ToolCall {
                id: uuid::Uuid::new_v4().to_string(),
                name: fc.name,
                arguments: fc.args.unwrap_or_else(|| json!({})),
            });
        }
    }

    Ok(ChatResponse {
        content: if text.is_empty() { None } else { Some(text) },
        tool_calls: if tool_calls.is_empty() {
            None
        } else {
            Some(tool_calls)
        },
        finish_reason: candidate.finish_reason,
        usage: parsed.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        }),
    })
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: GeminiContent,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Deserialize)]
struct GeminiFunctionCall {
    name: String,
    args: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    #[serde(default)]
    total_token_count: u64,
}

//! API request and response types.

use serde::{Deserialize, Serialize};

fn default_session_id() -> String {
    "web_session".to_string()
}

/// A chat message from the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    pub message: String,

    /// Conversation identifier; requests sharing an id share history
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

/// The agent's reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// The agent's final text
    pub response: String,

    /// Echo of the request's session id
    pub session_id: String,
}

/// Error payload returned with HTTP 500.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Model the agent is configured with
    pub model: String,

    /// Number of live chat sessions
    pub sessions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_default_session_id() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert_eq!(req.session_id, "web_session");
    }

    #[test]
    fn test_chat_request_explicit_session_id() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "hi", "session_id": "abc"}"#).unwrap();
        assert_eq!(req.session_id, "abc");
    }
}

//! # Gemini Agent
//!
//! A minimal conversational agent on the Gemini API.
//!
//! This library provides:
//! - A single configured agent (instruction, search tool, retry policy)
//! - A web chat UI served over HTTP
//! - A terminal chat loop (see the `gemini-agent-chat` binary)
//!
//! ## Architecture
//!
//! 1. A message arrives from the terminal or the `/api/chat` endpoint
//! 2. The runner builds the conversation (instruction + session history)
//! 3. Gemini is called; requested `google_search` calls are executed and
//!    their results fed back until the model produces text
//! 4. The final text is returned and the session history updated
//!
//! ## Example
//!
//! ```rust,ignore
//! use gemini_agent::{agent::Runner, config::Config};
//!
//! let config = Config::from_env()?;
//! let runner = Runner::new(&config);
//! let reply = runner.run("cli", "What's the weather in Tokyo?").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;

pub use agent::{AgentConfig, Runner};
pub use config::Config;

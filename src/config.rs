//! Configuration for the agent service.
//!
//! Configuration is read from environment variables:
//! - `GOOGLE_API_KEY` - Required. API key for the Gemini API.
//! - `GEMINI_MODEL` - Optional. Model identifier. Defaults to `gemini-2.5-flash-lite`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `RETRY_ATTEMPTS` - Optional. Retry attempts for transient API errors. Defaults to `5`.
//! - `RETRY_EXP_BASE` - Optional. Exponential backoff base. Defaults to `7`.
//! - `RETRY_INITIAL_DELAY_SECS` - Optional. First backoff delay. Defaults to `1`.
//! - `MAX_TOOL_ROUNDS` - Optional. Maximum tool-call rounds per turn. Defaults to `8`.
//!
//! A local `.env` file may hold the API key as a `GOOGLE_API_KEY=...` line;
//! [`load_env_file`] copies it into the process environment before
//! [`Config::from_env`] runs.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::llm::RetryConfig;

/// The only key recognized in a `.env` file.
const ENV_FILE_KEY: &str = "GOOGLE_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub api_key: String,

    /// Model identifier (e.g. "gemini-2.5-flash-lite")
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Retry policy for Gemini API calls
    pub retry: RetryConfig,

    /// Maximum tool-call rounds in a single chat turn
    pub max_tool_rounds: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GOOGLE_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))?;

        let model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-2.5-flash-lite".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let attempts = parse_or_default("RETRY_ATTEMPTS", 5)?;
        let exp_base = parse_or_default("RETRY_EXP_BASE", 7.0)?;
        let initial_delay_secs: u64 = parse_or_default("RETRY_INITIAL_DELAY_SECS", 1)?;

        let max_tool_rounds = parse_or_default("MAX_TOOL_ROUNDS", 8)?;

        let retry = RetryConfig {
            attempts,
            exp_base,
            initial_delay: Duration::from_secs(initial_delay_secs),
            ..RetryConfig::default()
        };

        Ok(Self {
            api_key,
            model,
            host,
            port,
            retry,
            max_tool_rounds,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            host: "127.0.0.1".to_string(),
            port: 8000,
            retry: RetryConfig::default(),
            max_tool_rounds: 8,
        }
    }
}

fn parse_or_default<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}

/// Copy `GOOGLE_API_KEY` from a `.env` file into the process environment.
///
/// The file holds `KEY=value` lines; only the first `GOOGLE_API_KEY` line is
/// used and its value is trimmed. A missing file is not an error; when the
/// file has the key, its value replaces any existing environment variable.
pub fn load_env_file(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let contents = std::fs::read_to_string(path)?;
    for line in contents.lines() {
        if let Some(value) = line.strip_prefix("GOOGLE_API_KEY=") {
            std::env::set_var(ENV_FILE_KEY, value.trim());
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Tests that touch GOOGLE_API_KEY must not run concurrently.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_env(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(".env");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_env_file_only_recognizes_api_key() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(
            &dir,
            "OTHER_KEY=nope\nGOOGLE_API_KEY=abc123  \nGOOGLE_API_KEY=second\n",
        );

        std::env::remove_var("GOOGLE_API_KEY");
        load_env_file(&path).unwrap();

        assert_eq!(std::env::var("GOOGLE_API_KEY").unwrap(), "abc123");
        assert!(std::env::var("OTHER_KEY").is_err());
        std::env::remove_var("GOOGLE_API_KEY");
    }

    #[test]
    fn test_env_file_overwrites_existing_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "GOOGLE_API_KEY=from_file\n");

        std::env::set_var("GOOGLE_API_KEY", "from_env");
        load_env_file(&path).unwrap();

        assert_eq!(std::env::var("GOOGLE_API_KEY").unwrap(), "from_file");
        std::env::remove_var("GOOGLE_API_KEY");
    }

    #[test]
    fn test_env_file_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        load_env_file(&dir.path().join("does-not-exist")).unwrap();
    }

    #[test]
    fn test_config_new_defaults() {
        let config = Config::new("key".to_string(), "gemini-2.5-flash-lite".to_string());
        assert_eq!(config.port, 8000);
        assert_eq!(config.retry.attempts, 5);
        assert_eq!(config.max_tool_rounds, 8);
    }
}

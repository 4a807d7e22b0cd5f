//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. A `.env` file is honoured by `main` before this
//! module reads the environment.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Default upstream base URL (OpenAI-compatible)
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat-completion model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream completion API configuration
    pub llm: LlmConfig,
    /// Conversation handling configuration
    pub chat: ChatConfig,
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
    /// Session secret key (read and redacted; no cookie sessions are issued)
    pub session_secret: Option<String>,
}

/// Upstream completion API configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// API key; `None` means the relay answers with the offline apology
    pub api_key: Option<String>,
    /// Base URL, without the trailing `/chat/completions`
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Conversation handling configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Number of most recent turns kept per conversation
    pub history_limit: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 150,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { history_limit: 10 }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let llm_defaults = LlmConfig::default();
        Self {
            server: ServerConfig {
                port: parse_var("PORT").unwrap_or(5000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                session_secret: non_empty_var("SECRET_KEY"),
            },
            llm: LlmConfig {
                api_key: non_empty_var("OPENAI_API_KEY"),
                base_url: env::var("OPENAI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(llm_defaults.base_url),
                model: non_empty_var("OPENAI_MODEL").unwrap_or(llm_defaults.model),
                max_tokens: parse_var("OPENAI_MAX_TOKENS").unwrap_or(llm_defaults.max_tokens),
                temperature: parse_var("OPENAI_TEMPERATURE").unwrap_or(llm_defaults.temperature),
                timeout_secs: parse_var("UPSTREAM_TIMEOUT_SECS")
                    .unwrap_or(llm_defaults.timeout_secs),
            },
            chat: ChatConfig {
                history_limit: parse_var("HISTORY_LIMIT")
                    .filter(|limit| *limit > 0)
                    .unwrap_or(ChatConfig::default().history_limit),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn redact(secret: &Option<String>) -> &'static str {
    if secret.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

// Secrets never reach the logs: `main` prints the whole config at startup.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("session_secret", &redact(&self.session_secret))
            .finish()
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_defaults() {
        let llm = LlmConfig::default();
        assert!(llm.api_key.is_none());
        assert_eq!(llm.model, "gpt-4o-mini");
        assert_eq!(llm.max_tokens, 150);
        assert_eq!(llm.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(ChatConfig::default().history_limit, 10);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let llm = LlmConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..LlmConfig::default()
        };
        let server = ServerConfig {
            port: 5000,
            host: "127.0.0.1".to_string(),
            session_secret: Some("hunter2".to_string()),
        };
        let rendered = format!("{:?} {:?}", llm, server);
        assert!(!rendered.contains("sk-very-secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<set>"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server: ServerConfig {
                port: 8081,
                host: "127.0.0.1".to_string(),
                session_secret: None,
            },
            llm: LlmConfig::default(),
            chat: ChatConfig::default(),
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8081");
    }
}

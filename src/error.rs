//! Error handling for the trainer
//!
//! A single error type for the library and the CLI, with context-rich,
//! actionable messages. Scoring mistakes are not errors: they surface as
//! feedback reasons. Only misuse of the session API, configuration problems
//! and chart feed failures end up here.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::feed::FeedError;

#[derive(Debug)]
pub enum ReflexError {
    // Configuration errors
    ConfigNotFound(String),
    ConfigParse(String),
    ConfigValidation(String),

    // Session errors
    NoActiveSession,
    SessionInProgress(String),
    InvalidSubmission(String, String), // (mode, submission kind)

    // Chart feed errors
    FeedConnection(String),
    FeedTimeout(String),
    FeedStatus(u16),
    FeedParse(String),

    // IO errors
    FileNotFound(String),
    FileRead(String),
    FileWrite(String),

    // General errors
    Internal(String),
}

impl ReflexError {
    /// Get a user-friendly error message with helpful context
    pub fn user_message(&self) -> String {
        match self {
            ReflexError::ConfigNotFound(path) => {
                format!(
                    "Configuration file not found: {}\n\n\
                    💡 Quick fix:\n\
                    1. Run: reflex init\n\
                    2. Adjust time limits or scoring if you like\n\
                    3. Try again",
                    path
                )
            }
            ReflexError::ConfigValidation(msg) => {
                format!(
                    "Configuration validation error: {}\n\n\
                    💡 Check the config file for:\n\
                    - Positive time limits and scenario counts\n\
                    - A positive min_reward_risk\n\
                    - A non-empty feed base_url",
                    msg
                )
            }
            ReflexError::FeedConnection(msg) | ReflexError::FeedTimeout(msg) => {
                format!(
                    "Chart server unreachable: {}\n\n\
                    💡 Try:\n\
                    1. Start the chart data server\n\
                    2. Check feed.base_url in the config\n\
                    3. Showing fallback data meanwhile",
                    msg
                )
            }
            ReflexError::SessionInProgress(mode) => {
                format!(
                    "A {} session is already running\n\n\
                    💡 Finish it or return home before starting another",
                    mode
                )
            }
            _ => self.to_string(),
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReflexError::FeedConnection(_)
                | ReflexError::FeedTimeout(_)
                | ReflexError::FeedStatus(500..=599)
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ReflexError::ConfigNotFound(_)
            | ReflexError::ConfigParse(_)
            | ReflexError::ConfigValidation(_) => "config",

            ReflexError::NoActiveSession
            | ReflexError::SessionInProgress(_)
            | ReflexError::InvalidSubmission(_, _) => "session",

            ReflexError::FeedConnection(_)
            | ReflexError::FeedTimeout(_)
            | ReflexError::FeedStatus(_)
            | ReflexError::FeedParse(_) => "feed",

            ReflexError::FileNotFound(_)
            | ReflexError::FileRead(_)
            | ReflexError::FileWrite(_) => "io",

            ReflexError::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for ReflexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflexError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path)
            }
            ReflexError::ConfigParse(msg) => {
                write!(f, "Failed to parse configuration: {}", msg)
            }
            ReflexError::ConfigValidation(msg) => {
                write!(f, "Configuration validation failed: {}", msg)
            }

            ReflexError::NoActiveSession => {
                write!(f, "No training session is running")
            }
            ReflexError::SessionInProgress(mode) => {
                write!(f, "A {} session is already running", mode)
            }
            ReflexError::InvalidSubmission(mode, kind) => {
                write!(f, "Cannot submit a {} answer to a {} scenario", kind, mode)
            }

            ReflexError::FeedConnection(msg) => {
                write!(f, "Chart feed connection failed: {}", msg)
            }
            ReflexError::FeedTimeout(msg) => {
                write!(f, "Chart feed timed out: {}", msg)
            }
            ReflexError::FeedStatus(status) => {
                write!(f, "HTTP error! status: {}", status)
            }
            ReflexError::FeedParse(msg) => {
                write!(f, "Chart feed returned malformed data: {}", msg)
            }

            ReflexError::FileNotFound(path) => {
                write!(f, "File not found: {}", path)
            }
            ReflexError::FileRead(msg) => {
                write!(f, "File read error: {}", msg)
            }
            ReflexError::FileWrite(msg) => {
                write!(f, "File write error: {}", msg)
            }

            ReflexError::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ReflexError {}

// Conversion implementations for common error types

impl From<io::Error> for ReflexError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ReflexError::FileNotFound(err.to_string()),
            io::ErrorKind::PermissionDenied => ReflexError::FileRead(err.to_string()),
            _ => ReflexError::Internal(format!("IO error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for ReflexError {
    fn from(err: serde_json::Error) -> Self {
        ReflexError::FeedParse(format!("JSON parse error: {}", err))
    }
}

impl From<toml::de::Error> for ReflexError {
    fn from(err: toml::de::Error) -> Self {
        ReflexError::ConfigParse(format!("TOML parse error: {}", err))
    }
}

impl From<reqwest::Error> for ReflexError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::from(err).into()
    }
}

impl From<ConfigError> for ReflexError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileRead(msg) => ReflexError::FileRead(msg),
            ConfigError::FileWrite(msg) => ReflexError::FileWrite(msg),
            ConfigError::Parse(msg) => ReflexError::ConfigParse(msg),
            ConfigError::Serialize(msg) => ReflexError::Internal(msg),
            ConfigError::Validation(msg) => ReflexError::ConfigValidation(msg),
        }
    }
}

impl From<FeedError> for ReflexError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Network(msg) => ReflexError::FeedConnection(msg),
            FeedError::Timeout(msg) => ReflexError::FeedTimeout(msg),
            FeedError::Http(status) => ReflexError::FeedStatus(status),
            FeedError::Parse(msg) => ReflexError::FeedParse(msg),
        }
    }
}

impl From<String> for ReflexError {
    fn from(msg: String) -> Self {
        ReflexError::Internal(msg)
    }
}

impl From<&str> for ReflexError {
    fn from(msg: &str) -> Self {
        ReflexError::Internal(msg.to_string())
    }
}

/// Result type alias using ReflexError
pub type ReflexResult<T> = Result<T, ReflexError>;

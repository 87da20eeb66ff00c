use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for exhide
#[derive(Error, Debug)]
pub enum ExhideError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings file error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Registry error at {path}: {source}")]
    Registry { path: PathBuf, source: io::Error },

    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Cannot {action} while service is {from}")]
    InvalidTransition { from: String, action: String },

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

/// Result type alias for exhide
pub type Result<T> = std::result::Result<T, ExhideError>;

impl ExhideError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ExhideError::Config(msg.into())
    }

    /// Wrap an IO error raised while touching the registry file
    pub fn registry<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        ExhideError::Registry {
            path: path.into(),
            source,
        }
    }

    pub fn pattern<P: Into<String>, M: Into<String>>(pattern: P, message: M) -> Self {
        ExhideError::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn invalid_transition<F: ToString, A: Into<String>>(from: F, action: A) -> Self {
        ExhideError::InvalidTransition {
            from: from.to_string(),
            action: action.into(),
        }
    }

    pub fn scheduler<S: Into<String>>(msg: S) -> Self {
        ExhideError::Scheduler(msg.into())
    }
}

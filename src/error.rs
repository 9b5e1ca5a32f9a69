//! Menu error types so recoverable input problems stay separate from fatal I/O.

use std::io;

use thiserror::Error;

/// Reasons a raw value could not be stored in an option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("'{input}' is not a valid number")]
    NotANumber { input: String },
    #[error("'{input}' is not a valid yes/no value")]
    NotABool { input: String },
    #[error("'{input}' is not one of: {}", allowed.join(", "))]
    NotAChoice { input: String, allowed: Vec<String> },
    #[error("Error: cannot access {path}")]
    FileNotFound { path: String },
}

#[derive(Debug, Error)]
pub enum MenuError {
    /// Bad menu selection or other rejected answer; the session re-prompts.
    #[error("{0}")]
    Response(String),
    #[error("{source}")]
    Coercion {
        key: String,
        #[source]
        source: CoercionError,
    },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unknown options: {}", .0.join(", "))]
    UnknownOptions(Vec<String>),
    #[error("invalid default for option '{key}': {source}")]
    InvalidDefault {
        key: String,
        #[source]
        source: CoercionError,
    },
    #[error("option '{0}' is already defined")]
    DuplicateOption(String),
    #[error("malformed option table line: '{0}'")]
    InvalidTable(String),
    #[error("editor failed: {0}")]
    Editor(String),
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl MenuError {
    /// Whether the session loop should report this error and keep asking.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MenuError::Io(_))
    }

    pub(crate) fn response(msg: impl Into<String>) -> Self {
        MenuError::Response(msg.into())
    }
}

pub type Result<T, E = MenuError> = std::result::Result<T, E>;

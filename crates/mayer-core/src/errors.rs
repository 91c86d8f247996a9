//! Structured error types shared across the Mayer crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`MayerError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the diagram engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MayerError {
    /// Bit store errors (index bounds, sizes, parsing).
    #[error("bitmap error: {0}")]
    Bitmap(ErrorInfo),
    /// Diagram structural errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Traversal errors surfaced outside the event channel.
    #[error("traversal error: {0}")]
    Traversal(ErrorInfo),
    /// Enumeration configuration errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl MayerError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MayerError::Bitmap(info)
            | MayerError::Graph(info)
            | MayerError::Traversal(info)
            | MayerError::Config(info)
            | MayerError::Serde(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, preserving the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            MayerError::Bitmap(info) => MayerError::Bitmap(info.with_context(key, value)),
            MayerError::Graph(info) => MayerError::Graph(info.with_context(key, value)),
            MayerError::Traversal(info) => MayerError::Traversal(info.with_context(key, value)),
            MayerError::Config(info) => MayerError::Config(info.with_context(key, value)),
            MayerError::Serde(info) => MayerError::Serde(info.with_context(key, value)),
        }
    }

    /// Shorthand for a [`MayerError::Bitmap`] error.
    pub fn bitmap(code: impl Into<String>, message: impl Into<String>) -> Self {
        MayerError::Bitmap(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`MayerError::Graph`] error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        MayerError::Graph(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`MayerError::Config`] error.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        MayerError::Config(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`MayerError::Serde`] error.
    pub fn serde(code: impl Into<String>, err: impl ToString) -> Self {
        MayerError::Serde(ErrorInfo::new(code, err.to_string()))
    }
}

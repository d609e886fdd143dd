//! Structured error taxonomy shared across the MOF synthesis crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`MofError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (category, key, sample index, ...).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
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

/// Canonical error type for the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MofError {
    /// A ligand or electrode key outside the configured category universe.
    #[error("unknown category: {0}")]
    UnknownCategory(ErrorInfo),
    /// A degenerate generator or dataset configuration rejected at entry.
    #[error("invalid parameter: {0}")]
    InvalidParameter(ErrorInfo),
    /// A generated series contained NaN or infinity.
    #[error("non-finite output: {0}")]
    NonFinite(ErrorInfo),
    /// Serialization, schema and filesystem errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl MofError {
    /// Builds the error raised when `key` is missing from the `category` table.
    pub fn unknown_category(category: &str, key: &str) -> Self {
        MofError::UnknownCategory(
            ErrorInfo::new(
                format!("unknown-{category}"),
                format!("{category} '{key}' is not part of the category universe"),
            )
            .with_context("category", category)
            .with_context("key", key),
        )
    }

    /// Builds an [`MofError::InvalidParameter`] with the given code and message.
    pub fn invalid_parameter(code: &str, message: impl Into<String>) -> Self {
        MofError::InvalidParameter(ErrorInfo::new(code, message))
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MofError::UnknownCategory(info)
            | MofError::InvalidParameter(info)
            | MofError::NonFinite(info)
            | MofError::Serde(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry while keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            MofError::UnknownCategory(info) => {
                MofError::UnknownCategory(info.with_context(key, value))
            }
            MofError::InvalidParameter(info) => {
                MofError::InvalidParameter(info.with_context(key, value))
            }
            MofError::NonFinite(info) => MofError::NonFinite(info.with_context(key, value)),
            MofError::Serde(info) => MofError::Serde(info.with_context(key, value)),
        }
    }
}

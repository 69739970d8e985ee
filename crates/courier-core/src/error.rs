//! Error types for Courier operations.
//!
//! Provides structured error handling instead of panics.

use std::error::Error;
use std::fmt;

use crate::types::AgentKey;

/// Result type for Courier operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors surfaced by the runtime's registration and delivery API.
///
/// These are configuration/usage errors: they abort the calling operation
/// immediately and are never retried. A Validator parse failure is not in
/// this taxonomy — it is recovered inline by publishing an invalid-input
/// report and never reaches the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// An agent name was registered twice.
    DuplicateRegistration(String),
    /// A direct send targeted an unregistered agent key.
    UnknownAgent(String),
    /// A send or publish was attempted before `start()`.
    NotStarted,
    /// Trace export failed to serialize.
    Serialization(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::DuplicateRegistration(name) => {
                write!(f, "Agent already registered: {}", name)
            }
            RuntimeError::UnknownAgent(key) => write!(f, "Unknown agent: {}", key),
            RuntimeError::NotStarted => write!(f, "Runtime not started"),
            RuntimeError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for RuntimeError {}

impl From<serde_json::Error> for RuntimeError {
    fn from(e: serde_json::Error) -> Self {
        RuntimeError::Serialization(e.to_string())
    }
}

// Convenience constructors
impl RuntimeError {
    pub fn duplicate_registration(name: impl Into<String>) -> Self {
        RuntimeError::DuplicateRegistration(name.into())
    }

    pub fn unknown_agent(key: &AgentKey) -> Self {
        RuntimeError::UnknownAgent(key.to_string())
    }
}

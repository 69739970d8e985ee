//! Message shapes carried through the runtime.
//!
//! Courier routes a closed set of message shapes. Each is an immutable
//! value: handlers never mutate a message in place — a retry constructs a
//! fresh [`NumberMessage`] rather than touching the one it received.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A free-form text payload.
///
/// Produced by the caller, by the Validator (error report), or by the
/// PrimeChecker (success report). Consumed by the Validator and the Logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    pub content: String,
}

impl TextMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A numeric payload carrying its retry counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberMessage {
    pub value: i64,
    /// How many failed primality attempts this candidate has been through.
    pub retry_count: u32,
}

impl NumberMessage {
    /// A fresh candidate with no retries on record.
    pub fn new(value: i64) -> Self {
        Self {
            value,
            retry_count: 0,
        }
    }

    pub fn with_retries(value: i64, retry_count: u32) -> Self {
        Self { value, retry_count }
    }
}

/// The closed set of message shapes the runtime can route.
///
/// Dispatch is an explicit type-switch over this union: the runtime
/// matches the variant and calls the handler an agent declares for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Text(TextMessage),
    Number(NumberMessage),
}

impl Message {
    pub fn text(content: impl Into<String>) -> Self {
        Message::Text(TextMessage::new(content))
    }

    pub fn number(value: i64, retry_count: u32) -> Self {
        Message::Number(NumberMessage::with_retries(value, retry_count))
    }

    /// The shape tag, used for ignore events and stats.
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Text(_) => MessageKind::Text,
            Message::Number(_) => MessageKind::Number,
        }
    }
}

/// Shape tag for a [`Message`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Text,
    Number,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Text => write!(f, "text"),
            MessageKind::Number => write!(f, "number"),
        }
    }
}

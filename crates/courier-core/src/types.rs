//! Shared routing types used across all Courier crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::message::Message;

/// Key under which an agent is registered: a name plus an instance id.
///
/// Registration creates the `"default"` instance of a name; the instance
/// field exists so a future extension can run several instances of one
/// agent type without changing the addressing scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentKey {
    pub name: String,
    pub instance: String,
}

impl AgentKey {
    pub const DEFAULT_INSTANCE: &'static str = "default";

    /// Key for the default instance of `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: Self::DEFAULT_INSTANCE.to_string(),
        }
    }

    pub fn with_instance(name: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: instance.into(),
        }
    }
}

impl fmt::Display for AgentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.instance)
    }
}

/// A named broadcast channel.
///
/// Every agent subscribed to a topic receives every message published to
/// it; each agent reacts only to the shapes it declares a handler for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(pub String);

impl TopicId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The shared topic every agent is subscribed to at registration.
    pub fn default_topic() -> Self {
        Self("default".to_string())
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one pending delivery in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvelopeId(pub Uuid);

impl EnvelopeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a deterministic id (for testing).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u128(seed as u128))
    }
}

impl Default for EnvelopeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a delivery is headed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Directly to one named agent.
    Direct(AgentKey),
    /// To every subscriber of a topic.
    Topic(TopicId),
}

/// One pending delivery in the runtime's FIFO queue.
///
/// `sender` is the agent whose handler enqueued this delivery, if any.
/// Topic fan-out skips the sender: an agent never receives its own
/// broadcast, which is what keeps the validator/prime-checker relay from
/// echoing messages back to their producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: EnvelopeId,
    pub message: Message,
    pub route: Route,
    pub sender: Option<AgentKey>,
}

impl Envelope {
    /// A delivery enqueued by the external caller.
    pub fn new(message: Message, route: Route) -> Self {
        Self {
            id: EnvelopeId::new(),
            message,
            route,
            sender: None,
        }
    }

    /// A delivery enqueued by an agent's handler.
    pub fn from_agent(message: Message, route: Route, sender: AgentKey) -> Self {
        Self {
            id: EnvelopeId::new(),
            message,
            route,
            sender: Some(sender),
        }
    }
}

//! Agent — the unit of message-handling logic.
//!
//! An agent declares a handler per message shape it reacts to. A handler
//! receives a message, updates internal state if the agent carries any,
//! and returns a [`Reaction`] describing what the runtime should enqueue
//! next. Agents never touch the delivery queue directly; the runtime
//! executes every reaction, which is what keeps handlers testable in
//! isolation.

use crate::message::{Message, MessageKind, NumberMessage, TextMessage};
use crate::types::{AgentKey, TopicId};

/// What a handler asks the runtime to enqueue.
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    /// Broadcast to every subscriber of a topic.
    Publish { message: Message, topic: TopicId },
    /// Direct delivery to one named agent.
    Send { message: Message, to: AgentKey },
}

/// A handler's full response to one delivered message.
///
/// `trace` is the agent's human-readable line for this delivery (the
/// runtime records it, the driver renders it); `outgoing` is appended to
/// the tail of the delivery queue in order.
#[derive(Debug, Clone, Default)]
pub struct Reaction {
    pub trace: Option<String>,
    pub outgoing: Vec<Outgoing>,
}

impl Reaction {
    /// No trace, nothing enqueued — the "no handler for this shape" no-op.
    pub fn ignore() -> Self {
        Self::default()
    }

    /// A trace line with nothing enqueued (a terminal sink).
    pub fn trace(line: impl Into<String>) -> Self {
        Self {
            trace: Some(line.into()),
            outgoing: Vec::new(),
        }
    }

    /// A trace line plus one broadcast to `topic`.
    pub fn publish(line: impl Into<String>, message: Message, topic: TopicId) -> Self {
        Self {
            trace: Some(line.into()),
            outgoing: vec![Outgoing::Publish { message, topic }],
        }
    }

    /// Append a direct send to this reaction.
    pub fn and_send(mut self, message: Message, to: AgentKey) -> Self {
        self.outgoing.push(Outgoing::Send { message, to });
        self
    }

    /// Whether this reaction is the ignore no-op.
    pub fn is_ignore(&self) -> bool {
        self.trace.is_none() && self.outgoing.is_empty()
    }
}

/// An independently addressable unit of message-handling logic.
///
/// The default handler bodies implement the routing rule that a message
/// shape with no matching handler on an agent is silently ignored by that
/// agent — expected behavior, not an error.
pub trait Agent {
    /// Display label for trace output (e.g. "Validator").
    fn label(&self) -> &str;

    /// Which message shapes this agent consumes from topic broadcasts.
    ///
    /// Direct sends always reach the declared handler regardless of this
    /// list. An agent whose handler serves a direct entry channel (the
    /// Validator's text handler) narrows this so result messages on the
    /// shared topic belong to the sink alone.
    fn subscriptions(&self) -> Vec<MessageKind> {
        vec![MessageKind::Text, MessageKind::Number]
    }

    /// React to a text payload.
    fn on_text(&mut self, _message: &TextMessage) -> Reaction {
        Reaction::ignore()
    }

    /// React to a numeric payload.
    fn on_number(&mut self, _message: &NumberMessage) -> Reaction {
        Reaction::ignore()
    }
}

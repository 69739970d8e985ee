//! Runtime — agent registry, topic router, and FIFO dispatch loop.
//!
//! The runtime owns every mutable piece of the system: the registry of
//! agents, the subscription table, and the delivery queue. Dispatch
//! processes exactly one delivery at a time to completion; anything a
//! handler publishes is appended to the tail of the queue and handled
//! after every delivery already pending (breadth-first across one wave,
//! never depth-first recursion). That ordering is what makes the printed
//! trace deterministic.
//!
//! Each drain:
//! 1. Pop the head envelope
//! 2. Resolve its targets (one named agent, or a topic's subscribers
//!    minus the sender)
//! 3. Type-switch on the message variant and invoke the matching handler
//! 4. Enqueue the handler's outgoing messages at the tail
//! 5. Repeat until the queue is empty, then signal idle

use courier_core::agent::{Agent, Outgoing, Reaction};
use courier_core::error::{Result, RuntimeError};
use courier_core::message::{Message, MessageKind};
use courier_core::types::{AgentKey, Envelope, EnvelopeId, Route, TopicId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Event emitted by the runtime during registration and dispatch.
#[derive(Debug, Clone, Serialize)]
pub enum RuntimeEvent {
    /// An agent was registered and subscribed to the default topic.
    Registered { key: AgentKey, label: String },
    /// The runtime began accepting messages.
    Started,
    /// A delivery was enqueued.
    Enqueued { id: EnvelopeId, kind: MessageKind },
    /// An agent handled a delivery.
    Delivered {
        agent: AgentKey,
        label: String,
        trace: Option<String>,
    },
    /// An agent had no handler for this message shape.
    Ignored { agent: AgentKey, kind: MessageKind },
    /// A handler's direct send targeted an unregistered agent.
    DeadLetter { to: AgentKey, kind: MessageKind },
    /// The queue drained with no handler in flight.
    Idle { dispatched: usize },
}

/// Statistics about the runtime.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuntimeStats {
    pub agents_registered: usize,
    pub deliveries_dispatched: usize,
    pub messages_published: usize,
    pub messages_sent: usize,
    pub deliveries_ignored: usize,
}

/// Configuration for runtime parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Name of the topic every agent is subscribed to at registration
    /// (default: "default").
    pub default_topic: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_topic: TopicId::default_topic().0,
        }
    }
}

/// The runtime — registry, router, and dispatch loop in one value.
///
/// Constructed explicitly and owned by the driver; there is no
/// process-wide singleton. Single logical thread of control: handlers
/// never run concurrently, and the queue is only touched from within
/// dispatch, so no locks are needed.
pub struct Runtime {
    /// Registration order doubles as topic fan-out order, which keeps
    /// the trace reproducible run to run.
    agents: Vec<(AgentKey, Box<dyn Agent>)>,
    default_topic: TopicId,
    queue: VecDeque<Envelope>,
    started: bool,
    events: Vec<RuntimeEvent>,
    stats: RuntimeStats,
}

impl Runtime {
    /// Create a runtime with default configuration.
    pub fn new() -> Self {
        Self::from_config(RuntimeConfig::default())
    }

    /// Create a runtime with the specified configuration.
    pub fn from_config(config: RuntimeConfig) -> Self {
        Self {
            agents: Vec::new(),
            default_topic: TopicId::new(config.default_topic),
            queue: VecDeque::new(),
            started: false,
            events: Vec::new(),
            stats: RuntimeStats::default(),
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> RuntimeConfig {
        RuntimeConfig {
            default_topic: self.default_topic.0.clone(),
        }
    }

    /// The topic every registered agent is subscribed to.
    pub fn default_topic(&self) -> &TopicId {
        &self.default_topic
    }

    /// Instantiate an agent via `factory` and store it under `name`.
    ///
    /// The new agent is statically subscribed to the default topic for
    /// the shapes it declares. Registering a name twice is a usage error.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<AgentKey>
    where
        F: FnOnce() -> Box<dyn Agent>,
    {
        if self.agents.iter().any(|(key, _)| key.name == name) {
            return Err(RuntimeError::duplicate_registration(name));
        }

        let key = AgentKey::new(name);
        let agent = factory();
        self.events.push(RuntimeEvent::Registered {
            key: key.clone(),
            label: agent.label().to_string(),
        });
        self.agents.push((key.clone(), agent));
        self.stats.agents_registered += 1;
        Ok(key)
    }

    /// Transition to the accepting-messages state. No-op if already started.
    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            self.events.push(RuntimeEvent::Started);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Whether the delivery queue is empty and no handler is in flight.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Enqueue a direct delivery to one named agent.
    pub fn send_message(&mut self, message: Message, to: &AgentKey) -> Result<EnvelopeId> {
        if !self.started {
            return Err(RuntimeError::NotStarted);
        }
        if !self.agents.iter().any(|(key, _)| key == to) {
            return Err(RuntimeError::unknown_agent(to));
        }

        let envelope = Envelope::new(message, Route::Direct(to.clone()));
        let id = envelope.id;
        self.note_enqueued(&envelope);
        self.queue.push_back(envelope);
        self.stats.messages_sent += 1;
        Ok(id)
    }

    /// Enqueue a broadcast to every subscriber of `topic`.
    ///
    /// A topic with no subscribers is delivered to nobody; that is
    /// routing, not an error.
    pub fn publish_message(&mut self, message: Message, topic: &TopicId) -> Result<EnvelopeId> {
        if !self.started {
            return Err(RuntimeError::NotStarted);
        }

        let envelope = Envelope::new(message, Route::Topic(topic.clone()));
        let id = envelope.id;
        self.note_enqueued(&envelope);
        self.queue.push_back(envelope);
        self.stats.messages_published += 1;
        Ok(id)
    }

    /// Dispatch the head delivery, if any.
    ///
    /// Returns the events recorded while handling it, or `None` when the
    /// queue is already idle.
    pub fn dispatch_next(&mut self) -> Option<Vec<RuntimeEvent>> {
        let envelope = self.queue.pop_front()?;
        let before = self.events.len();

        let targets: Vec<usize> = match &envelope.route {
            Route::Direct(key) => self
                .agents
                .iter()
                .position(|(candidate, _)| candidate == key)
                .into_iter()
                .collect(),
            Route::Topic(topic) => self.subscriber_indices(topic, &envelope),
        };

        for idx in targets {
            self.deliver_to(idx, &envelope.message);
        }

        self.stats.deliveries_dispatched += 1;
        Some(self.events[before..].to_vec())
    }

    /// Drain the queue in FIFO order until idle.
    ///
    /// Returns every event recorded during this drain, ending with
    /// [`RuntimeEvent::Idle`].
    pub fn run_until_idle(&mut self) -> Vec<RuntimeEvent> {
        let before = self.events.len();
        let mut dispatched = 0;
        while self.dispatch_next().is_some() {
            dispatched += 1;
        }
        self.events.push(RuntimeEvent::Idle { dispatched });
        self.events[before..].to_vec()
    }

    /// Full event history since construction.
    pub fn events(&self) -> &[RuntimeEvent] {
        &self.events
    }

    /// Get runtime statistics.
    pub fn stats(&self) -> RuntimeStats {
        self.stats.clone()
    }

    /// Note the queue went idle after `dispatched` deliveries.
    ///
    /// Used by the async wrapper, which steps the queue one delivery at a
    /// time and owns its own drain counter.
    pub(crate) fn note_idle(&mut self, dispatched: usize) -> RuntimeEvent {
        let event = RuntimeEvent::Idle { dispatched };
        self.events.push(event.clone());
        event
    }

    fn note_enqueued(&mut self, envelope: &Envelope) {
        self.events.push(RuntimeEvent::Enqueued {
            id: envelope.id,
            kind: envelope.message.kind(),
        });
    }

    /// Topic fan-out targets: subscribers of the message's shape, in
    /// registration order, minus the envelope's sender.
    fn subscriber_indices(&self, topic: &TopicId, envelope: &Envelope) -> Vec<usize> {
        if *topic != self.default_topic {
            return Vec::new();
        }
        let kind = envelope.message.kind();
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, (key, agent))| {
                Some(key) != envelope.sender.as_ref() && agent.subscriptions().contains(&kind)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Invoke the handler matching the message's shape on one agent, then
    /// enqueue everything the reaction asks for.
    fn deliver_to(&mut self, idx: usize, message: &Message) {
        let (key, reaction) = {
            let (key, agent) = &mut self.agents[idx];
            let reaction = match message {
                Message::Text(text) => agent.on_text(text),
                Message::Number(number) => agent.on_number(number),
            };
            (key.clone(), reaction)
        };

        if reaction.is_ignore() {
            self.events.push(RuntimeEvent::Ignored {
                agent: key,
                kind: message.kind(),
            });
            self.stats.deliveries_ignored += 1;
            return;
        }

        let label = self.agents[idx].1.label().to_string();
        self.events.push(RuntimeEvent::Delivered {
            agent: key.clone(),
            label,
            trace: reaction.trace.clone(),
        });

        self.enqueue_reaction(key, reaction);
    }

    fn enqueue_reaction(&mut self, sender: AgentKey, reaction: Reaction) {
        for outgoing in reaction.outgoing {
            match outgoing {
                Outgoing::Publish { message, topic } => {
                    let envelope =
                        Envelope::from_agent(message, Route::Topic(topic), sender.clone());
                    self.note_enqueued(&envelope);
                    self.queue.push_back(envelope);
                    self.stats.messages_published += 1;
                }
                Outgoing::Send { message, to } => {
                    if !self.agents.iter().any(|(key, _)| *key == to) {
                        self.events.push(RuntimeEvent::DeadLetter {
                            to,
                            kind: message.kind(),
                        });
                        continue;
                    }
                    let envelope =
                        Envelope::from_agent(message, Route::Direct(to), sender.clone());
                    self.note_enqueued(&envelope);
                    self.queue.push_back(envelope);
                    self.stats.messages_sent += 1;
                }
            }
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::agent::Reaction;
    use courier_core::message::{NumberMessage, TextMessage};

    /// Records what it saw; publishes nothing.
    struct Probe {
        label: String,
    }

    impl Probe {
        fn boxed(label: &str) -> Box<dyn Agent> {
            Box::new(Probe {
                label: label.to_string(),
            })
        }
    }

    impl Agent for Probe {
        fn label(&self) -> &str {
            &self.label
        }

        fn on_text(&mut self, message: &TextMessage) -> Reaction {
            Reaction::trace(format!("saw {}", message.content))
        }
    }

    /// Forwards each text by direct send: once to a real agent, once to
    /// a key nobody registered.
    struct Relay {
        target: AgentKey,
        missing: AgentKey,
    }

    impl Agent for Relay {
        fn label(&self) -> &str {
            "Relay"
        }

        fn subscriptions(&self) -> Vec<MessageKind> {
            Vec::new()
        }

        fn on_text(&mut self, message: &TextMessage) -> Reaction {
            Reaction::trace(format!("relaying {}", message.content))
                .and_send(Message::text(message.content.as_str()), self.target.clone())
                .and_send(Message::text(message.content.as_str()), self.missing.clone())
        }
    }

    #[test]
    fn register_rejects_duplicate_names() {
        let mut runtime = Runtime::new();
        runtime.register("probe", || Probe::boxed("Probe")).unwrap();

        let err = runtime
            .register("probe", || Probe::boxed("Probe"))
            .unwrap_err();
        assert_eq!(err, RuntimeError::DuplicateRegistration("probe".into()));
    }

    #[test]
    fn send_before_start_is_rejected() {
        let mut runtime = Runtime::new();
        let key = runtime.register("probe", || Probe::boxed("Probe")).unwrap();

        let err = runtime.send_message(Message::text("hi"), &key).unwrap_err();
        assert_eq!(err, RuntimeError::NotStarted);
    }

    #[test]
    fn send_to_unregistered_agent_is_rejected() {
        let mut runtime = Runtime::new();
        runtime.start();

        let missing = AgentKey::new("missing");
        let err = runtime
            .send_message(Message::text("hi"), &missing)
            .unwrap_err();
        assert_eq!(err, RuntimeError::UnknownAgent("missing/default".into()));
    }

    #[test]
    fn start_is_idempotent() {
        let mut runtime = Runtime::new();
        runtime.start();
        runtime.start();

        let started = runtime
            .events()
            .iter()
            .filter(|e| matches!(e, RuntimeEvent::Started))
            .count();
        assert_eq!(started, 1);
    }

    #[test]
    fn direct_send_reaches_exactly_one_agent() {
        let mut runtime = Runtime::new();
        let first = runtime.register("first", || Probe::boxed("First")).unwrap();
        runtime
            .register("second", || Probe::boxed("Second"))
            .unwrap();
        runtime.start();

        runtime.send_message(Message::text("hello"), &first).unwrap();
        let events = runtime.run_until_idle();

        let delivered: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RuntimeEvent::Delivered { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(delivered, vec!["First"]);
    }

    #[test]
    fn publish_fans_out_in_registration_order() {
        let mut runtime = Runtime::new();
        runtime.register("b", || Probe::boxed("B")).unwrap();
        runtime.register("a", || Probe::boxed("A")).unwrap();
        runtime.start();

        let topic = runtime.default_topic().clone();
        runtime.publish_message(Message::text("x"), &topic).unwrap();
        let events = runtime.run_until_idle();

        let delivered: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RuntimeEvent::Delivered { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(delivered, vec!["B", "A"]);
    }

    #[test]
    fn publish_to_unknown_topic_delivers_to_nobody() {
        let mut runtime = Runtime::new();
        runtime.register("probe", || Probe::boxed("Probe")).unwrap();
        runtime.start();

        runtime
            .publish_message(Message::text("x"), &TopicId::new("elsewhere"))
            .unwrap();
        let events = runtime.run_until_idle();

        assert!(events
            .iter()
            .all(|e| !matches!(e, RuntimeEvent::Delivered { .. })));
        assert!(matches!(events.last(), Some(RuntimeEvent::Idle { dispatched: 1 })));
    }

    #[test]
    fn handler_direct_sends_deliver_or_dead_letter() {
        let mut runtime = Runtime::new();
        let target = runtime.register("target", || Probe::boxed("Target")).unwrap();
        let missing = AgentKey::new("nobody");
        let relay_missing = missing.clone();
        let relay = runtime
            .register("relay", move || {
                Box::new(Relay {
                    target,
                    missing: relay_missing,
                })
            })
            .unwrap();
        runtime.start();

        runtime.send_message(Message::text("x"), &relay).unwrap();
        let events = runtime.run_until_idle();

        let delivered: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RuntimeEvent::Delivered { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(delivered, vec!["Relay", "Target"]);

        // The unroutable send is recorded, not raised.
        assert!(events.iter().any(|e| matches!(
            e,
            RuntimeEvent::DeadLetter {
                to,
                kind: MessageKind::Text,
            } if *to == missing
        )));
        // Caller send plus the one routable handler send.
        assert_eq!(runtime.stats().messages_sent, 2);
    }

    #[test]
    fn unhandled_shape_is_ignored_not_an_error() {
        let mut runtime = Runtime::new();
        // Probe declares no number handler.
        let key = runtime.register("probe", || Probe::boxed("Probe")).unwrap();
        runtime.start();

        runtime
            .send_message(Message::Number(NumberMessage::new(5)), &key)
            .unwrap();
        let events = runtime.run_until_idle();

        assert!(events.iter().any(|e| matches!(
            e,
            RuntimeEvent::Ignored {
                kind: MessageKind::Number,
                ..
            }
        )));
        assert_eq!(runtime.stats().deliveries_ignored, 1);
    }
}

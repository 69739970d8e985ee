//! Logger Agent — the pipeline's terminal sink.
//!
//! Renders the final text result as a trace line and publishes nothing,
//! so the delivery queue can drain. The only consumer that never
//! re-enters the queue.

use courier_core::agent::{Agent, Reaction};
use courier_core::message::TextMessage;

/// Stateless terminal sink for text results.
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for Logger {
    fn label(&self) -> &str {
        "Logger"
    }

    fn on_text(&mut self, message: &TextMessage) -> Reaction {
        Reaction::trace(format!("Final Message -> {}", message.content))
    }
}

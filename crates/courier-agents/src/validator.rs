//! Validator Agent — the pipeline's entry gate.
//!
//! Converts text input into a numeric candidate, and gates retried
//! candidates behind a bounded-retry policy: once a candidate has been
//! through `max_retries` failed primality attempts it is discarded and
//! replaced by the fallback value 3. The fallback is the termination
//! guarantee for the whole pipeline and must survive any refactor.

use courier_core::agent::{Agent, Reaction};
use courier_core::message::{Message, MessageKind, NumberMessage, TextMessage};
use courier_core::types::TopicId;

/// Default number of failed primality attempts before falling back.
pub const MAX_RETRIES: u32 = 3;

/// The fallback candidate — the smallest odd prime, so the primality
/// check that follows a fallback always succeeds.
pub const FALLBACK_VALUE: i64 = 3;

/// Text-to-number validation plus the bounded-retry gate.
pub struct Validator {
    max_retries: u32,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            max_retries: MAX_RETRIES,
        }
    }

    /// Create a validator with a custom retry budget.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self { max_retries }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for Validator {
    fn label(&self) -> &str {
        "Validator"
    }

    // The text handler is the pipeline's entry point, fed by direct send.
    // Result texts on the shared topic are for the sink, not re-validation.
    fn subscriptions(&self) -> Vec<MessageKind> {
        vec![MessageKind::Number]
    }

    fn on_text(&mut self, message: &TextMessage) -> Reaction {
        match message.content.trim().parse::<i64>() {
            Ok(number) => Reaction::publish(
                format!("Valid number: {}", number),
                Message::number(number, 0),
                TopicId::default_topic(),
            ),
            // Terminal: report straight to the text channel, no re-parse.
            Err(_) => Reaction::publish(
                format!("Invalid input. Not a number -> {}", message.content),
                Message::text("Invalid input: not a number"),
                TopicId::default_topic(),
            ),
        }
    }

    fn on_number(&mut self, message: &NumberMessage) -> Reaction {
        if message.retry_count >= self.max_retries {
            Reaction::publish(
                format!(
                    "Max retries reached. Sending fallback value {} to PrimeChecker",
                    FALLBACK_VALUE
                ),
                Message::number(FALLBACK_VALUE, 0),
                TopicId::default_topic(),
            )
        } else {
            // Pass-through: value and retry_count both unchanged. The
            // increment happens in the PrimeChecker, never here.
            Reaction::publish(
                format!(
                    "Retry {}/{}. Number: {}",
                    message.retry_count, self.max_retries, message.value
                ),
                Message::Number(*message),
                TopicId::default_topic(),
            )
        }
    }
}

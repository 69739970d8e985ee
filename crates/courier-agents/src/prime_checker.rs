//! PrimeChecker Agent — primality testing with descent-by-2 retry.
//!
//! A prime candidate ends the pipeline with a success report; a composite
//! one is decremented by 2 (parity-preserving descent) and routed back
//! through the shared topic for the Validator's retry gate. No lower
//! bound is enforced here — a candidate may transiently go non-positive
//! before the Validator's fallback fires.

use courier_core::agent::{Agent, Reaction};
use courier_core::message::{Message, NumberMessage};
use courier_core::types::TopicId;

/// Deterministic trial-division primality test.
///
/// Checks divisibility by 2 and 3, then by odd divisors of the form
/// 6k±1 up to √n. Pure function, no side effects. The square is
/// widened to i128 so candidates near `i64::MAX` cannot overflow the
/// loop bound.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i: i64 = 5;
    while (i as i128) * (i as i128) <= n as i128 {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Primality testing with composite descent.
pub struct PrimeChecker;

impl PrimeChecker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PrimeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for PrimeChecker {
    fn label(&self) -> &str {
        "PrimeChecker"
    }

    fn on_number(&mut self, message: &NumberMessage) -> Reaction {
        if is_prime(message.value) {
            let result = format!("Got the prime number: {}", message.value);
            Reaction::publish(result.clone(), Message::text(result), TopicId::default_topic())
        } else {
            // Saturating descent: a candidate at the bottom of the i64
            // range stays there and rides the retry counter into the
            // Validator's fallback instead of panicking.
            let new_value = message.value.saturating_sub(2);
            let new_retry = message.retry_count + 1;
            Reaction::publish(
                format!(
                    "{} is not prime. Sending {} back to Validator (Retry {})",
                    message.value, new_value, new_retry
                ),
                Message::number(new_value, new_retry),
                TopicId::default_topic(),
            )
        }
    }
}

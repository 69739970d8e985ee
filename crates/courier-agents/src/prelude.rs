//! Courier Agents Prelude.

pub use crate::logger::Logger;
pub use crate::prime_checker::{is_prime, PrimeChecker};
pub use crate::validator::{Validator, FALLBACK_VALUE, MAX_RETRIES};

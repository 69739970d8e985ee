//! # Courier Agents
//!
//! Reference agent implementations for the Courier runtime, forming a
//! self-correcting prime-search pipeline:
//!
//! - [`Validator`](validator::Validator) — parses text into a numeric
//!   candidate and gates retries behind a bounded fallback
//! - [`PrimeChecker`](prime_checker::PrimeChecker) — tests primality and
//!   descends composite candidates by 2
//! - [`Logger`](logger::Logger) — terminal sink rendering the final line
//!
//! Per input, the logical state machine is:
//! `Start → Parsing → {Invalid(terminal) | Numeric}`;
//! `Numeric → RetryGate → {Fallback→Numeric | PassThrough→PrimeTest}`;
//! `PrimeTest → {Prime(terminal) | Composite→RetryGate}`.
//! Every terminal state resolves to a text message consumed by the Logger.

pub mod logger;
pub mod prime_checker;
pub mod validator;
pub mod prelude;

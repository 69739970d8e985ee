//! # Courier
//!
//! A minimal actor-style publish/subscribe runtime demonstrating a
//! self-correcting pipeline: text input is validated, converted to a
//! number, checked for primality, and iteratively adjusted with bounded
//! retries until a terminal result reaches the logging sink.
//!
//! ## Quick Start
//!
//! ```rust
//! use courier::prelude::*;
//!
//! let mut runtime = Runtime::new();
//! let validator = runtime
//!     .register("validator", || Box::new(Validator::new()))
//!     .unwrap();
//! runtime
//!     .register("prime_checker", || Box::new(PrimeChecker::new()))
//!     .unwrap();
//! runtime.register("logger", || Box::new(Logger::new())).unwrap();
//! runtime.start();
//!
//! runtime.send_message(Message::text("22"), &validator).unwrap();
//! let events = runtime.run_until_idle();
//!
//! assert_eq!(
//!     final_trace(&events, "Logger"),
//!     Some("Final Message -> Got the prime number: 3")
//! );
//! ```
//!
//! ## Architecture
//!
//! Courier is organized into three crates behind this facade:
//!
//! - [`courier_core`] — message shapes, the `Agent` trait, routing types,
//!   errors
//! - [`courier_agents`] — the Validator, PrimeChecker, and Logger agents
//! - [`courier_runtime`] — the registry, topic router, FIFO dispatch
//!   loop, and the optional tokio wrapper (`async` feature)
//!
//! ## Key Concepts
//!
//! - **Agent** — an independently addressable unit holding handlers for
//!   one or more message shapes
//! - **Topic** — a named broadcast channel; subscribers receive every
//!   message published to it, minus their own broadcasts
//! - **Wave** — the deliveries enqueued while processing one prior
//!   delivery; dispatched FIFO after everything already pending
//! - **Idle** — queue empty and no handler executing; the only
//!   synchronization point exposed to callers

pub use courier_agents as agents;
pub use courier_core as core;
pub use courier_runtime as runtime;

pub mod prelude {
    //! Convenient imports for common usage.

    pub use courier_core::message::{Message, MessageKind, NumberMessage, TextMessage};
    pub use courier_core::types::{AgentKey, Envelope, EnvelopeId, Route, TopicId};

    pub use courier_core::agent::{Agent, Outgoing, Reaction};

    pub use courier_core::error::{Result, RuntimeError};

    pub use courier_agents::logger::Logger;
    pub use courier_agents::prime_checker::{is_prime, PrimeChecker};
    pub use courier_agents::validator::{Validator, FALLBACK_VALUE, MAX_RETRIES};

    pub use courier_runtime::export::{final_trace, trace_to_json};
    pub use courier_runtime::runtime::{Runtime, RuntimeConfig, RuntimeEvent, RuntimeStats};

    #[cfg(feature = "async")]
    pub use courier_runtime::async_runtime::{run_in_local, AsyncRuntime};
}

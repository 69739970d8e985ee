//! # Courier Core
//!
//! Core traits and types for the Courier message-passing runtime.
//!
//! This crate defines the closed set of message shapes the runtime can
//! route, the [`Agent`](agent::Agent) trait every addressable unit
//! implements, and the shared types used across the workspace:
//!
//! - **Message shapes** — immutable value payloads ([`TextMessage`](message::TextMessage),
//!   [`NumberMessage`](message::NumberMessage)) in a closed union
//! - **Routing types** — agent keys, topic ids, delivery envelopes
//! - **Agent trait** — one handler per message shape, defaulting to ignore
//! - **Errors** — the runtime's registration/delivery error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use courier_core::prelude::*;
//!
//! // Address the default instance of a named agent
//! let key = AgentKey::new("validator");
//!
//! // Build a message for it
//! let msg = Message::text("22");
//! assert_eq!(msg.kind(), MessageKind::Text);
//! ```

pub mod agent;
pub mod error;
pub mod message;
pub mod types;
pub mod prelude;

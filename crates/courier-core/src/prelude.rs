//! Courier Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use courier_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::message::{Message, MessageKind, NumberMessage, TextMessage};
pub use crate::types::{AgentKey, Envelope, EnvelopeId, Route, TopicId};

// Re-export the Agent trait and its reaction types
pub use crate::agent::{Agent, Outgoing, Reaction};

// Re-export error types
pub use crate::error::{Result, RuntimeError};

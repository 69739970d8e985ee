//! # Courier Runtime
//!
//! The runtime half of Courier: an agent registry, a topic router, and a
//! strictly FIFO dispatch loop that drains to idle.
//!
//! - [`runtime`] — [`Runtime`](runtime::Runtime), its events, stats, and
//!   configuration
//! - [`export`] — JSON trace export and final-output extraction
//! - [`async_runtime`] — tokio wrapper exposing `stop_when_idle`
//!   (requires the `async` feature)

pub mod async_runtime;
pub mod export;
pub mod runtime;
pub mod prelude;

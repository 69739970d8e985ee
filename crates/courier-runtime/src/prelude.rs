//! Courier Runtime Prelude.

pub use crate::export::{final_trace, trace_to_json};
pub use crate::runtime::{Runtime, RuntimeConfig, RuntimeEvent, RuntimeStats};

#[cfg(feature = "async")]
pub use crate::async_runtime::{run_in_local, AsyncRuntime};

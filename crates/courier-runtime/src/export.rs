//! Trace export — serialize a drain's event history for downstream use.

use crate::runtime::RuntimeEvent;
use courier_core::error::Result;

/// Serialize events as pretty-printed JSON.
pub fn trace_to_json(events: &[RuntimeEvent]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// The last trace line rendered by the agent with the given label.
///
/// `final_trace(&events, "Logger")` is the pipeline's final observable
/// output once the queue has drained.
pub fn final_trace<'a>(events: &'a [RuntimeEvent], label: &str) -> Option<&'a str> {
    events.iter().rev().find_map(|event| match event {
        RuntimeEvent::Delivered {
            label: agent_label,
            trace: Some(trace),
            ..
        } if agent_label == label => Some(trace.as_str()),
        _ => None,
    })
}

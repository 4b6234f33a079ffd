//! Trace capture and replay
//!
//! Serializable sample traces, a deterministic synthesizer for demo streams,
//! and a replay runner that feeds a trace through an interpreter.

pub mod trace;
pub mod synth;

pub use trace::{SampleTrace, TraceMetadata, CURRENT_FORMAT_VERSION};

use crate::dispatch::Action;
use crate::interpreter::GestureInterpreter;
use tracing::warn;

/// Feed a trace through an interpreter and collect the dispatched actions.
///
/// Out-of-order samples are dropped with a warning, matching live-stream
/// behavior. A trailing armed gesture is flushed at end of stream.
pub fn run(trace: &SampleTrace, interpreter: &mut GestureInterpreter) -> Vec<Action> {
    let mut actions = Vec::new();
    for sample in &trace.samples {
        match interpreter.push(*sample) {
            Ok(Some(action)) => actions.push(action),
            Ok(None) => {}
            Err(e) => warn!(%e, "dropping trace sample"),
        }
    }
    if let Some(action) = interpreter.flush() {
        actions.push(action);
    }
    actions
}

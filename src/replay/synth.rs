//! Synthetic Sample Generation
//!
//! Deterministic sample sequences for demos, benchmarks, and the `synth` CLI
//! command. Generated traces use the default classifier thresholds' sweet
//! spots so each segment resolves to its intended gesture.

use super::trace::SampleTrace;
use crate::capture::types::Sample;

/// Interval between generated samples (ms), matching a 60 Hz driver
pub const SAMPLE_INTERVAL_MS: u64 = 16;

/// A brief stationary contact: resolves as a tap.
pub fn tap(x: f64, y: f64, start_ms: u64) -> Vec<Sample> {
    (0..6)
        .map(|i| Sample::new(x, y, start_ms + i * SAMPLE_INTERVAL_MS))
        .collect()
}

/// A stationary press held for `duration_ms`: resolves as a hold.
pub fn hold(x: f64, y: f64, start_ms: u64, duration_ms: u64) -> Vec<Sample> {
    let count = duration_ms / SAMPLE_INTERVAL_MS + 1;
    (0..count)
        .map(|i| Sample::new(x, y, start_ms + i * SAMPLE_INTERVAL_MS))
        .collect()
}

/// A straight-line stroke from `(x0, y0)` to `(x1, y1)` over `duration_ms`:
/// resolves as a swipe when fast enough.
pub fn swipe(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    start_ms: u64,
    duration_ms: u64,
) -> Vec<Sample> {
    let count = (duration_ms / SAMPLE_INTERVAL_MS + 1).max(2);
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            Sample::new(
                x0 + (x1 - x0) * t,
                y0 + (y1 - y0) * t,
                start_ms + i * SAMPLE_INTERVAL_MS,
            )
        })
        .collect()
}

/// A slow pressured vertical drag: resolves as a scroll.
pub fn scroll(
    x: f64,
    y_start: f64,
    dy: f64,
    start_ms: u64,
    duration_ms: u64,
    pressure: f32,
) -> Vec<Sample> {
    let count = (duration_ms / SAMPLE_INTERVAL_MS + 1).max(2);
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            Sample::with_pressure(
                x,
                y_start + dy * t,
                start_ms + i * SAMPLE_INTERVAL_MS,
                pressure,
            )
        })
        .collect()
}

/// A demonstration trace exercising every gesture kind, with silent gaps
/// between segments so each one resolves independently.
pub fn demo_trace() -> SampleTrace {
    let mut trace = SampleTrace::new(
        "demo".to_string(),
        Some("tap, swipe up, scroll down, hold".to_string()),
    );

    let mut samples = Vec::new();
    // Tap on the upper-left control
    samples.extend(tap(60.0, 30.0, 0));
    // Swipe up in the content area (opens the menu)
    samples.extend(swipe((200.0, 400.0), (200.0, 320.0), 500, 200));
    // Pressured scroll down
    samples.extend(scroll(200.0, 200.0, 60.0, 1_200, 600, 0.6));
    // Hold over the list
    samples.extend(hold(200.0, 260.0, 2_400, 700));

    for sample in samples {
        trace.add_sample(sample);
    }
    trace.finalize();
    trace
}

//! # Gesture Interpreter
//!
//! A gesture interpretation engine that converts a raw stream of pointer/touch
//! samples into discrete recognized gestures and dispatches them as semantic
//! actions (open-menu, close-menu, scroll-by, hover-target).
//!
//! ## Overview
//!
//! Samples arrive from an external pointer/touch driver, pass through a
//! bounded sample window, and are classified into gesture candidates. A
//! debounce tracker guarantees that each physical gesture produces exactly one
//! recognition, which the dispatcher maps to an application action and
//! delivers through a registered callback.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gesture_interpreter::{GestureInterpreter, InterpreterConfig, Sample};
//! use gesture_interpreter::hittest::Rect;
//!
//! let mut interp = GestureInterpreter::new(InterpreterConfig::default());
//! interp.targets_mut().register("open-menu", Rect::new(10.0, 10.0, 120.0, 40.0));
//! interp.on_action(|action| println!("action: {action:?}"));
//!
//! // ... the driver feeds samples ...
//! let _ = interp.push(Sample::new(42.0, 17.0, 1_000));
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`capture`]: sample types, the lock-free ingest ring, and the bounded
//!   sample window
//! - [`time`]: millisecond timestamp and duration arithmetic
//! - [`classify`]: stateless window-to-candidate gesture classification
//! - [`tracker`]: debounce/hysteresis state machine (exactly-once emission)
//! - [`hittest`]: target registry and point-in-rect resolution
//! - [`dispatch`]: gesture-to-action mapping and scroll smoothing
//! - [`interpreter`]: the orchestrating interpreter instance
//! - [`replay`]: sample trace serialization, replay, and synthesis
//! - [`app`]: CLI and configuration management
//!
//! ## Event Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Pointer   │───▶│ Ingest Ring │───▶│   Sample    │───▶│  Classifier │
//! │   Driver    │    │ (lock-free) │    │   Window    │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Callback   │◀───│  Dispatcher │◀───│  Hit-Tester │◀───│   Debounce  │
//! │   (UI)      │    │             │    │             │    │   Tracker   │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```

pub mod time;
pub mod capture;
pub mod classify;
pub mod tracker;
pub mod hittest;
pub mod dispatch;
pub mod interpreter;
pub mod replay;
pub mod app;

// Re-export commonly used types
pub use capture::types::Sample;
pub use capture::window::SampleWindow;
pub use classify::{GestureCandidate, GestureClassifier, GestureKind};
pub use dispatch::{Action, ActionDispatcher};
pub use interpreter::GestureInterpreter;
pub use tracker::{DebounceTracker, RecognizedGesture};
pub use app::config::InterpreterConfig;

/// Result type alias for the gesture interpreter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the gesture interpreter
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("out-of-order sample: timestamp {got}ms precedes last recorded {last}ms")]
    InvalidSample { got: u64, last: u64 },

    #[error("no action mapped for {kind:?} gesture on target {target:?}")]
    UnknownAction {
        kind: classify::GestureKind,
        target: Option<String>,
    },

    #[error("ingest ring error: {0}")]
    Ingest(String),

    #[error("trace error: {0}")]
    Trace(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

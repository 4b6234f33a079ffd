//! Gesture Interpreter
//!
//! The orchestrating instance that owns the sample window, classifier,
//! debounce tracker, dispatcher, and target registry. Samples are processed
//! synchronously in arrival order; all timing derives from sample timestamps,
//! so interpretation is deterministic and replayable.

use crate::app::config::InterpreterConfig;
use crate::capture::ingest::SampleConsumer;
use crate::capture::types::Sample;
use crate::capture::window::SampleWindow;
use crate::classify::GestureClassifier;
use crate::dispatch::{Action, ActionDispatcher, RecognitionLog};
use crate::hittest::TargetRegistry;
use crate::tracker::{DebounceTracker, Emission, RecognizedGesture};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Interpreter counters.
///
/// Plain integers: the interpreter is single-threaded by contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpreterStats {
    /// Samples accepted into the window
    pub samples_accepted: u64,
    /// Samples rejected as out-of-order
    pub samples_rejected: u64,
    /// Gestures that survived debouncing
    pub gestures_recognized: u64,
    /// Actions delivered to the callback (including no-ops)
    pub actions_dispatched: u64,
    /// Recognitions with no mapped action
    pub unmapped_gestures: u64,
}

type ActionCallback = Box<dyn FnMut(&Action) + Send>;
type CursorCallback = Box<dyn FnMut(f64, f64) + Send>;

/// Converts a pointer sample stream into dispatched actions.
///
/// One interpreter instance owns all mutable pipeline state; it is never
/// accessed concurrently. Feed it directly with [`push`](Self::push), or
/// drain a [`SampleConsumer`](crate::capture::ingest::SampleConsumer) with
/// [`drain`](Self::drain) when the driver lives on another thread.
pub struct GestureInterpreter {
    window: SampleWindow,
    classifier: GestureClassifier,
    tracker: DebounceTracker,
    dispatcher: ActionDispatcher,
    targets: TargetRegistry,
    on_action: Option<ActionCallback>,
    on_cursor: Option<CursorCallback>,
    log: Option<Arc<RecognitionLog>>,
    stats: InterpreterStats,
}

impl GestureInterpreter {
    /// Create an interpreter from a configuration.
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            window: SampleWindow::with_capacity(config.buffer.window_capacity),
            classifier: GestureClassifier::with_config(config.classify),
            tracker: DebounceTracker::with_config(&config.debounce),
            dispatcher: ActionDispatcher::with_parts(Default::default(), config.dispatch),
            targets: TargetRegistry::new(),
            on_action: None,
            on_cursor: None,
            log: None,
            stats: InterpreterStats::default(),
        }
    }

    /// Register the action callback. Invoked exactly once per recognized
    /// gesture, including for no-ops.
    pub fn on_action(&mut self, callback: impl FnMut(&Action) + Send + 'static) {
        self.on_action = Some(Box::new(callback));
    }

    /// Register the cursor callback. Invoked once per accepted sample.
    pub fn on_cursor_move(&mut self, callback: impl FnMut(f64, f64) + Send + 'static) {
        self.on_cursor = Some(Box::new(callback));
    }

    /// Attach a shared recognition log.
    pub fn attach_log(&mut self, log: Arc<RecognitionLog>) {
        self.log = Some(log);
    }

    /// The target registry, for the UI collaborator to populate.
    pub fn targets_mut(&mut self) -> &mut TargetRegistry {
        &mut self.targets
    }

    /// Read access to the target registry.
    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    /// The dispatcher, for binding custom actions.
    pub fn dispatcher_mut(&mut self) -> &mut ActionDispatcher {
        &mut self.dispatcher
    }

    /// Interpreter counters.
    pub fn stats(&self) -> InterpreterStats {
        self.stats
    }

    /// Process one sample.
    ///
    /// Returns `Ok(Some(action))` when this sample resolved a gesture,
    /// `Ok(None)` otherwise. Fails with [`Error::InvalidSample`] for an
    /// out-of-order timestamp; the sample is dropped, all state is unchanged,
    /// and no recognition is triggered.
    pub fn push(&mut self, sample: Sample) -> Result<Option<Action>> {
        if let Err(e) = self.window.push(sample) {
            self.stats.samples_rejected += 1;
            debug!(%e, "sample rejected");
            return Err(e);
        }
        self.stats.samples_accepted += 1;

        if let Some(cb) = &mut self.on_cursor {
            cb(sample.x, sample.y);
        }

        let candidate = self.classifier.classify(&self.window);
        let emission = self.tracker.observe(candidate.as_ref(), sample.timestamp);
        Ok(emission.map(|e| self.resolve_and_dispatch(e)))
    }

    /// Drain every sample currently available from an ingest consumer.
    ///
    /// Out-of-order samples are dropped with a warning; interpretation
    /// continues with the next sample.
    pub fn drain(&mut self, consumer: &mut SampleConsumer) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Some(sample) = consumer.pop() {
            match self.push(sample) {
                Ok(Some(action)) => actions.push(action),
                Ok(None) => {}
                Err(e @ Error::InvalidSample { .. }) => {
                    warn!(%e, "dropping out-of-order sample from ingest ring");
                }
                Err(e) => {
                    warn!(%e, "sample processing failed");
                }
            }
        }
        actions
    }

    /// Resolve a pending armed gesture at end of stream, if any.
    pub fn flush(&mut self) -> Option<Action> {
        let now = self.window.latest_timestamp().unwrap_or_default();
        self.tracker
            .flush(now)
            .map(|e| self.resolve_and_dispatch(e))
    }

    /// Cancel interpretation, e.g. when input focus changes.
    ///
    /// Clears the sample window, forces the tracker to idle without emitting,
    /// and drops transient dispatch state. Registered targets, callbacks, and
    /// counters survive.
    pub fn reset(&mut self) {
        self.window.clear();
        self.tracker.reset();
        self.dispatcher.reset();
        debug!("interpreter reset");
    }

    /// Hit-test, dispatch, and deliver one emission.
    fn resolve_and_dispatch(&mut self, emission: Emission) -> Action {
        let (x, y) = emission.candidate.position;
        let target_id = self.targets.resolve(x, y).map(|t| t.id.clone());

        let recognized = RecognizedGesture {
            kind: emission.candidate.kind,
            resolved_at: emission.resolved_at,
            target_id,
            vector: emission.candidate.vector,
        };
        self.stats.gestures_recognized += 1;
        info!(
            kind = ?recognized.kind,
            target = ?recognized.target_id,
            at = recognized.resolved_at.as_millis(),
            "gesture recognized"
        );

        let action = match self.dispatcher.dispatch(&recognized) {
            Ok(action) => action,
            Err(Error::UnknownAction { .. }) => {
                // Already logged by the dispatcher; deliver a no-op so the
                // callback still fires exactly once.
                self.stats.unmapped_gestures += 1;
                Action::Noop
            }
            Err(e) => {
                warn!(%e, "dispatch failed");
                Action::Noop
            }
        };

        // The recognized gesture consumed its samples; the next gesture
        // starts from an empty window.
        self.window.clear();

        if let Some(log) = &self.log {
            log.store(recognized, action.clone());
        }
        if let Some(cb) = &mut self.on_action {
            cb(&action);
        }
        self.stats.actions_dispatched += 1;

        action
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(InterpreterConfig::default())
    }
}

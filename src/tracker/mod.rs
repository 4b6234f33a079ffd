//! Debounce/Hysteresis Tracking
//!
//! A candidate gesture can surface on every classification pass while the
//! finger is down; the tracker collapses that stream into exactly one
//! recognition per physical gesture. It arms on the first candidate, coalesces
//! repeats, and emits once when the sample stream goes silent for the cooldown
//! window or an unrelated kind appears. A post-emission cooldown, anchored at
//! the moment the gesture was last observed, swallows sensor jitter.
//!
//! Some candidate successions are continuations of one physical contact, not
//! kind changes. A tap is the onset of every gesture and only completes at
//! release, so an armed `Tap` re-arms as whatever the contact grows into; a
//! vertical swipe that keeps going past the swipe span re-arms as `Scroll`.
//! Upgrades never emit.

use crate::classify::{GestureCandidate, GestureKind};
use crate::time::{Duration, Timestamp};
use serde::{Deserialize, Serialize};

/// Default cooldown window (ms)
pub const DEFAULT_COOLDOWN_MS: u64 = 120;

/// Debounce configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Cooldown window in milliseconds
    pub cooldown_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
        }
    }
}

/// A gesture that survived debouncing.
///
/// Emitted at most once per physical gesture occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedGesture {
    /// Gesture kind
    pub kind: GestureKind,
    /// When the gesture was resolved
    pub resolved_at: Timestamp,
    /// Hit-tested target under the cursor, if any
    pub target_id: Option<String>,
    /// Net movement vector of the final candidate (pixels)
    pub vector: (f64, f64),
}

/// Emission handed from the tracker to the interpreter.
///
/// Carries the final candidate snapshot; the interpreter resolves the target
/// and builds the [`RecognizedGesture`].
#[derive(Debug, Clone, Copy)]
pub struct Emission {
    /// The candidate as last observed
    pub candidate: GestureCandidate,
    /// The moment the gesture was last observed
    pub resolved_at: Timestamp,
}

/// Tracker states
#[derive(Debug, Clone, Copy)]
pub enum TrackerState {
    /// No gesture in progress
    Idle,
    /// A candidate has been observed and is being coalesced
    Armed {
        /// Latest candidate snapshot (freshest vector and position)
        candidate: GestureCandidate,
        /// When the first candidate of this gesture arrived
        armed_at: Timestamp,
        /// When a candidate of this gesture was last observed
        last_seen: Timestamp,
        /// When any sample was last observed while armed
        last_observed: Timestamp,
    },
    /// Post-emission suppression window
    Cooldown {
        /// Candidates are suppressed until this instant
        until: Timestamp,
    },
}

/// Check whether `next` continues the gesture armed as `armed` rather than
/// starting a new one. An armed tap upgrades into anything: a completed tap
/// is identified by its release (stream silence), never by a kind change.
fn is_upgrade(armed: GestureKind, next: GestureKind) -> bool {
    armed == GestureKind::Tap || matches!((armed, next), (GestureKind::Swipe, GestureKind::Scroll))
}

/// Debounce/hysteresis state machine
///
/// Guarantee: for any physical gesture, exactly one [`Emission`] is produced.
#[derive(Debug)]
pub struct DebounceTracker {
    state: TrackerState,
    cooldown: Duration,
}

impl DebounceTracker {
    /// Create a tracker with the default cooldown.
    pub fn new() -> Self {
        Self::with_config(&DebounceConfig::default())
    }

    /// Create a tracker with an explicit cooldown.
    pub fn with_config(config: &DebounceConfig) -> Self {
        Self {
            state: TrackerState::Idle,
            cooldown: Duration::from_millis(config.cooldown_ms),
        }
    }

    /// Current state.
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Check if the tracker is idle.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, TrackerState::Idle)
    }

    /// Feed one classification result at sample time `now`.
    ///
    /// Returns an emission when an armed gesture resolves: either the sample
    /// stream went silent for a full cooldown window, or a candidate of an
    /// unrelated kind appeared.
    pub fn observe(
        &mut self,
        candidate: Option<&GestureCandidate>,
        now: Timestamp,
    ) -> Option<Emission> {
        // Leave cooldown before considering new candidates; candidates seen
        // inside the window are jitter and are swallowed.
        if let TrackerState::Cooldown { until } = self.state {
            if now < until {
                return None;
            }
            self.state = TrackerState::Idle;
        }

        let TrackerState::Armed {
            candidate: armed,
            last_seen,
            last_observed,
            ..
        } = &mut self.state
        else {
            // Idle: a candidate arms, anything else is ignored
            if let Some(c) = candidate {
                self.state = TrackerState::Armed {
                    candidate: *c,
                    armed_at: now,
                    last_seen: now,
                    last_observed: now,
                };
            }
            return None;
        };

        // A silent stream means the contact ended; whatever was armed is the
        // finished gesture. The incoming candidate is classified from a
        // window straddling the silence, so it is discarded, not armed.
        if now.duration_since(*last_observed) >= self.cooldown {
            let emission = Emission {
                candidate: *armed,
                resolved_at: *last_seen,
            };
            let gesture_end = emission.resolved_at;
            self.enter_cooldown(gesture_end);
            return Some(emission);
        }
        *last_observed = now;

        match candidate {
            None => None,
            Some(c) if c.kind == armed.kind || is_upgrade(armed.kind, c.kind) => {
                // Same gesture continuing (or outgrowing its kind): no
                // re-emit, refresh the snapshot
                *armed = *c;
                *last_seen = now;
                None
            }
            Some(_) => {
                // Unrelated kind: the armed gesture is over
                let emission = Emission {
                    candidate: *armed,
                    resolved_at: *last_seen,
                };
                let gesture_end = emission.resolved_at;
                self.enter_cooldown(gesture_end);
                Some(emission)
            }
        }
    }

    /// Force-emit a pending armed gesture at end of stream.
    pub fn flush(&mut self, _now: Timestamp) -> Option<Emission> {
        if let TrackerState::Armed {
            candidate,
            last_seen,
            ..
        } = self.state
        {
            let emission = Emission {
                candidate,
                resolved_at: last_seen,
            };
            self.enter_cooldown(last_seen);
            return Some(emission);
        }
        None
    }

    /// Cancel any gesture in progress without emitting.
    ///
    /// Used when the input focus changes.
    pub fn reset(&mut self) {
        self.state = TrackerState::Idle;
    }

    /// Suppression runs from the moment the gesture was last physically
    /// observed, so a gesture starting after a genuine pause is never
    /// penalized.
    fn enter_cooldown(&mut self, gesture_end: Timestamp) {
        self.state = TrackerState::Cooldown {
            until: gesture_end.advanced_by(self.cooldown),
        };
    }
}

impl Default for DebounceTracker {
    fn default() -> Self {
        Self::new()
    }
}

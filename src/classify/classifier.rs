//! Gesture Classification
//!
//! A stateless, deterministic mapping from a window of samples to a candidate
//! gesture with a confidence score. Classification has no side effects:
//! identical window contents always produce the identical candidate.

use super::features::{Axis, WindowFeatures};
use crate::capture::window::SampleWindow;
use crate::time::Duration;
use serde::{Deserialize, Serialize};

/// Recognized gesture kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    /// Brief contact with negligible movement
    Tap,
    /// Fast directional movement
    Swipe,
    /// Stationary contact held in place
    Hold,
    /// Sustained vertical movement with pressure
    Scroll,
}

impl GestureKind {
    /// Specificity rank used to break confidence ties.
    /// Lower is more specific: Tap > Hold > Swipe > Scroll.
    pub fn specificity(&self) -> u8 {
        match self {
            GestureKind::Tap => 0,
            GestureKind::Hold => 1,
            GestureKind::Swipe => 2,
            GestureKind::Scroll => 3,
        }
    }
}

/// A candidate gesture produced by one classification pass.
///
/// Created per pass and discarded after the debounce decision.
#[derive(Debug, Clone, Copy)]
pub struct GestureCandidate {
    /// Gesture kind
    pub kind: GestureKind,
    /// Confidence in [0, 1]
    pub confidence: f32,
    /// Net movement vector of the window (pixels)
    pub vector: (f64, f64),
    /// Cursor position of the most recent sample, for hit-testing
    pub position: (f64, f64),
    /// Time the gesture spans
    pub duration: Duration,
}

/// Classifier thresholds.
///
/// All values are overridable at construction time and from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Maximum window span for a tap (ms)
    pub tap_max_span_ms: u64,
    /// Maximum excursion for a tap (px)
    pub tap_max_displacement_px: f64,
    /// Minimum net displacement for a swipe (px)
    pub swipe_min_displacement_px: f64,
    /// Maximum window span for a swipe (ms)
    pub swipe_max_span_ms: u64,
    /// Maximum excursion for a hold (px)
    pub hold_max_displacement_px: f64,
    /// Minimum window span for a hold (ms)
    pub hold_min_span_ms: u64,
    /// Minimum window span for a scroll (ms); distinguishes scroll from swipe
    pub scroll_min_span_ms: u64,
    /// Minimum vertical displacement for a scroll (px)
    pub scroll_min_displacement_px: f64,
    /// Minimum sustained pressure for a scroll
    pub scroll_min_pressure: f32,
    /// Candidates below this confidence are discarded
    pub confidence_threshold: f32,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            tap_max_span_ms: 150,
            tap_max_displacement_px: 8.0,
            swipe_min_displacement_px: 40.0,
            swipe_max_span_ms: 400,
            hold_max_displacement_px: 5.0,
            hold_min_span_ms: 500,
            scroll_min_span_ms: 400,
            scroll_min_displacement_px: 10.0,
            scroll_min_pressure: 0.2,
            confidence_threshold: 0.6,
        }
    }
}

/// Stateless gesture classifier
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifyConfig,
}

impl GestureClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self::with_config(ClassifyConfig::default())
    }

    /// Create a classifier with explicit thresholds.
    pub fn with_config(config: ClassifyConfig) -> Self {
        Self { config }
    }

    /// The active thresholds.
    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }

    /// Classify the current window contents.
    ///
    /// Returns `None` when no pattern reaches the confidence threshold.
    /// Ties between overlapping matches are resolved by highest confidence,
    /// then by the more specific kind.
    pub fn classify(&self, window: &SampleWindow) -> Option<GestureCandidate> {
        let features = WindowFeatures::extract(window)?;

        let mut best: Option<GestureCandidate> = None;
        for candidate in [
            self.match_tap(&features),
            self.match_hold(&features),
            self.match_swipe(&features),
            self.match_scroll(&features),
        ]
        .into_iter()
        .flatten()
        {
            if candidate.confidence < self.config.confidence_threshold {
                continue;
            }
            best = match best {
                None => Some(candidate),
                Some(current) => {
                    let wins = candidate.confidence > current.confidence
                        || (candidate.confidence == current.confidence
                            && candidate.kind.specificity() < current.kind.specificity());
                    Some(if wins { candidate } else { current })
                }
            };
        }

        best
    }

    /// Tap: brief span, negligible excursion.
    /// Confidence falls off linearly as the excursion approaches the limit,
    /// so a borderline-wobbly tap reads as ambiguous.
    fn match_tap(&self, f: &WindowFeatures) -> Option<GestureCandidate> {
        if f.span.as_millis() >= self.config.tap_max_span_ms
            || f.max_excursion >= self.config.tap_max_displacement_px
        {
            return None;
        }
        let confidence =
            1.0 - 0.5 * (f.max_excursion / self.config.tap_max_displacement_px) as f32;
        Some(GestureCandidate {
            kind: GestureKind::Tap,
            confidence: confidence.clamp(0.0, 1.0),
            vector: f.net,
            position: f.last_position,
            duration: f.span,
        })
    }

    /// Hold: stationary for at least the minimum span.
    fn match_hold(&self, f: &WindowFeatures) -> Option<GestureCandidate> {
        if f.span.as_millis() < self.config.hold_min_span_ms
            || f.max_excursion >= self.config.hold_max_displacement_px
        {
            return None;
        }
        let stillness = 1.0 - (f.max_excursion / self.config.hold_max_displacement_px) as f32;
        let duration_bonus = ((f.span.as_millis() as f32 / 1_000.0) - 0.5).clamp(0.0, 1.0);
        let confidence = 0.6 + 0.3 * stillness + 0.1 * duration_bonus;
        Some(GestureCandidate {
            kind: GestureKind::Hold,
            confidence: confidence.clamp(0.0, 1.0),
            vector: f.net,
            position: f.last_position,
            duration: f.span,
        })
    }

    /// Swipe: the displacement threshold reached within the span limit.
    /// Confidence saturates at twice the minimum displacement.
    fn match_swipe(&self, f: &WindowFeatures) -> Option<GestureCandidate> {
        if f.net_displacement < self.config.swipe_min_displacement_px
            || f.span.as_millis() > self.config.swipe_max_span_ms
        {
            return None;
        }
        let confidence =
            (f.net_displacement / (2.0 * self.config.swipe_min_displacement_px)) as f32;
        Some(GestureCandidate {
            kind: GestureKind::Swipe,
            confidence: confidence.clamp(0.0, 1.0),
            vector: f.net,
            position: f.last_position,
            duration: f.span,
        })
    }

    /// Scroll: vertically dominant movement with sustained pressure, longer
    /// than the swipe span limit.
    fn match_scroll(&self, f: &WindowFeatures) -> Option<GestureCandidate> {
        if f.dominant_axis != Axis::Vertical
            || f.net.1.abs() < self.config.scroll_min_displacement_px
            || f.min_pressure < self.config.scroll_min_pressure
            || f.span.as_millis() <= self.config.scroll_min_span_ms
        {
            return None;
        }
        let vertical_ratio = (f.net.1.abs() / f.net_displacement) as f32;
        let pressure_factor =
            (f.mean_pressure / (2.0 * self.config.scroll_min_pressure)).clamp(0.0, 1.0);
        let span_factor = (f.span.as_millis() as f32 / 800.0).clamp(0.0, 1.0);
        let confidence = 0.4 * vertical_ratio + 0.3 * pressure_factor + 0.3 * span_factor;
        Some(GestureCandidate {
            kind: GestureKind::Scroll,
            confidence: confidence.clamp(0.0, 1.0),
            vector: f.net,
            position: f.last_position,
            duration: f.span,
        })
    }
}

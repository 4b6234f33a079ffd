//! Window Feature Extraction
//!
//! Reduces a sample window to the small set of kinematic features the
//! classifier scores against: span, net displacement, maximum excursion,
//! dominant axis, and pressure statistics.

use crate::capture::window::SampleWindow;
use crate::time::Duration;

/// Dominant movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Direction of a swipe, derived from its net vector.
///
/// Screen coordinates: y grows downward, so `Up` means negative dy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Derive the direction from a net movement vector.
    /// Returns `None` for a zero vector.
    pub fn from_vector(dx: f64, dy: f64) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(if dx > 0.0 { Self::Right } else { Self::Left })
        } else {
            Some(if dy > 0.0 { Self::Down } else { Self::Up })
        }
    }
}

/// Kinematic features of a sample window
#[derive(Debug, Clone, Copy)]
pub struct WindowFeatures {
    /// Number of samples in the window
    pub sample_count: usize,
    /// Time covered, oldest to newest
    pub span: Duration,
    /// Net movement vector, first sample to last
    pub net: (f64, f64),
    /// Magnitude of the net vector (pixels)
    pub net_displacement: f64,
    /// Total path length along consecutive samples (pixels)
    pub path_length: f64,
    /// Maximum distance of any sample from the first (pixels).
    /// Unlike net displacement, this catches out-and-back wander.
    pub max_excursion: f64,
    /// Dominant axis of the net vector
    pub dominant_axis: Axis,
    /// Position of the most recent sample
    pub last_position: (f64, f64),
    /// Mean pressure across the window
    pub mean_pressure: f32,
    /// Minimum pressure across the window
    pub min_pressure: f32,
}

impl WindowFeatures {
    /// Extract features from a window.
    ///
    /// Returns `None` when the window holds fewer than two samples; a single
    /// point has no span or direction to score.
    pub fn extract(window: &SampleWindow) -> Option<Self> {
        if window.len() < 2 {
            return None;
        }

        let first = window.first().expect("len >= 2");
        let last = window.latest().expect("len >= 2");

        let net = (last.x - first.x, last.y - first.y);
        let net_displacement = (net.0 * net.0 + net.1 * net.1).sqrt();

        let mut path_length = 0.0;
        let mut max_excursion: f64 = 0.0;
        let mut pressure_sum = 0.0f32;
        let mut min_pressure = f32::MAX;
        let mut prev: Option<&crate::capture::types::Sample> = None;

        for sample in window.iter() {
            if let Some(p) = prev {
                path_length += p.distance_to(sample);
            }
            max_excursion = max_excursion.max(first.distance_to(sample));
            pressure_sum += sample.pressure;
            min_pressure = min_pressure.min(sample.pressure);
            prev = Some(sample);
        }

        let dominant_axis = if net.0.abs() >= net.1.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };

        Some(Self {
            sample_count: window.len(),
            span: window.span(),
            net,
            net_displacement,
            path_length,
            max_excursion,
            dominant_axis,
            last_position: (last.x, last.y),
            mean_pressure: pressure_sum / window.len() as f32,
            min_pressure,
        })
    }
}

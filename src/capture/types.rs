//! Core types for sample capture
//!
//! Defines the fundamental data structures used throughout the
//! interpretation pipeline.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// A single pointer/touch sample as delivered by the input driver.
///
/// Immutable once recorded. `pressure` is normalized to `[0, 1]`; drivers
/// without pressure sensing report 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Horizontal position in pixels
    pub x: f64,
    /// Vertical position in pixels
    pub y: f64,
    /// Driver-assigned timestamp
    pub timestamp: Timestamp,
    /// Contact pressure, normalized to [0, 1]
    pub pressure: f32,
}

impl Sample {
    /// Create a new sample with zero pressure.
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            x,
            y,
            timestamp: Timestamp::from_millis(timestamp_ms),
            pressure: 0.0,
        }
    }

    /// Create a new sample with explicit pressure.
    ///
    /// Pressure is clamped to [0, 1]; the driver contract says it never
    /// leaves that range, but a misbehaving driver must not corrupt
    /// downstream classification.
    pub fn with_pressure(x: f64, y: f64, timestamp_ms: u64, pressure: f32) -> Self {
        Self {
            x,
            y,
            timestamp: Timestamp::from_millis(timestamp_ms),
            pressure: pressure.clamp(0.0, 1.0),
        }
    }

    /// Euclidean distance to another sample's position.
    pub fn distance_to(&self, other: &Sample) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

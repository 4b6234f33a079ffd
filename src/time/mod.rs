//! Millisecond timestamp and duration arithmetic
//!
//! The interpreter never reads a system clock: every sample carries a
//! millisecond timestamp assigned by the pointer/touch driver, and all timing
//! decisions (window spans, debounce cooldowns) are derived from those values.
//! This keeps classification deterministic and makes traces replayable.

use serde::{Deserialize, Serialize};

/// A timestamp in milliseconds, as reported by the input driver.
///
/// The origin is driver-defined (typically boot or stream start); only
/// differences between timestamps are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from raw milliseconds.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Get the raw millisecond value.
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Calculate duration since another timestamp.
    /// Saturates to zero if `earlier` is actually later.
    #[inline]
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// Check if this timestamp is strictly after another.
    #[inline]
    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }

    /// Offset this timestamp forward by a duration.
    #[inline]
    pub fn advanced_by(&self, d: Duration) -> Timestamp {
        Timestamp(self.0.saturating_add(d.as_millis()))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Timestamp(millis))
    }
}

/// A duration in milliseconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Duration(u64);

impl Duration {
    /// Zero duration.
    pub const ZERO: Duration = Duration(0);

    /// Create a duration from milliseconds.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Get the raw millisecond value.
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000.0
    }
}

impl std::ops::Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

/// Check that two timestamps maintain non-decreasing order.
#[inline]
pub fn is_monotonic(t1: Timestamp, t2: Timestamp) -> bool {
    t2 >= t1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_ordering() {
        let t1 = Timestamp::from_millis(1_000);
        let t2 = Timestamp::from_millis(2_000);
        let t3 = Timestamp::from_millis(1_000);

        assert!(t2 > t1);
        assert!(t1 < t2);
        assert_eq!(t1, t3);
        assert!(t2.is_after(t1));
        assert!(!t1.is_after(t2));
        assert!(!t1.is_after(t3));
    }

    #[test]
    fn test_duration_since() {
        let t1 = Timestamp::from_millis(500);
        let t2 = Timestamp::from_millis(620);

        assert_eq!(t2.duration_since(t1).as_millis(), 120);
        // Reversed order saturates to zero
        assert_eq!(t1.duration_since(t2), Duration::ZERO);
    }

    #[test]
    fn test_advanced_by() {
        let t = Timestamp::from_millis(100);
        assert_eq!(t.advanced_by(Duration::from_millis(120)).as_millis(), 220);
        assert_eq!(
            Timestamp::from_millis(u64::MAX)
                .advanced_by(Duration::from_millis(1))
                .as_millis(),
            u64::MAX
        );
    }

    #[test]
    fn test_duration_arithmetic() {
        let d1 = Duration::from_millis(100);
        let d2 = Duration::from_millis(50);

        assert_eq!((d1 + d2).as_millis(), 150);
        assert_eq!((d1 - d2).as_millis(), 50);
        // Saturating subtraction
        assert_eq!((d2 - d1).as_millis(), 0);
    }

    #[test]
    fn test_duration_as_secs_f64() {
        let d = Duration::from_millis(1_500);
        assert!((d.as_secs_f64() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_monotonicity() {
        let t1 = Timestamp::from_millis(100);
        let t2 = Timestamp::from_millis(100);
        let t3 = Timestamp::from_millis(99);

        assert!(is_monotonic(t1, t2), "equal timestamps are monotonic");
        assert!(!is_monotonic(t1, t3), "decreasing timestamps are not");
    }

    #[test]
    fn test_timestamp_serialization() {
        let ts = Timestamp::from_millis(123_456_789);

        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "123456789");

        let deserialized: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, ts);
    }
}

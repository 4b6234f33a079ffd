//! Target Hit-Testing
//!
//! Resolves which registered on-screen region a cursor coordinate intersects,
//! for hover/click disambiguation. Targets are registered by the UI
//! collaborator and are read-only to the rest of the core; resolution is a
//! linear scan in reverse registration order, so the most recently registered
//! target wins when regions overlap.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check whether a point lies inside this rectangle.
    /// Edges are inclusive on the origin side, exclusive on the far side.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A named hit-testable region associated with an on-screen control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Stable identifier assigned by the UI
    pub id: String,
    /// Screen bounds
    pub bounds: Rect,
}

/// Registry of hit-testable targets.
///
/// Registration order is significant: later registrations are topmost.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target, making it topmost.
    ///
    /// Re-registering an existing id replaces its bounds and promotes it.
    pub fn register(&mut self, id: impl Into<String>, bounds: Rect) {
        let id = id.into();
        self.targets.retain(|t| t.id != id);
        self.targets.push(Target { id, bounds });
    }

    /// Remove a target by id. Returns true if it was present.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.id != id);
        self.targets.len() != before
    }

    /// Remove all targets.
    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Resolve the topmost target containing the point, if any.
    ///
    /// Deterministic given a fixed registration order.
    pub fn resolve(&self, x: f64, y: f64) -> Option<&Target> {
        self.targets.iter().rev().find(|t| t.bounds.contains(x, y))
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterate over targets in registration order (bottom to top).
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(r.contains(10.0, 20.0), "origin edge is inclusive");
        assert!(r.contains(50.0, 40.0));
        assert!(!r.contains(110.0, 40.0), "far edge is exclusive");
        assert!(!r.contains(50.0, 70.0));
        assert!(!r.contains(9.9, 40.0));
    }

    #[test]
    fn test_resolve_miss() {
        let mut registry = TargetRegistry::new();
        registry.register("button", Rect::new(0.0, 0.0, 10.0, 10.0));

        assert!(registry.resolve(50.0, 50.0).is_none());
    }

    #[test]
    fn test_resolve_hit() {
        let mut registry = TargetRegistry::new();
        registry.register("open-menu", Rect::new(10.0, 10.0, 120.0, 40.0));

        let target = registry.resolve(20.0, 20.0).expect("should hit");
        assert_eq!(target.id, "open-menu");
    }

    #[test]
    fn test_overlap_topmost_wins() {
        let mut registry = TargetRegistry::new();
        registry.register("below", Rect::new(0.0, 0.0, 100.0, 100.0));
        registry.register("above", Rect::new(50.0, 50.0, 100.0, 100.0));

        // Both contain (60, 60); the most recently registered wins
        assert_eq!(registry.resolve(60.0, 60.0).unwrap().id, "above");
        // Only "below" contains (10, 10)
        assert_eq!(registry.resolve(10.0, 10.0).unwrap().id, "below");
    }

    #[test]
    fn test_reregistration_promotes() {
        let mut registry = TargetRegistry::new();
        registry.register("a", Rect::new(0.0, 0.0, 100.0, 100.0));
        registry.register("b", Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(registry.resolve(5.0, 5.0).unwrap().id, "b");

        // Re-registering "a" promotes it to topmost without duplicating
        registry.register("a", Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(registry.resolve(5.0, 5.0).unwrap().id, "a");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unregister() {
        let mut registry = TargetRegistry::new();
        registry.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));

        assert!(registry.unregister("a"));
        assert!(!registry.unregister("a"), "already removed");
        assert!(registry.resolve(5.0, 5.0).is_none());
    }

    #[test]
    fn test_clear() {
        let mut registry = TargetRegistry::new();
        registry.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        registry.register("b", Rect::new(0.0, 0.0, 10.0, 10.0));

        registry.clear();
        assert!(registry.is_empty());
    }
}

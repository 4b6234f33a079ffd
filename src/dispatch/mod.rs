//! Action Dispatch
//!
//! Maps recognized gestures to application actions through a
//! (gesture kind × target id) table and instantiates action templates with
//! gesture data: scroll magnitudes are smoothed and scaled, swipes resolve to
//! menu actions by direction, and hover/activate actions carry the hit-tested
//! target. Menu open/close state is tracked so redundant transitions degrade
//! to no-ops.

pub mod log;

pub use log::RecognitionLog;

use crate::classify::{GestureKind, SwipeDirection};
use crate::tracker::RecognizedGesture;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// An application action produced by the dispatcher.
///
/// The vocabulary is the caller-facing surface of the interpreter; `Noop`
/// preserves the exactly-once callback contract for suppressed or unmapped
/// gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Open the application menu
    OpenMenu,
    /// Close the application menu
    CloseMenu,
    /// Scroll the content area by a vertical delta (pixels)
    ScrollBy { dy: f64 },
    /// Hover highlight a target
    HoverTarget { id: String },
    /// Activate (click) a target
    Activate { id: String },
    /// No effect
    Noop,
}

/// A mapping-table entry, instantiated with gesture data at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionTemplate {
    /// Always open the menu
    OpenMenu,
    /// Always close the menu
    CloseMenu,
    /// Swipe up opens the menu, swipe down closes it
    DirectionalMenu,
    /// Scroll by the gesture's smoothed vertical delta
    ScrollBy,
    /// Hover the resolved target (requires one)
    HoverTarget,
    /// Activate the resolved target (requires one)
    Activate,
}

/// Mapping table from (gesture kind, optional target id) to action templates.
///
/// Lookup tries the exact `(kind, Some(target))` key first, then the
/// `(kind, None)` entry, which doubles as the per-kind wildcard.
#[derive(Debug, Clone)]
pub struct ActionMap {
    table: HashMap<(GestureKind, Option<String>), ActionTemplate>,
}

impl ActionMap {
    /// Create an empty map.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Bind a template for a kind on a specific target.
    pub fn bind(
        &mut self,
        kind: GestureKind,
        target: impl Into<String>,
        template: ActionTemplate,
    ) -> &mut Self {
        self.table.insert((kind, Some(target.into())), template);
        self
    }

    /// Bind the wildcard template for a kind.
    pub fn bind_kind(&mut self, kind: GestureKind, template: ActionTemplate) -> &mut Self {
        self.table.insert((kind, None), template);
        self
    }

    /// Look up the template for a recognized gesture.
    pub fn lookup(&self, kind: GestureKind, target: Option<&str>) -> Option<ActionTemplate> {
        if let Some(t) = target {
            if let Some(template) = self.table.get(&(kind, Some(t.to_string()))) {
                return Some(*template);
            }
        }
        self.table.get(&(kind, None)).copied()
    }
}

impl Default for ActionMap {
    /// The default vocabulary: swipes drive the menu, scrolls scroll, holds
    /// hover, taps activate.
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind_kind(GestureKind::Swipe, ActionTemplate::DirectionalMenu)
            .bind_kind(GestureKind::Scroll, ActionTemplate::ScrollBy)
            .bind_kind(GestureKind::Hold, ActionTemplate::HoverTarget)
            .bind_kind(GestureKind::Tap, ActionTemplate::Activate);
        map
    }
}

/// Dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Scale factor applied to raw scroll deltas
    pub scroll_multiplier: f64,
    /// Moving-average window over recent scroll deltas
    pub scroll_smoothing: usize,
    /// Smoothed magnitudes below this dispatch as no-ops (pixels)
    pub scroll_min_output: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            scroll_multiplier: 40.0,
            scroll_smoothing: 3,
            scroll_min_output: 0.5,
        }
    }
}

/// Moving-average smoother over recent scroll deltas.
///
/// Scroll output jitters sample to sample; averaging the last few deltas
/// keeps the scroll velocity stable without adding perceptible lag.
#[derive(Debug, Clone)]
struct ScrollSmoother {
    window: VecDeque<f64>,
    capacity: usize,
}

impl ScrollSmoother {
    fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    fn push(&mut self, delta: f64) -> f64 {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(delta);
        self.window.iter().sum::<f64>() / self.window.len() as f64
    }

    fn clear(&mut self) {
        self.window.clear();
    }
}

/// Maps recognized gestures to actions and tracks menu state.
#[derive(Debug)]
pub struct ActionDispatcher {
    map: ActionMap,
    config: DispatchConfig,
    smoother: ScrollSmoother,
    menu_open: bool,
}

impl ActionDispatcher {
    /// Create a dispatcher with the default map and config.
    pub fn new() -> Self {
        Self::with_parts(ActionMap::default(), DispatchConfig::default())
    }

    /// Create a dispatcher with an explicit map and config.
    pub fn with_parts(map: ActionMap, config: DispatchConfig) -> Self {
        let smoothing = config.scroll_smoothing;
        Self {
            map,
            config,
            smoother: ScrollSmoother::new(smoothing),
            menu_open: false,
        }
    }

    /// Mutable access to the mapping table.
    pub fn map_mut(&mut self) -> &mut ActionMap {
        &mut self.map
    }

    /// Whether the dispatcher currently considers the menu open.
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Sync menu state from the UI (e.g. the menu was closed by other means).
    pub fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    /// Map a recognized gesture to an action.
    ///
    /// Fails with [`Error::UnknownAction`] when no table entry applies; the
    /// caller converts that to `Noop` so the callback contract holds.
    pub fn dispatch(&mut self, gesture: &RecognizedGesture) -> Result<Action> {
        // A non-scroll recognition breaks any scroll in progress
        if gesture.kind != GestureKind::Scroll {
            self.smoother.clear();
        }

        let template = self
            .map
            .lookup(gesture.kind, gesture.target_id.as_deref())
            .ok_or_else(|| self.unknown(gesture))?;

        match template {
            ActionTemplate::OpenMenu => Ok(self.open_menu()),
            ActionTemplate::CloseMenu => Ok(self.close_menu()),
            ActionTemplate::DirectionalMenu => {
                match SwipeDirection::from_vector(gesture.vector.0, gesture.vector.1) {
                    Some(SwipeDirection::Up) => Ok(self.open_menu()),
                    Some(SwipeDirection::Down) => Ok(self.close_menu()),
                    _ => Err(self.unknown(gesture)),
                }
            }
            ActionTemplate::ScrollBy => {
                let raw = gesture.vector.1 * self.config.scroll_multiplier;
                let dy = self.smoother.push(raw);
                if dy.abs() < self.config.scroll_min_output {
                    debug!(dy, "scroll delta below output threshold");
                    Ok(Action::Noop)
                } else {
                    Ok(Action::ScrollBy { dy })
                }
            }
            ActionTemplate::HoverTarget => match &gesture.target_id {
                Some(id) => Ok(Action::HoverTarget { id: id.clone() }),
                None => Err(self.unknown(gesture)),
            },
            ActionTemplate::Activate => match &gesture.target_id {
                Some(id) => Ok(Action::Activate { id: id.clone() }),
                None => Err(self.unknown(gesture)),
            },
        }
    }

    /// Clear transient dispatch state (scroll smoothing).
    /// Menu state survives a reset; it mirrors the UI, not the input stream.
    pub fn reset(&mut self) {
        self.smoother.clear();
    }

    fn open_menu(&mut self) -> Action {
        if self.menu_open {
            debug!("menu already open; suppressing OpenMenu");
            Action::Noop
        } else {
            self.menu_open = true;
            Action::OpenMenu
        }
    }

    fn close_menu(&mut self) -> Action {
        if self.menu_open {
            self.menu_open = false;
            Action::CloseMenu
        } else {
            debug!("menu already closed; suppressing CloseMenu");
            Action::Noop
        }
    }

    fn unknown(&self, gesture: &RecognizedGesture) -> Error {
        warn!(
            kind = ?gesture.kind,
            target = ?gesture.target_id,
            "no action mapped for recognized gesture"
        );
        Error::UnknownAction {
            kind: gesture.kind,
            target: gesture.target_id.clone(),
        }
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    fn gesture(kind: GestureKind, vector: (f64, f64), target: Option<&str>) -> RecognizedGesture {
        RecognizedGesture {
            kind,
            resolved_at: Timestamp::from_millis(1_000),
            target_id: target.map(String::from),
            vector,
        }
    }

    #[test]
    fn test_swipe_up_opens_menu_once() {
        let mut dispatcher = ActionDispatcher::new();

        let action = dispatcher
            .dispatch(&gesture(GestureKind::Swipe, (0.0, -60.0), None))
            .unwrap();
        assert_eq!(action, Action::OpenMenu);
        assert!(dispatcher.menu_open());

        // Redundant open degrades to Noop
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Swipe, (0.0, -60.0), None))
            .unwrap();
        assert_eq!(action, Action::Noop);
    }

    #[test]
    fn test_swipe_down_closes_menu() {
        let mut dispatcher = ActionDispatcher::new();

        // Closed menu: CloseMenu suppressed
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Swipe, (0.0, 60.0), None))
            .unwrap();
        assert_eq!(action, Action::Noop);

        dispatcher.set_menu_open(true);
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Swipe, (0.0, 60.0), None))
            .unwrap();
        assert_eq!(action, Action::CloseMenu);
        assert!(!dispatcher.menu_open());
    }

    #[test]
    fn test_horizontal_swipe_unmapped() {
        let mut dispatcher = ActionDispatcher::new();
        let result = dispatcher.dispatch(&gesture(GestureKind::Swipe, (60.0, 0.0), None));

        match result {
            Err(Error::UnknownAction { kind, .. }) => assert_eq!(kind, GestureKind::Swipe),
            other => panic!("expected UnknownAction, got {other:?}"),
        }
    }

    #[test]
    fn test_scroll_scaled_and_smoothed() {
        let mut dispatcher = ActionDispatcher::new();

        // First scroll: average of one delta
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Scroll, (0.0, 2.0), None))
            .unwrap();
        assert_eq!(action, Action::ScrollBy { dy: 80.0 });

        // Second scroll: average of (80, 40)
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Scroll, (0.0, 1.0), None))
            .unwrap();
        assert_eq!(action, Action::ScrollBy { dy: 60.0 });
    }

    #[test]
    fn test_scroll_below_threshold_is_noop() {
        let mut dispatcher = ActionDispatcher::new();
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Scroll, (0.0, 0.004), None))
            .unwrap();
        assert_eq!(action, Action::Noop);
    }

    #[test]
    fn test_non_scroll_clears_smoothing() {
        let mut dispatcher = ActionDispatcher::new();

        dispatcher
            .dispatch(&gesture(GestureKind::Scroll, (0.0, 2.0), None))
            .unwrap();
        // An intervening tap breaks the scroll
        let _ = dispatcher.dispatch(&gesture(GestureKind::Tap, (0.0, 0.0), Some("item")));

        // The next scroll starts a fresh average
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Scroll, (0.0, 1.0), None))
            .unwrap();
        assert_eq!(action, Action::ScrollBy { dy: 40.0 });
    }

    #[test]
    fn test_hold_hovers_target() {
        let mut dispatcher = ActionDispatcher::new();
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Hold, (0.0, 0.0), Some("settings")))
            .unwrap();
        assert_eq!(
            action,
            Action::HoverTarget {
                id: "settings".into()
            }
        );
    }

    #[test]
    fn test_hold_without_target_unmapped() {
        let mut dispatcher = ActionDispatcher::new();
        assert!(dispatcher
            .dispatch(&gesture(GestureKind::Hold, (0.0, 0.0), None))
            .is_err());
    }

    #[test]
    fn test_tap_activates_target() {
        let mut dispatcher = ActionDispatcher::new();
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Tap, (1.0, 0.0), Some("help")))
            .unwrap();
        assert_eq!(action, Action::Activate { id: "help".into() });
    }

    #[test]
    fn test_target_binding_overrides_wildcard() {
        let mut dispatcher = ActionDispatcher::new();
        dispatcher
            .map_mut()
            .bind(GestureKind::Tap, "menu-button", ActionTemplate::OpenMenu);

        let action = dispatcher
            .dispatch(&gesture(GestureKind::Tap, (0.0, 0.0), Some("menu-button")))
            .unwrap();
        assert_eq!(action, Action::OpenMenu);

        // Other targets still use the wildcard
        let action = dispatcher
            .dispatch(&gesture(GestureKind::Tap, (0.0, 0.0), Some("help")))
            .unwrap();
        assert_eq!(action, Action::Activate { id: "help".into() });
    }

    #[test]
    fn test_empty_map_everything_unmapped() {
        let mut dispatcher =
            ActionDispatcher::with_parts(ActionMap::empty(), DispatchConfig::default());
        assert!(dispatcher
            .dispatch(&gesture(GestureKind::Tap, (0.0, 0.0), Some("help")))
            .is_err());
    }
}

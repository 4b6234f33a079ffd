//! Recognition Log
//!
//! Thread-safe storage for recognized gestures and the actions they produced.
//! The interpreter appends as it dispatches; a UI or inspection thread can
//! drain the log without stopping interpretation.

use super::Action;
use crate::tracker::RecognizedGesture;
use parking_lot::RwLock;

/// One log entry: a recognition and its dispatched action.
#[derive(Debug, Clone)]
pub struct RecognitionEntry {
    pub gesture: RecognizedGesture,
    pub action: Action,
}

/// Bounded, shareable log of dispatched recognitions.
pub struct RecognitionLog {
    entries: RwLock<Vec<RecognitionEntry>>,
    capacity: usize,
}

impl RecognitionLog {
    /// Create a log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    /// Store an entry. Returns false (and drops the entry) when full.
    pub fn store(&self, gesture: RecognizedGesture, action: Action) -> bool {
        let mut entries = self.entries.write();
        if entries.len() < self.capacity {
            entries.push(RecognitionEntry { gesture, action });
            true
        } else {
            false
        }
    }

    /// Take all stored entries, leaving the log empty.
    pub fn drain(&self) -> Vec<RecognitionEntry> {
        let mut entries = self.entries.write();
        std::mem::take(&mut *entries)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::GestureKind;
    use crate::time::Timestamp;

    fn entry_gesture() -> RecognizedGesture {
        RecognizedGesture {
            kind: GestureKind::Tap,
            resolved_at: Timestamp::from_millis(10),
            target_id: None,
            vector: (0.0, 0.0),
        }
    }

    #[test]
    fn test_store_and_drain() {
        let log = RecognitionLog::new(16);
        assert!(log.store(entry_gesture(), Action::Noop));
        assert_eq!(log.len(), 1);

        let entries = log.drain();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, Action::Noop);
        assert!(log.is_empty());

        // Draining again yields nothing
        assert!(log.drain().is_empty());
    }

    #[test]
    fn test_capacity_limit() {
        let log = RecognitionLog::new(2);
        assert!(log.store(entry_gesture(), Action::Noop));
        assert!(log.store(entry_gesture(), Action::Noop));
        assert!(!log.store(entry_gesture(), Action::Noop), "full log drops");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_shared_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let log = Arc::new(RecognitionLog::new(128));
        let writer = Arc::clone(&log);

        let handle = thread::spawn(move || {
            for _ in 0..50 {
                writer.store(entry_gesture(), Action::OpenMenu);
            }
        });

        handle.join().unwrap();
        assert_eq!(log.len(), 50);
    }
}

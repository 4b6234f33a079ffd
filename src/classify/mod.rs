//! Gesture classification
//!
//! This module turns noisy sample windows into candidate gestures using:
//! - Kinematic feature extraction (span, displacement, excursion, pressure)
//! - Threshold scoring with per-kind confidence
//! - Specificity-ordered tie breaking

pub mod features;
pub mod classifier;

pub use classifier::{ClassifyConfig, GestureCandidate, GestureClassifier, GestureKind};
pub use features::{Axis, SwipeDirection, WindowFeatures};

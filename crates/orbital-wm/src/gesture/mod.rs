//! Touch gesture recognition
//!
//! Classifies a raw touch stream into taps, double-taps, long-presses,
//! swipes, and pinches. Time is injected as `now_ms` so the recognizer
//! can be driven deterministically in tests; the long-press timer is a
//! deadline the host polls through [`GestureRecognizer::tick`].

mod recognizer;
mod types;

pub use recognizer::GestureRecognizer;
pub use types::{Gesture, SwipeDirection, TouchPoint};

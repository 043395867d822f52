//! Gesture recognizer input and output types

use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::types::TouchId;

/// One active touch contact
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: TouchId,
    pub position: Vec2,
}

impl TouchPoint {
    pub fn new(id: TouchId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Vec2::new(x, y),
        }
    }
}

/// Dominant axis direction of a swipe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Classify a displacement by comparing `|dx|` with `|dy|`
    pub fn from_delta(delta: Vec2) -> Self {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if delta.y > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        }
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, SwipeDirection::Left | SwipeDirection::Right)
    }
}

/// A recognized gesture
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Gesture {
    Tap {
        position: Vec2,
    },
    DoubleTap {
        position: Vec2,
    },
    LongPress {
        position: Vec2,
    },
    Swipe {
        direction: SwipeDirection,
        /// End-to-end displacement length in pixels
        distance: f32,
        /// Average velocity in px/ms
        velocity: f32,
    },
    Pinch {
        /// Current inter-touch distance over the initial distance
        scale: f32,
        /// Midpoint of the two touches
        center: Vec2,
    },
}

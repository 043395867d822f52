//! Touch gesture state machine

use tracing::trace;

use super::{Gesture, SwipeDirection, TouchPoint};
use crate::config::GestureConfig;
use crate::math::Vec2;
use crate::types::TouchId;

/// A single finger being tracked
#[derive(Clone, Copy, Debug)]
struct SingleTouch {
    id: TouchId,
    start: Vec2,
    start_ms: f64,
    last: Vec2,
    /// Pending long-press deadline; `None` once cleared or fired
    long_press_at: Option<f64>,
    long_press_fired: bool,
}

/// Two fingers being tracked
#[derive(Clone, Copy, Debug)]
struct PinchTouch {
    initial_distance: f32,
    last_scale: f32,
}

#[derive(Clone, Copy, Debug, Default)]
enum Tracking {
    #[default]
    Idle,
    Single(SingleTouch),
    Pinch(PinchTouch),
}

/// Stateful touch classifier
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    tracking: Tracking,
    /// Position and time of the last tap, for double-tap matching
    last_tap: Option<(Vec2, f64)>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracking: Tracking::Idle,
            last_tap: None,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.tracking, Tracking::Idle)
    }

    #[inline]
    pub fn is_pinching(&self) -> bool {
        matches!(self.tracking, Tracking::Pinch(_))
    }

    /// When the host should next call [`Self::tick`], if a timer is armed
    pub fn next_deadline(&self) -> Option<f64> {
        match self.tracking {
            Tracking::Single(touch) => touch.long_press_at,
            _ => None,
        }
    }

    /// Drop all tracking and cancel every timer
    pub fn reset(&mut self) {
        self.tracking = Tracking::Idle;
        self.last_tap = None;
    }

    /// A finger went down; `touches` lists every active contact
    pub fn touch_start(&mut self, touches: &[TouchPoint], now_ms: f64) -> Option<Gesture> {
        match (touches, self.tracking) {
            ([touch], Tracking::Idle) => {
                self.tracking = Tracking::Single(SingleTouch {
                    id: touch.id,
                    start: touch.position,
                    start_ms: now_ms,
                    last: touch.position,
                    long_press_at: Some(now_ms + self.config.long_press_ms),
                    long_press_fired: false,
                });
            }
            ([a, b, ..], _) => {
                // Replacing single tracking also drops its long-press timer
                let initial_distance = a.position.distance(b.position).max(1.0);
                self.tracking = Tracking::Pinch(PinchTouch {
                    initial_distance,
                    last_scale: 1.0,
                });
                trace!(initial_distance, "pinch tracking");
            }
            _ => {}
        }
        None
    }

    /// Fingers moved; `touches` lists every active contact
    pub fn touch_move(&mut self, touches: &[TouchPoint], _now_ms: f64) -> Option<Gesture> {
        match &mut self.tracking {
            Tracking::Idle => None,
            Tracking::Single(single) => {
                let touch = touches.iter().find(|t| t.id == single.id)?;
                single.last = touch.position;
                if single.long_press_at.is_some()
                    && single.start.distance(touch.position) > self.config.long_press_jitter
                {
                    single.long_press_at = None;
                }
                None
            }
            Tracking::Pinch(pinch) => {
                let [a, b, ..] = touches else {
                    return None;
                };
                let scale = a.position.distance(b.position) / pinch.initial_distance;
                if (scale - pinch.last_scale).abs() < self.config.pinch_min_scale_delta {
                    return None;
                }
                pinch.last_scale = scale;
                Some(Gesture::Pinch {
                    scale,
                    center: a.position.midpoint(b.position),
                })
            }
        }
    }

    /// Fingers lifted; `remaining` lists contacts still down and `ended`
    /// the ones that just lifted
    ///
    /// Only the last finger up classifies, and only a single-finger
    /// gesture yields a tap, double-tap or swipe.
    pub fn touch_end(
        &mut self,
        remaining: &[TouchPoint],
        ended: &[TouchPoint],
        now_ms: f64,
    ) -> Option<Gesture> {
        if !remaining.is_empty() {
            if let Tracking::Single(single) = &mut self.tracking {
                single.long_press_at = None;
            }
            return None;
        }

        match std::mem::take(&mut self.tracking) {
            Tracking::Single(single) => {
                let end = ended
                    .iter()
                    .find(|t| t.id == single.id)
                    .map(|t| t.position)
                    .unwrap_or(single.last);
                self.classify(single, end, now_ms)
            }
            Tracking::Pinch(_) | Tracking::Idle => None,
        }
    }

    /// The host cancelled the touch sequence
    pub fn touch_cancel(&mut self) {
        self.tracking = Tracking::Idle;
    }

    /// Fire the long-press timer if its deadline has passed
    pub fn tick(&mut self, now_ms: f64) -> Option<Gesture> {
        let Tracking::Single(single) = &mut self.tracking else {
            return None;
        };
        match single.long_press_at {
            Some(deadline) if now_ms >= deadline => {
                single.long_press_at = None;
                single.long_press_fired = true;
                trace!(x = single.last.x, y = single.last.y, "long press");
                Some(Gesture::LongPress {
                    position: single.last,
                })
            }
            _ => None,
        }
    }

    fn classify(&mut self, single: SingleTouch, end: Vec2, now_ms: f64) -> Option<Gesture> {
        if single.long_press_fired {
            return None;
        }

        let delta = end - single.start;
        let distance = single.start.distance(end);
        let duration = now_ms - single.start_ms;

        if distance < self.config.tap_max_distance && duration < self.config.tap_max_duration_ms {
            let is_double = self.last_tap.is_some_and(|(pos, at)| {
                now_ms - at <= self.config.double_tap_delay_ms
                    && pos.distance(end) <= self.config.double_tap_tolerance
            });
            return if is_double {
                self.last_tap = None;
                trace!(x = end.x, y = end.y, "double tap");
                Some(Gesture::DoubleTap { position: end })
            } else {
                self.last_tap = Some((end, now_ms));
                trace!(x = end.x, y = end.y, "tap");
                Some(Gesture::Tap { position: end })
            };
        }

        let velocity = distance / duration.max(1.0) as f32;
        if distance >= self.config.swipe_min_distance
            && velocity >= self.config.swipe_min_velocity
        {
            let direction = SwipeDirection::from_delta(delta);
            trace!(?direction, distance, velocity, "swipe");
            return Some(Gesture::Swipe {
                direction,
                distance,
                velocity,
            });
        }

        None
    }
}

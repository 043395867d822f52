//! Interaction sessions and the host pointer capture

use std::ops::{Deref, DerefMut};

use tracing::trace;

use super::{PointerId, PointerSample};
use crate::constraint::Constraints;
use crate::math::{Rect, Vec2};
use crate::viewport::Viewport;
use crate::window::{SnapState, Window, WindowId};

/// Host hook for routing global pointer and key events during a gesture
///
/// The browser adapter attaches move/up/cancel/keydown listeners to the
/// document in `acquire` and removes all of them in `release`. Every
/// `acquire` is paired with exactly one `release`.
pub trait PointerCapture {
    /// Start routing global events for a gesture on `window_id`
    fn acquire(&mut self, window_id: WindowId);
    /// Stop routing global events
    fn release(&mut self);
}

/// Capture for hosts that already route every event to the engine
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&mut self, _window_id: WindowId) {}
    fn release(&mut self) {}
}

/// Snapshot taken when a gesture starts
#[derive(Clone, Debug)]
pub(crate) struct SessionData<K> {
    pub window_id: WindowId,
    pub pointer: PointerId,
    pub start_bounds: Rect,
    pub start_position: Vec2,
    pub start_snap: Option<SnapState>,
    pub constraints: Constraints,
    pub viewport: Viewport,
    /// Controller-specific state
    pub kind: K,
}

/// A live gesture holding the pointer capture
///
/// The only way to end a session is [`InteractionSession::dispose`], which
/// consumes it, so the capture is released exactly once.
#[derive(Debug)]
pub(crate) struct InteractionSession<K> {
    data: SessionData<K>,
}

impl<K> InteractionSession<K> {
    /// Acquire the capture and snapshot `window`
    pub fn begin(
        capture: &mut dyn PointerCapture,
        window: &Window,
        sample: &PointerSample,
        constraints: Constraints,
        viewport: Viewport,
        kind: K,
    ) -> Self {
        capture.acquire(window.id);
        trace!(window_id = window.id, pointer = ?sample.pointer_id(), "capture acquired");
        Self {
            data: SessionData {
                window_id: window.id,
                pointer: sample.pointer_id(),
                start_bounds: window.bounds,
                start_position: sample.position,
                start_snap: window.snap_state(),
                constraints,
                viewport,
                kind,
            },
        }
    }

    /// Whether `sample` comes from the pointer that started the gesture
    pub fn accepts(&self, sample: &PointerSample) -> bool {
        sample.pointer_id() == self.data.pointer
    }

    /// Pointer displacement since the gesture started
    pub fn delta(&self, sample: &PointerSample) -> Vec2 {
        sample.position - self.data.start_position
    }

    /// Release the capture and hand back the snapshot
    pub fn dispose(self, capture: &mut dyn PointerCapture) -> SessionData<K> {
        capture.release();
        trace!(window_id = self.data.window_id, "capture released");
        self.data
    }
}

impl<K> Deref for InteractionSession<K> {
    type Target = SessionData<K>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<K> DerefMut for InteractionSession<K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

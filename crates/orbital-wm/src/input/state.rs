//! Transient interaction state published on the store

use crate::math::{Rect, Vec2};
use crate::window::{ResizeHandle, WindowId};

/// An in-progress window move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    /// Window being moved
    pub window_id: WindowId,
    /// Bounds when the gesture started
    pub start_bounds: Rect,
    /// Pointer position when the gesture started
    pub start_position: Vec2,
    /// Offset from window origin to pointer
    pub offset: Vec2,
}

/// An in-progress window resize
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeState {
    /// Window being resized
    pub window_id: WindowId,
    /// Bounds when the gesture started
    pub start_bounds: Rect,
    /// Pointer position when the gesture started
    pub start_position: Vec2,
    /// Edge or corner being dragged
    pub handle: ResizeHandle,
}

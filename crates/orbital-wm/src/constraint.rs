//! Geometry constraints for drag and resize
//!
//! Drag and resize differ at the edges: a dragged window may be parked
//! partially past the left and right edges, a resized window may never
//! grow past the usable viewport.

use crate::config::WmConfig;
use crate::math::{Rect, Size, Vec2};
use crate::viewport::Viewport;
use crate::window::ResizeHandle;

/// How a resize handle moves one axis of a window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeMotion {
    /// Axis untouched
    Fixed,
    /// Near edge follows the pointer; origin moves, size shrinks as it grows
    Leading,
    /// Far edge follows the pointer; size grows with the pointer
    Trailing,
}

/// Limits captured at the start of an interaction
///
/// The viewport is read once per gesture; host resizes mid-gesture are
/// not tracked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    /// Minimum window size
    pub min_size: Size,
    /// Title bar height kept on screen while dragging
    pub title_bar_height: f32,
    /// Right edge of the usable area
    pub usable_right: f32,
    /// Bottom edge of the usable area (above the taskbar on desktop layouts)
    pub usable_bottom: f32,
    /// Cap on the visible strip of a parked window
    pub drag_min_visible: f32,
    /// Fraction of the width that must stay visible when parked
    pub drag_min_visible_ratio: f32,
}

impl Constraints {
    /// Capture limits for `viewport` under `config`
    pub fn new(config: &WmConfig, viewport: &Viewport) -> Self {
        Self {
            min_size: config.min_size,
            title_bar_height: config.title_bar_height,
            usable_right: viewport.width,
            usable_bottom: viewport.usable_bottom(config.taskbar_height),
            drag_min_visible: config.drag_min_visible,
            drag_min_visible_ratio: config.drag_min_visible_ratio,
        }
    }

    /// Clamp a dragged window's origin
    ///
    /// Horizontally at least `min(drag_min_visible, width * ratio)` pixels
    /// stay visible. Vertically the title bar stays fully on screen and
    /// above the taskbar.
    pub fn clamp_drag_origin(&self, candidate: Vec2, size: Size) -> Vec2 {
        let min_visible = self
            .drag_min_visible
            .min(size.width * self.drag_min_visible_ratio);
        let min_x = -(size.width - min_visible);
        let max_x = self.usable_right - min_visible;
        let max_y = (self.usable_bottom - self.title_bar_height).max(0.0);

        Vec2::new(
            candidate.x.min(max_x).max(min_x),
            candidate.y.min(max_y).max(0.0),
        )
    }

    /// Bounds produced by dragging `handle` by `delta` from `start`
    pub fn resize(&self, handle: ResizeHandle, start: Rect, delta: Vec2) -> Rect {
        let (x, width) = resize_axis(
            handle.horizontal(),
            start.x,
            start.width,
            delta.x,
            self.min_size.width,
            self.usable_right,
        );
        let (y, height) = resize_axis(
            handle.vertical(),
            start.y,
            start.height,
            delta.y,
            self.min_size.height,
            self.usable_bottom,
        );
        Rect::new(x, y, width, height)
    }
}

/// Resize one axis, returning the new `(origin, length)`
///
/// The minimum length always wins. A leading edge is held so the far edge
/// never moves, and never pulled past the viewport origin (unless it
/// already started beyond it). An axis that starts below the minimum grows
/// its far edge instead. A trailing edge never grows past `usable_end`
/// (unless it already started beyond it).
fn resize_axis(
    motion: EdgeMotion,
    start_pos: f32,
    start_len: f32,
    delta: f32,
    min_len: f32,
    usable_end: f32,
) -> (f32, f32) {
    match motion {
        EdgeMotion::Fixed => (start_pos, start_len),
        EdgeMotion::Leading => {
            let far = start_pos + start_len;
            let lowest = start_pos.min(0.0);
            let pos = (start_pos + delta).min(far - min_len).max(lowest);
            (pos, (far - pos).max(min_len))
        }
        EdgeMotion::Trailing => {
            let cap = (usable_end - start_pos).max(start_len);
            let len = (start_len + delta).min(cap).max(min_len);
            (start_pos, len)
        }
    }
}

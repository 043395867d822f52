//! Device-independent pointer samples

use crate::math::Vec2;
use crate::types::TouchId;

/// Identity of the pointer driving a gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(TouchId),
}

/// Source of a pointer sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse event with the DOM button index (0 = primary)
    Mouse { button: u8 },
    /// Touch event for contact `id` while `active_touches` contacts are down
    Touch { id: TouchId, active_touches: usize },
}

/// One pointer position report
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Viewport coordinates
    pub position: Vec2,
    pub kind: PointerKind,
}

impl PointerSample {
    /// Mouse sample
    pub fn mouse(x: f32, y: f32, button: u8) -> Self {
        Self {
            position: Vec2::new(x, y),
            kind: PointerKind::Mouse { button },
        }
    }

    /// Touch sample for contact `id`
    pub fn touch(id: TouchId, x: f32, y: f32, active_touches: usize) -> Self {
        Self {
            position: Vec2::new(x, y),
            kind: PointerKind::Touch { id, active_touches },
        }
    }

    pub fn pointer_id(&self) -> PointerId {
        match self.kind {
            PointerKind::Mouse { .. } => PointerId::Mouse,
            PointerKind::Touch { id, .. } => PointerId::Touch(id),
        }
    }

    /// Whether this sample may start a drag or resize
    ///
    /// Mouse: primary button only. Touch: exactly one contact down;
    /// multi-touch belongs to the pinch recognizer.
    pub fn can_start(&self) -> bool {
        match self.kind {
            PointerKind::Mouse { button } => button == 0,
            PointerKind::Touch { active_touches, .. } => active_touches == 1,
        }
    }
}

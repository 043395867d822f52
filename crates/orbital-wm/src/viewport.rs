//! Viewport environment read at the start of every interaction

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size};

/// Host surface dimensions and layout mode
///
/// Touch-primary (mobile) layouts have no taskbar reservation, so their
/// usable area is the whole surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Whether the host reports a touch-primary layout
    #[serde(default)]
    pub touch_primary: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl Viewport {
    /// Desktop-layout viewport
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            touch_primary: false,
        }
    }

    /// Touch-primary viewport (no taskbar reservation)
    pub const fn touch(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            touch_primary: true,
        }
    }

    /// Surface size
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Height reserved at the bottom for the taskbar
    pub fn taskbar_reservation(&self, taskbar_height: f32) -> f32 {
        if self.touch_primary {
            0.0
        } else {
            taskbar_height
        }
    }

    /// Lowest y coordinate a window may reach
    pub fn usable_bottom(&self, taskbar_height: f32) -> f32 {
        (self.height - self.taskbar_reservation(taskbar_height)).max(0.0)
    }

    /// Area available to windows: the surface minus the taskbar
    pub fn usable_rect(&self, taskbar_height: f32) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.usable_bottom(taskbar_height))
    }
}

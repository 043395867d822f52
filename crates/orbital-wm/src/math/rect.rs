//! Axis-aligned rectangle used for window bounds

use serde::{Deserialize, Serialize};

use super::{Size, Vec2};

/// Axis-aligned rectangle `{x, y, w, h}` in viewport pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "w")]
    pub width: f32,
    #[serde(rename = "h")]
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from position and size
    pub fn from_pos_size(pos: Vec2, size: Size) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Get position (top-left)
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Get size
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Get the right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Copy of this rectangle with a new origin
    pub fn with_position(&self, pos: Vec2) -> Rect {
        Rect::new(pos.x, pos.y, self.width, self.height)
    }

    /// Shallow-merge a partial update into this rectangle
    pub fn apply(&mut self, patch: BoundsPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
    }
}

/// Partial bounds update; `None` fields are left untouched
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsPatch {
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default, rename = "w")]
    pub width: Option<f32>,
    #[serde(default, rename = "h")]
    pub height: Option<f32>,
}

impl BoundsPatch {
    /// Patch that moves the origin only
    pub fn position(pos: Vec2) -> Self {
        Self {
            x: Some(pos.x),
            y: Some(pos.y),
            ..Default::default()
        }
    }

    /// Patch that overwrites every field
    pub fn full(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }
}

impl From<Rect> for BoundsPatch {
    fn from(rect: Rect) -> Self {
        Self::full(rect)
    }
}

//! Core geometry types for the window manager
//!
//! All coordinates are viewport pixels with the origin at the top-left
//! corner of the host surface.

mod rect;
mod size;
mod vec2;

pub use rect::{BoundsPatch, Rect};
pub use size::Size;
pub use vec2::Vec2;

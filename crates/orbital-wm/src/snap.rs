//! Snap zone detection
//!
//! Maps a pointer position to a screen-edge hot-strip and a zone to the
//! bounds a window takes when released there.

use serde::{Deserialize, Serialize};

use crate::error::{WmError, WmResult};
use crate::math::{Rect, Size, Vec2};
use crate::viewport::Viewport;
use crate::window::{SnapSide, SnapState};

/// A screen-edge snap target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapZone {
    /// Left half of the usable viewport
    Left,
    /// Right half of the usable viewport
    Right,
    /// The whole usable viewport
    Maximize,
}

impl SnapZone {
    /// Parse from string ID ("left", "right", "maximize")
    pub fn from_id(id: &str) -> WmResult<Self> {
        match id.to_ascii_lowercase().as_str() {
            "left" => Ok(SnapZone::Left),
            "right" => Ok(SnapZone::Right),
            "maximize" | "top" => Ok(SnapZone::Maximize),
            _ => Err(WmError::UnknownSnapZone(id.to_string())),
        }
    }

    /// The snap state a window has after landing in this zone
    pub fn state(&self) -> SnapState {
        match self {
            SnapZone::Left => SnapState::Left,
            SnapZone::Right => SnapState::Right,
            SnapZone::Maximize => SnapState::Maximized,
        }
    }
}

impl From<SnapSide> for SnapZone {
    fn from(side: SnapSide) -> Self {
        match side {
            SnapSide::Left => SnapZone::Left,
            SnapSide::Right => SnapZone::Right,
        }
    }
}

/// Edge hot-strip detector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapDetector {
    /// Width of each hot-strip in pixels
    pub threshold: f32,
    /// Disabled detectors never report a zone
    pub enabled: bool,
}

impl Default for SnapDetector {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            enabled: true,
        }
    }
}

impl SnapDetector {
    pub fn new(threshold: f32, enabled: bool) -> Self {
        Self { threshold, enabled }
    }

    /// Zone under `pointer`, if any
    ///
    /// Side strips take precedence over the top strip, so the top corners
    /// snap to a half rather than maximizing.
    pub fn detect(&self, pointer: Vec2, viewport: &Viewport) -> Option<SnapZone> {
        if !self.enabled {
            return None;
        }
        if pointer.x <= self.threshold {
            Some(SnapZone::Left)
        } else if pointer.x >= viewport.width - self.threshold {
            Some(SnapZone::Right)
        } else if pointer.y <= self.threshold {
            Some(SnapZone::Maximize)
        } else {
            None
        }
    }
}

/// Bounds a window takes when committed to `zone`
///
/// Never smaller than `min_size`. On a viewport narrower than two minimum
/// widths the halves overlap, and the right half stays flush with the
/// right edge.
pub fn target_bounds(
    zone: SnapZone,
    viewport: &Viewport,
    taskbar_height: f32,
    min_size: Size,
) -> Rect {
    let usable = viewport.usable_rect(taskbar_height);
    let half = usable.width / 2.0;
    let target = match zone {
        SnapZone::Left => Rect::new(usable.x, usable.y, half, usable.height),
        SnapZone::Right => Rect::new(usable.x + half, usable.y, usable.width - half, usable.height),
        SnapZone::Maximize => usable,
    };
    let size = target.size().max(min_size);
    let x = match zone {
        SnapZone::Right => (usable.right() - size.width).max(usable.x),
        SnapZone::Left | SnapZone::Maximize => target.x,
    };
    Rect::from_pos_size(Vec2::new(x, target.y), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(1920.0, 1080.0);

    #[test]
    fn test_detect_edges() {
        let d = SnapDetector::default();
        assert_eq!(d.detect(Vec2::new(5.0, 500.0), &VP), Some(SnapZone::Left));
        assert_eq!(d.detect(Vec2::new(1915.0, 500.0), &VP), Some(SnapZone::Right));
        assert_eq!(d.detect(Vec2::new(900.0, 3.0), &VP), Some(SnapZone::Maximize));
        assert_eq!(d.detect(Vec2::new(900.0, 500.0), &VP), None);
    }

    #[test]
    fn test_corner_prefers_side() {
        let d = SnapDetector::default();
        assert_eq!(d.detect(Vec2::new(0.0, 0.0), &VP), Some(SnapZone::Left));
        assert_eq!(d.detect(Vec2::new(1920.0, 0.0), &VP), Some(SnapZone::Right));
    }

    #[test]
    fn test_disabled_detector_reports_nothing() {
        let d = SnapDetector::new(20.0, false);
        assert_eq!(d.detect(Vec2::new(0.0, 500.0), &VP), None);
    }

    const MIN: Size = Size::new(320.0, 240.0);

    #[test]
    fn test_target_bounds() {
        assert_eq!(
            target_bounds(SnapZone::Left, &VP, 48.0, MIN),
            Rect::new(0.0, 0.0, 960.0, 1032.0)
        );
        assert_eq!(
            target_bounds(SnapZone::Right, &VP, 48.0, MIN),
            Rect::new(960.0, 0.0, 960.0, 1032.0)
        );
        assert_eq!(
            target_bounds(SnapZone::Maximize, &VP, 48.0, MIN),
            Rect::new(0.0, 0.0, 1920.0, 1032.0)
        );
    }

    #[test]
    fn test_half_zones_keep_min_width_on_narrow_viewport() {
        let phone = Viewport::touch(390.0, 844.0);
        assert_eq!(
            target_bounds(SnapZone::Left, &phone, 48.0, MIN),
            Rect::new(0.0, 0.0, 320.0, 844.0)
        );
        assert_eq!(
            target_bounds(SnapZone::Right, &phone, 48.0, MIN),
            Rect::new(70.0, 0.0, 320.0, 844.0)
        );
    }

    #[test]
    fn test_targets_keep_min_size_on_tiny_viewport() {
        let tiny = Viewport::new(200.0, 150.0);
        let left = target_bounds(SnapZone::Left, &tiny, 48.0, MIN);
        assert_eq!(left.size(), MIN);
        let right = target_bounds(SnapZone::Right, &tiny, 48.0, MIN);
        assert_eq!(right.x, 0.0);
        assert_eq!(target_bounds(SnapZone::Maximize, &tiny, 48.0, MIN).size(), MIN);
    }

    #[test]
    fn test_zone_from_side() {
        assert_eq!(SnapZone::from(SnapSide::Left), SnapZone::Left);
        assert_eq!(SnapZone::from(SnapSide::Right), SnapZone::Right);
    }

    #[test]
    fn test_zone_ids() {
        assert_eq!(SnapZone::from_id("LEFT").unwrap(), SnapZone::Left);
        assert_eq!(SnapZone::from_id("maximize").unwrap(), SnapZone::Maximize);
        assert!(SnapZone::from_id("bottom").is_err());
    }
}

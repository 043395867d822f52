//! Window manager configuration
//!
//! Every layout constant the controllers depend on lives here so hosts can
//! tune them without touching the interaction code. Defaults match the
//! desktop shell's stock chrome.

use serde::{Deserialize, Serialize};

use crate::error::{WmError, WmResult};
use crate::math::{Rect, Size};

/// Minimum window width in pixels
pub const MIN_WIDTH: f32 = 320.0;
/// Minimum window height in pixels
pub const MIN_HEIGHT: f32 = 240.0;
/// Height of the window title bar
pub const TITLE_BAR_HEIGHT: f32 = 32.0;
/// Height reserved for the taskbar on desktop layouts
pub const TASKBAR_HEIGHT: f32 = 48.0;

/// Layout and interaction settings for the window manager
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WmConfig {
    /// Smallest size any window may be resized to
    pub min_size: Size,
    /// Title bar height; drag clamping keeps this strip on screen
    pub title_bar_height: f32,
    /// Bottom reservation for the taskbar (desktop layouts only)
    pub taskbar_height: f32,
    /// Width of the edge hot-strips that trigger snapping
    pub snap_threshold: f32,
    /// Whether drag release commits snap zones
    pub enable_snapping: bool,
    /// Upper bound on the pixels that must stay visible when parking a
    /// window past the left or right edge
    pub drag_min_visible: f32,
    /// Fraction of the window width that must stay visible, capped by
    /// `drag_min_visible`
    pub drag_min_visible_ratio: f32,
    /// Bounds for windows created without explicit bounds
    pub default_bounds: Rect,
    /// Per-window offset applied when cascading default bounds
    pub cascade_offset: f32,
    /// Touch gesture thresholds
    pub gesture: GestureConfig,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            min_size: Size::new(MIN_WIDTH, MIN_HEIGHT),
            title_bar_height: TITLE_BAR_HEIGHT,
            taskbar_height: TASKBAR_HEIGHT,
            snap_threshold: 20.0,
            enable_snapping: true,
            drag_min_visible: 100.0,
            drag_min_visible_ratio: 0.2,
            default_bounds: Rect::new(100.0, 100.0, 800.0, 600.0),
            cascade_offset: 30.0,
            gesture: GestureConfig::default(),
        }
    }
}

impl WmConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> WmResult<Self> {
        let config: WmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controllers cannot work with
    pub fn validate(&self) -> WmResult<()> {
        if self.min_size.width <= 0.0 || self.min_size.height <= 0.0 {
            return Err(WmError::InvalidConfig {
                field: "min_size",
                reason: "must be positive",
            });
        }
        if self.title_bar_height < 0.0 || self.taskbar_height < 0.0 {
            return Err(WmError::InvalidConfig {
                field: "title_bar_height/taskbar_height",
                reason: "must not be negative",
            });
        }
        if self.snap_threshold < 0.0 {
            return Err(WmError::InvalidConfig {
                field: "snap_threshold",
                reason: "must not be negative",
            });
        }
        if !(0.0..=1.0).contains(&self.drag_min_visible_ratio) {
            return Err(WmError::InvalidConfig {
                field: "drag_min_visible_ratio",
                reason: "must be within 0..=1",
            });
        }
        if self.default_bounds.width < self.min_size.width
            || self.default_bounds.height < self.min_size.height
        {
            return Err(WmError::InvalidConfig {
                field: "default_bounds",
                reason: "smaller than min_size",
            });
        }
        self.gesture.validate()
    }
}

/// Thresholds for the touch gesture recognizer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum displacement for a touch to count as a tap
    pub tap_max_distance: f32,
    /// Maximum duration (ms) for a touch to count as a tap
    pub tap_max_duration_ms: f64,
    /// Window (ms) after a tap in which a second tap is a double-tap
    pub double_tap_delay_ms: f64,
    /// Maximum distance between the two taps of a double-tap
    pub double_tap_tolerance: f32,
    /// Hold time (ms) before a long-press fires
    pub long_press_ms: f64,
    /// Movement that cancels a pending long-press
    pub long_press_jitter: f32,
    /// Minimum end-to-end displacement for a swipe
    pub swipe_min_distance: f32,
    /// Minimum average velocity (px/ms) for a swipe
    pub swipe_min_velocity: f32,
    /// Minimum scale change before a pinch update is reported
    pub pinch_min_scale_delta: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_distance: 10.0,
            tap_max_duration_ms: 300.0,
            double_tap_delay_ms: 300.0,
            double_tap_tolerance: 50.0,
            long_press_ms: 500.0,
            long_press_jitter: 10.0,
            swipe_min_distance: 50.0,
            swipe_min_velocity: 0.3,
            pinch_min_scale_delta: 0.01,
        }
    }
}

impl GestureConfig {
    fn validate(&self) -> WmResult<()> {
        let durations = [
            self.tap_max_duration_ms,
            self.double_tap_delay_ms,
            self.long_press_ms,
        ];
        if durations.iter().any(|d| *d <= 0.0) {
            return Err(WmError::InvalidConfig {
                field: "gesture",
                reason: "durations must be positive",
            });
        }
        if self.swipe_min_distance <= self.tap_max_distance {
            return Err(WmError::InvalidConfig {
                field: "gesture.swipe_min_distance",
                reason: "must exceed tap_max_distance",
            });
        }
        Ok(())
    }
}

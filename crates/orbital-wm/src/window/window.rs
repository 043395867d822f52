//! Window record and placement mode

use serde::{Deserialize, Serialize};

use super::WindowId;
use crate::math::Rect;

/// Half of the viewport a window can be snapped to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapSide {
    Left,
    Right,
}

/// Snap zone a window currently occupies, as reported to the chrome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapState {
    Left,
    Right,
    Maximized,
}

impl From<SnapSide> for SnapState {
    fn from(side: SnapSide) -> Self {
        match side {
            SnapSide::Left => SnapState::Left,
            SnapSide::Right => SnapState::Right,
        }
    }
}

/// How a window is placed on the desktop
///
/// Maximize and snap are mutually exclusive, and only a maximized window
/// carries the bounds it returns to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Placement {
    /// Positioned freely by the user
    #[default]
    Free,
    /// Occupying one half of the usable viewport
    Snapped(SnapSide),
    /// Filling the usable viewport
    Maximized {
        /// Bounds held immediately before maximizing
        restore: Rect,
    },
}

/// A window instance
#[derive(Clone, Debug)]
pub struct Window {
    /// Unique identifier
    pub id: WindowId,
    /// Application identifier (bookkeeping only)
    pub app_id: String,
    /// Window title, set by the hosted application
    pub title: String,
    /// Current bounds in viewport pixels
    pub bounds: Rect,
    /// Stacking order (higher = on top), unique across windows
    pub z_index: u32,
    /// Hidden from the visible set, bounds and z-index retained
    pub minimized: bool,
    /// Placement mode
    pub placement: Placement,
    /// Hosted application reports unsaved work
    pub has_unsaved_state: bool,
}

impl Window {
    #[inline]
    pub fn is_maximized(&self) -> bool {
        matches!(self.placement, Placement::Maximized { .. })
    }

    /// Bounds to return to on un-maximize
    pub fn previous_bounds(&self) -> Option<Rect> {
        match self.placement {
            Placement::Maximized { restore } => Some(restore),
            _ => None,
        }
    }

    /// Snap zone the window occupies, if any
    pub fn snap_state(&self) -> Option<SnapState> {
        match self.placement {
            Placement::Free => None,
            Placement::Snapped(side) => Some(side.into()),
            Placement::Maximized { .. } => Some(SnapState::Maximized),
        }
    }
}

/// Flattened window record handed to the rendering layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowView {
    pub id: WindowId,
    pub app_id: String,
    pub title: String,
    pub bounds: Rect,
    pub previous_bounds: Option<Rect>,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub focused: bool,
    pub snap_state: Option<SnapState>,
    pub has_unsaved_state: bool,
}

impl WindowView {
    pub(crate) fn of(window: &Window, focused: bool) -> Self {
        Self {
            id: window.id,
            app_id: window.app_id.clone(),
            title: window.title.clone(),
            bounds: window.bounds,
            previous_bounds: window.previous_bounds(),
            z_index: window.z_index,
            minimized: window.minimized,
            maximized: window.is_maximized(),
            focused,
            snap_state: window.snap_state(),
            has_unsaved_state: window.has_unsaved_state,
        }
    }
}

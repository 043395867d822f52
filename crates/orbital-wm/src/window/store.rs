//! Window store: lifecycle, focus, z-order, and transient interaction state
//!
//! New windows are raised to the minimum size. After that the store never
//! clamps bounds: the drag and resize controllers enforce size and viewport
//! constraints before they write.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};

use super::{Placement, SnapSide, SnapState, Window, WindowConfig, WindowId, WindowView};
use crate::config::WmConfig;
use crate::error::{WmError, WmResult};
use crate::input::{DragState, ResizeState};
use crate::math::{BoundsPatch, Rect, Size, Vec2};

/// Single source of truth for every open window
pub struct WindowStore {
    /// All windows by ID
    windows: HashMap<WindowId, Window>,
    /// Stacking order, back to front
    z_order: Vec<WindowId>,
    /// The one focused window
    focused: Option<WindowId>,
    /// Next window ID
    next_id: u64,
    /// Next z-index; never reset
    next_z_index: u32,
    /// Active move, if any
    drag_state: Option<DragState>,
    /// Active resize, if any
    resize_state: Option<ResizeState>,
    /// Bounds for windows created without explicit bounds
    default_bounds: Rect,
    /// Cascade step for default bounds
    cascade_offset: f32,
    /// Floor applied to initial bounds
    min_size: Size,
}

impl Default for WindowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowStore {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(&WmConfig::default())
    }

    /// Create an empty store using `config` for default window bounds
    pub fn with_config(config: &WmConfig) -> Self {
        Self {
            windows: HashMap::new(),
            z_order: Vec::new(),
            focused: None,
            next_id: 1,
            next_z_index: 1,
            drag_state: None,
            resize_state: None,
            default_bounds: config.default_bounds,
            cascade_offset: config.cascade_offset,
            min_size: config.min_size,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open a window for `app_id`, focused and on top
    pub fn create_window(&mut self, app_id: &str, initial_bounds: Option<Rect>) -> WindowId {
        let config = WindowConfig::for_app(app_id);
        self.create(match initial_bounds {
            Some(bounds) => config.with_bounds(bounds),
            None => config,
        })
    }

    /// Open a window from a full config, focused and on top
    pub fn create(&mut self, config: WindowConfig) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;

        let z_index = self.take_z_index();

        let bounds = config.bounds.unwrap_or_else(|| {
            let offset = (self.windows.len() % 10) as f32 * self.cascade_offset;
            self.default_bounds
                .with_position(self.default_bounds.position() + Vec2::new(offset, offset))
        });
        let bounds = Rect::from_pos_size(bounds.position(), bounds.size().max(self.min_size));

        let title = if config.title.is_empty() {
            config.app_id.clone()
        } else {
            config.title
        };

        let window = Window {
            id,
            app_id: config.app_id,
            title,
            bounds,
            z_index,
            minimized: false,
            placement: Placement::Free,
            has_unsaved_state: false,
        };

        debug!(window_id = id, app_id = %window.app_id, z_index, "window created");

        self.windows.insert(id, window);
        self.z_order.push(id);
        self.focused = Some(id);

        self.debug_check();
        id
    }

    /// Close a window; focus passes to the top-most visible window
    pub fn close_window(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_none() {
            return;
        }
        self.z_order.retain(|&wid| wid != id);

        if self.drag_state.is_some_and(|s| s.window_id == id) {
            self.drag_state = None;
        }
        if self.resize_state.is_some_and(|s| s.window_id == id) {
            self.resize_state = None;
        }

        if self.focused == Some(id) {
            self.focused = self.top_visible();
        }

        debug!(window_id = id, focused = ?self.focused, "window closed");
        self.debug_check();
    }

    // =========================================================================
    // Focus and z-order
    // =========================================================================

    /// Focus a window and bring it to the top of the z-order
    ///
    /// A minimized window is restored first, since a minimized window can
    /// never hold focus.
    pub fn focus_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if self.focused == Some(id) && !window.minimized {
            return;
        }

        window.minimized = false;
        window.z_index = self.next_z_index;
        self.next_z_index += 1;

        self.z_order.retain(|&wid| wid != id);
        self.z_order.push(id);
        self.focused = Some(id);

        trace!(window_id = id, "window focused");
        self.debug_check();
    }

    /// Allocate the next z-index
    fn take_z_index(&mut self) -> u32 {
        let z = self.next_z_index;
        self.next_z_index += 1;
        z
    }

    /// Top-most window that is not minimized
    fn top_visible(&self) -> Option<WindowId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.windows.get(id).is_some_and(|w| !w.minimized))
    }

    // =========================================================================
    // Minimize / maximize
    // =========================================================================

    /// Hide a window; if it held focus, focus passes to the top-most visible window
    pub fn minimize_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if window.minimized {
            return;
        }
        window.minimized = true;

        if self.focused == Some(id) {
            self.focused = self.top_visible();
        }

        debug!(window_id = id, focused = ?self.focused, "window minimized");
        self.debug_check();
    }

    /// Un-hide a minimized window without changing focus
    pub fn restore_window(&mut self, id: WindowId) {
        if let Some(window) = self.windows.get_mut(&id) {
            if window.minimized {
                window.minimized = false;
                debug!(window_id = id, "window restored");
            }
        }
    }

    /// Fill `usable`, remembering the current bounds for un-maximize
    pub fn maximize_window(&mut self, id: WindowId, usable: Rect) {
        if let Some(window) = self.windows.get_mut(&id) {
            if window.is_maximized() {
                return;
            }
            window.placement = Placement::Maximized {
                restore: window.bounds,
            };
            window.bounds = usable;
            debug!(window_id = id, "window maximized");
        }
    }

    /// Return a maximized window to the bounds it had before maximizing
    pub fn unmaximize_window(&mut self, id: WindowId) {
        if let Some(window) = self.windows.get_mut(&id) {
            if let Placement::Maximized { restore } = window.placement {
                window.bounds = restore;
                window.placement = Placement::Free;
                debug!(window_id = id, "window unmaximized");
            }
        }
    }

    /// Maximize, or un-maximize if already maximized
    pub fn toggle_maximize(&mut self, id: WindowId, usable: Rect) {
        match self.windows.get(&id) {
            Some(window) if window.is_maximized() => self.unmaximize_window(id),
            Some(_) => self.maximize_window(id, usable),
            None => {}
        }
    }

    // =========================================================================
    // Bounds, snap, metadata
    // =========================================================================

    /// Shallow-merge `patch` into the window's bounds (no clamping)
    pub fn update_window_bounds(&mut self, id: WindowId, patch: impl Into<BoundsPatch>) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.bounds.apply(patch.into());
            trace!(window_id = id, bounds = ?window.bounds, "bounds updated");
        }
    }

    /// Record the snap zone a window occupies
    ///
    /// `Maximized` keeps the current bounds as the restore rect; callers
    /// that also want the bounds changed should use [`Self::maximize_window`].
    pub fn update_window_snap_state(&mut self, id: WindowId, state: Option<SnapState>) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.placement = match state {
                None => Placement::Free,
                Some(SnapState::Left) => Placement::Snapped(SnapSide::Left),
                Some(SnapState::Right) => Placement::Snapped(SnapSide::Right),
                Some(SnapState::Maximized) => match window.placement {
                    already @ Placement::Maximized { .. } => already,
                    _ => Placement::Maximized {
                        restore: window.bounds,
                    },
                },
            };
        }
    }

    /// Set the title shown in the chrome
    pub fn set_title(&mut self, id: WindowId, title: &str) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.title = title.to_string();
        }
    }

    /// Record whether the hosted application has unsaved work
    pub fn set_unsaved_state(&mut self, id: WindowId, unsaved: bool) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.has_unsaved_state = unsaved;
        }
    }

    // =========================================================================
    // Transient interaction state
    // =========================================================================

    /// Publish or clear the active move
    pub fn set_drag_state(&mut self, state: Option<DragState>) {
        if state.is_some() && self.resize_state.is_some() {
            warn!("drag state set while a resize is active");
        }
        self.drag_state = state;
        debug_assert!(self.drag_state.is_none() || self.resize_state.is_none());
    }

    /// Publish or clear the active resize
    pub fn set_resize_state(&mut self, state: Option<ResizeState>) {
        if state.is_some() && self.drag_state.is_some() {
            warn!("resize state set while a drag is active");
        }
        self.resize_state = state;
        debug_assert!(self.drag_state.is_none() || self.resize_state.is_none());
    }

    /// Active move, if any
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag_state.as_ref()
    }

    /// Active resize, if any
    pub fn resize_state(&self) -> Option<&ResizeState> {
        self.resize_state.as_ref()
    }

    /// Whether a move or resize is in progress
    pub fn is_interacting(&self) -> bool {
        self.drag_state.is_some() || self.resize_state.is_some()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    /// Get the number of windows
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    /// Window ids back to front
    pub fn z_order(&self) -> &[WindowId] {
        &self.z_order
    }

    /// Get windows sorted by z-order (back to front)
    pub fn windows_by_z(&self) -> Vec<&Window> {
        self.z_order
            .iter()
            .filter_map(|id| self.windows.get(id))
            .collect()
    }

    /// Currently focused window ID
    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Currently focused window
    pub fn focused_window(&self) -> Option<&Window> {
        self.focused.and_then(|id| self.windows.get(&id))
    }

    pub fn is_window_focused(&self, id: WindowId) -> bool {
        self.focused == Some(id)
    }

    /// Windows that are not minimized, back to front
    pub fn visible_windows(&self) -> Vec<&Window> {
        self.windows_by_z()
            .into_iter()
            .filter(|w| !w.minimized)
            .collect()
    }

    /// Minimized windows, back to front
    pub fn minimized_windows(&self) -> Vec<&Window> {
        self.windows_by_z()
            .into_iter()
            .filter(|w| w.minimized)
            .collect()
    }

    /// Top-most visible window under `point`
    pub fn window_at(&self, point: Vec2) -> Option<WindowId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.windows
                    .get(id)
                    .is_some_and(|w| !w.minimized && w.bounds.contains(point))
            })
    }

    /// Windows hosting `app_id`, back to front
    pub fn windows_by_app(&self, app_id: &str) -> Vec<&Window> {
        self.windows_by_z()
            .into_iter()
            .filter(|w| w.app_id == app_id)
            .collect()
    }

    /// Whether any window reports unsaved work
    pub fn has_unsaved_windows(&self) -> bool {
        self.windows.values().any(|w| w.has_unsaved_state)
    }

    /// Render-ready records, back to front
    pub fn views(&self) -> Vec<WindowView> {
        self.windows_by_z()
            .into_iter()
            .map(|w| WindowView::of(w, self.focused == Some(w.id)))
            .collect()
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Verify focus, z-order, and transient-state invariants
    pub fn check_invariants(&self) -> WmResult<()> {
        if let Some(id) = self.focused {
            match self.windows.get(&id) {
                None => {
                    return Err(WmError::InvariantViolated(format!(
                        "focused window {} does not exist",
                        id
                    )))
                }
                Some(w) if w.minimized => {
                    return Err(WmError::InvariantViolated(format!(
                        "focused window {} is minimized",
                        id
                    )))
                }
                Some(_) => {}
            }
        }

        if self.z_order.len() != self.windows.len() {
            return Err(WmError::InvariantViolated(format!(
                "z-order has {} entries for {} windows",
                self.z_order.len(),
                self.windows.len()
            )));
        }

        let mut seen_z = HashSet::new();
        let mut last_z = None;
        for id in &self.z_order {
            let window = self.windows.get(id).ok_or_else(|| {
                WmError::InvariantViolated(format!("z-order entry {} has no window", id))
            })?;
            if !seen_z.insert(window.z_index) {
                return Err(WmError::InvariantViolated(format!(
                    "duplicate z-index {}",
                    window.z_index
                )));
            }
            if last_z.is_some_and(|z| z >= window.z_index) {
                return Err(WmError::InvariantViolated(format!(
                    "z-order out of step at window {}",
                    id
                )));
            }
            if window.z_index >= self.next_z_index {
                return Err(WmError::InvariantViolated(format!(
                    "z-index {} not below counter {}",
                    window.z_index, self.next_z_index
                )));
            }
            last_z = Some(window.z_index);
        }

        if self.drag_state.is_some() && self.resize_state.is_some() {
            return Err(WmError::InvariantViolated(
                "drag and resize active at once".to_string(),
            ));
        }

        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.check_invariants().is_ok(),
            "{:?}",
            self.check_invariants()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USABLE: Rect = Rect::new(0.0, 0.0, 1920.0, 1032.0);

    fn store_with(n: usize) -> (WindowStore, Vec<WindowId>) {
        let mut store = WindowStore::new();
        let ids = (0..n)
            .map(|i| store.create_window(&format!("app{}", i), None))
            .collect();
        (store, ids)
    }

    #[test]
    fn test_window_creation() {
        let mut store = WindowStore::new();
        let id = store.create_window("notepad", Some(Rect::new(100.0, 100.0, 800.0, 600.0)));

        let window = store.get(id).unwrap();
        assert_eq!(window.title, "notepad");
        assert_eq!(window.bounds, Rect::new(100.0, 100.0, 800.0, 600.0));
        assert_eq!(store.count(), 1);
        assert!(store.is_window_focused(id));
        assert_eq!(store.z_order(), &[id]);
    }

    #[test]
    fn test_default_bounds_cascade() {
        let (store, ids) = store_with(2);
        let a = store.get(ids[0]).unwrap().bounds;
        let b = store.get(ids[1]).unwrap().bounds;
        assert!((b.x - a.x - 30.0).abs() < 0.001);
        assert!((b.y - a.y - 30.0).abs() < 0.001);
        assert_eq!(a.size(), Size::new(800.0, 600.0));
    }

    #[test]
    fn test_create_focuses_newest() {
        let (store, ids) = store_with(3);
        assert_eq!(store.focused(), Some(ids[2]));
        assert_eq!(store.z_order(), ids.as_slice());
    }

    #[test]
    fn test_window_focus_raises() {
        let (mut store, ids) = store_with(3);
        store.focus_window(ids[0]);

        assert_eq!(store.focused(), Some(ids[0]));
        assert_eq!(store.z_order().last(), Some(&ids[0]));
        let top = store.get(ids[0]).unwrap().z_index;
        assert!(store.windows_by_z().iter().all(|w| w.z_index <= top));
    }

    #[test]
    fn test_focus_already_focused_is_noop() {
        let (mut store, ids) = store_with(2);
        let z = store.get(ids[1]).unwrap().z_index;
        store.focus_window(ids[1]);
        assert_eq!(store.get(ids[1]).unwrap().z_index, z);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let (mut store, _) = store_with(1);
        store.focus_window(99);
        store.close_window(99);
        store.minimize_window(99);
        store.maximize_window(99, USABLE);
        store.update_window_bounds(99, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(store.count(), 1);
        assert!(store.check_invariants().is_ok());
    }

    #[test]
    fn test_close_reassigns_focus_to_next_highest() {
        let (mut store, ids) = store_with(3);
        store.focus_window(ids[0]);
        store.close_window(ids[0]);
        assert_eq!(store.focused(), Some(ids[2]));

        store.close_window(ids[2]);
        assert_eq!(store.focused(), Some(ids[1]));

        store.close_window(ids[1]);
        assert_eq!(store.focused(), None);
        assert!(store.z_order().is_empty());
    }

    #[test]
    fn test_close_unfocused_keeps_focus() {
        let (mut store, ids) = store_with(3);
        store.close_window(ids[0]);
        assert_eq!(store.focused(), Some(ids[2]));
    }

    #[test]
    fn test_window_minimize_restore() {
        let (mut store, ids) = store_with(2);
        store.minimize_window(ids[1]);

        assert!(store.get(ids[1]).unwrap().minimized);
        assert_eq!(store.focused(), Some(ids[0]));
        assert_eq!(store.visible_windows().len(), 1);
        assert_eq!(store.minimized_windows()[0].id, ids[1]);

        store.restore_window(ids[1]);
        assert!(!store.get(ids[1]).unwrap().minimized);
        assert_eq!(store.focused(), Some(ids[0]));
    }

    #[test]
    fn test_minimize_last_visible_clears_focus() {
        let (mut store, ids) = store_with(1);
        store.minimize_window(ids[0]);
        assert_eq!(store.focused(), None);

        store.focus_window(ids[0]);
        assert!(!store.get(ids[0]).unwrap().minimized);
        assert_eq!(store.focused(), Some(ids[0]));
    }

    #[test]
    fn test_window_maximize_restore() {
        let mut store = WindowStore::new();
        let start = Rect::new(100.0, 100.0, 800.0, 600.0);
        let id = store.create_window("test", Some(start));

        store.maximize_window(id, USABLE);
        let window = store.get(id).unwrap();
        assert!(window.is_maximized());
        assert_eq!(window.bounds, USABLE);
        assert_eq!(window.previous_bounds(), Some(start));
        assert_eq!(window.snap_state(), Some(SnapState::Maximized));

        // Second maximize must not overwrite the restore rect
        store.maximize_window(id, USABLE);
        assert_eq!(store.get(id).unwrap().previous_bounds(), Some(start));

        store.unmaximize_window(id);
        let window = store.get(id).unwrap();
        assert!(!window.is_maximized());
        assert_eq!(window.bounds, start);
        assert_eq!(window.previous_bounds(), None);
    }

    #[test]
    fn test_toggle_maximize() {
        let mut store = WindowStore::new();
        let start = Rect::new(10.0, 10.0, 400.0, 300.0);
        let id = store.create_window("test", Some(start));

        store.toggle_maximize(id, USABLE);
        assert!(store.get(id).unwrap().is_maximized());
        store.toggle_maximize(id, USABLE);
        assert_eq!(store.get(id).unwrap().bounds, start);
    }

    #[test]
    fn test_create_raises_small_bounds_to_min_size() {
        let mut store = WindowStore::new();
        let id = store.create_window("a", Some(Rect::new(100.0, 100.0, 100.0, 500.0)));
        assert_eq!(store.get(id).unwrap().bounds, Rect::new(100.0, 100.0, 320.0, 500.0));
    }

    #[test]
    fn test_update_bounds_is_shallow_merge() {
        let mut store = WindowStore::new();
        let id = store.create_window("test", Some(Rect::new(100.0, 100.0, 800.0, 600.0)));
        store.update_window_bounds(id, BoundsPatch::position(Vec2::new(5.0, 6.0)));
        assert_eq!(store.get(id).unwrap().bounds, Rect::new(5.0, 6.0, 800.0, 600.0));

        // No clamping in the store
        store.update_window_bounds(
            id,
            BoundsPatch {
                width: Some(10.0),
                ..Default::default()
            },
        );
        assert!((store.get(id).unwrap().bounds.width - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_snap_state_updates_placement() {
        let (mut store, ids) = store_with(1);
        store.update_window_snap_state(ids[0], Some(SnapState::Left));
        assert_eq!(
            store.get(ids[0]).unwrap().placement,
            Placement::Snapped(SnapSide::Left)
        );

        store.update_window_snap_state(ids[0], None);
        assert_eq!(store.get(ids[0]).unwrap().snap_state(), None);
    }

    #[test]
    fn test_queries() {
        let mut store = WindowStore::new();
        let a = store.create_window("notepad", None);
        let _b = store.create_window("calculator", None);
        let c = store.create_window("notepad", None);

        let notepads: Vec<WindowId> = store
            .windows_by_app("notepad")
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(notepads, vec![a, c]);

        assert!(!store.has_unsaved_windows());
        store.set_unsaved_state(a, true);
        assert!(store.has_unsaved_windows());

        store.set_title(c, "notes.txt");
        assert_eq!(store.focused_window().unwrap().title, "notes.txt");
    }

    #[test]
    fn test_window_at_picks_topmost_visible() {
        let mut store = WindowStore::new();
        let back = store.create_window("a", Some(Rect::new(0.0, 0.0, 400.0, 400.0)));
        let front = store.create_window("b", Some(Rect::new(200.0, 200.0, 400.0, 400.0)));

        assert_eq!(store.window_at(Vec2::new(300.0, 300.0)), Some(front));
        assert_eq!(store.window_at(Vec2::new(50.0, 50.0)), Some(back));
        assert_eq!(store.window_at(Vec2::new(1500.0, 900.0)), None);

        store.minimize_window(front);
        assert_eq!(store.window_at(Vec2::new(300.0, 300.0)), Some(back));
    }

    #[test]
    fn test_views_flag_single_focus() {
        let (store, ids) = store_with(3);
        let views = store.views();
        assert_eq!(views.len(), 3);
        assert_eq!(views.iter().filter(|v| v.focused).count(), 1);
        assert_eq!(views.last().unwrap().id, ids[2]);
    }

    #[test]
    fn test_close_clears_transient_state_for_window() {
        let (mut store, ids) = store_with(1);
        let bounds = store.get(ids[0]).unwrap().bounds;
        store.set_drag_state(Some(DragState {
            window_id: ids[0],
            start_bounds: bounds,
            start_position: Vec2::ZERO,
            offset: Vec2::ZERO,
        }));
        assert!(store.is_interacting());
        store.close_window(ids[0]);
        assert!(store.drag_state().is_none());
    }
}

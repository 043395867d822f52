//! Window manager engine coordinating all components

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::WmConfig;
use crate::error::WmResult;
use crate::gesture::{Gesture, GestureRecognizer, SwipeDirection, TouchPoint};
use crate::input::{
    DragController, DragEnd, NoCapture, PointerCapture, PointerSample, ResizeController,
    ResizeEnd,
};
use crate::math::{Rect, Vec2};
use crate::shortcuts::{KeyChord, ShortcutRegistry, WmCommand};
use crate::snap::{self, SnapZone};
use crate::viewport::Viewport;
use crate::window::{
    Placement, ResizeHandle, WindowConfig, WindowId, WindowStore, WindowView,
};

/// Whether the engine consumed an input event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// The event was consumed; the host should not process it further
    Handled,
    /// The event is not for the window manager
    Unhandled,
}

impl From<bool> for InputResult {
    fn from(handled: bool) -> Self {
        if handled {
            InputResult::Handled
        } else {
            InputResult::Unhandled
        }
    }
}

/// Notification for the chrome and rendering layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WmEvent {
    WindowCreated {
        id: WindowId,
    },
    WindowClosed {
        id: WindowId,
    },
    /// Focus moved; `None` when no window is focused
    FocusChanged {
        id: Option<WindowId>,
    },
    WindowMinimized {
        id: WindowId,
    },
    WindowRestored {
        id: WindowId,
    },
    WindowMaximized {
        id: WindowId,
    },
    WindowUnmaximized {
        id: WindowId,
    },
    WindowSnapped {
        id: WindowId,
        zone: SnapZone,
    },
    DragStarted {
        id: WindowId,
    },
    DragEnded {
        id: WindowId,
        snapped: Option<SnapZone>,
        cancelled: bool,
    },
    ResizeStarted {
        id: WindowId,
        handle: ResizeHandle,
    },
    ResizeEnded {
        id: WindowId,
        handle: ResizeHandle,
        cancelled: bool,
    },
    Gesture {
        gesture: Gesture,
    },
    /// Long-press outside any interaction; `id` is the window under the finger
    ContextMenuRequested {
        position: Vec2,
        id: Option<WindowId>,
    },
}

/// Window manager engine
///
/// This is the main entry point for window operations, managing:
/// - The window store (records, focus, z-order)
/// - Drag and resize controllers and the host pointer capture
/// - Touch gesture recognition
/// - Keyboard shortcuts
///
/// Every operation is synchronous. Notifications are queued and drained
/// with [`WindowManagerEngine::take_events`].
pub struct WindowManagerEngine {
    store: WindowStore,
    viewport: Viewport,
    config: WmConfig,
    drag: DragController,
    resize: ResizeController,
    gestures: GestureRecognizer,
    shortcuts: ShortcutRegistry,
    capture: Box<dyn PointerCapture>,
    events: Vec<WmEvent>,
}

impl Default for WindowManagerEngine {
    fn default() -> Self {
        Self::new(WmConfig::default(), Viewport::default())
    }
}

impl Drop for WindowManagerEngine {
    fn drop(&mut self) {
        // Any live session still holds the host capture
        self.reset_input();
    }
}

impl WindowManagerEngine {
    /// Create an engine that routes no global events (see [`NoCapture`])
    pub fn new(config: WmConfig, viewport: Viewport) -> Self {
        Self {
            store: WindowStore::with_config(&config),
            viewport,
            drag: DragController::from_config(&config),
            resize: ResizeController::new(),
            gestures: GestureRecognizer::new(config.gesture),
            shortcuts: ShortcutRegistry::with_defaults(),
            capture: Box::new(NoCapture),
            events: Vec::new(),
            config,
        }
    }

    /// Create an engine from a JSON configuration
    pub fn from_json(config_json: &str, viewport: Viewport) -> WmResult<Self> {
        Ok(Self::new(WmConfig::from_json(config_json)?, viewport))
    }

    /// Use `capture` for global pointer routing during gestures
    pub fn with_capture(mut self, capture: Box<dyn PointerCapture>) -> Self {
        self.set_capture(capture);
        self
    }

    /// Replace the pointer capture, cancelling any gesture held by the old one
    pub fn set_capture(&mut self, capture: Box<dyn PointerCapture>) {
        self.reset_input();
        self.capture = capture;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn shortcuts(&self) -> &ShortcutRegistry {
        &self.shortcuts
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutRegistry {
        &mut self.shortcuts
    }

    /// Render-ready window records, back to front
    pub fn windows(&self) -> Vec<WindowView> {
        self.store.views()
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<WmEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a drag or resize is in progress
    pub fn is_interacting(&self) -> bool {
        self.drag.is_active() || self.resize.is_active()
    }

    /// Zone a release would commit for the active drag
    pub fn pending_snap_zone(&self) -> Option<SnapZone> {
        self.drag.pending_zone()
    }

    /// When the host should next call [`Self::tick`], if a timer is armed
    pub fn next_deadline(&self) -> Option<f64> {
        self.gestures.next_deadline()
    }

    fn snap_target(&self, zone: SnapZone) -> Rect {
        snap::target_bounds(
            zone,
            &self.viewport,
            self.config.taskbar_height,
            self.config.min_size,
        )
    }

    // =========================================================================
    // Environment
    // =========================================================================

    /// Update the host surface
    ///
    /// Maximized and snapped windows are refitted to the new usable area.
    /// A gesture in progress keeps the viewport it started with.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let refit: Vec<(WindowId, Placement)> = self
            .store
            .windows_by_z()
            .iter()
            .filter(|w| w.placement != Placement::Free)
            .map(|w| (w.id, w.placement))
            .collect();

        for (id, placement) in refit {
            let target = match placement {
                Placement::Maximized { .. } => self.snap_target(SnapZone::Maximize),
                Placement::Snapped(side) => self.snap_target(side.into()),
                Placement::Free => continue,
            };
            self.store.update_window_bounds(id, target);
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            touch = viewport.touch_primary,
            "viewport changed"
        );
    }

    /// Enable or disable edge snapping for future drags
    pub fn set_snapping(&mut self, enabled: bool) {
        self.config.enable_snapping = enabled;
        self.drag.set_snapping(enabled);
    }

    // =========================================================================
    // Window operations
    // =========================================================================

    /// Open a window for `app_id`, focused and on top
    pub fn create_window(&mut self, app_id: &str, bounds: Option<Rect>) -> WindowId {
        let config = WindowConfig::for_app(app_id);
        self.open(match bounds {
            Some(bounds) => config.with_bounds(bounds),
            None => config,
        })
    }

    /// Open a window from a full config, focused and on top
    pub fn open(&mut self, config: WindowConfig) -> WindowId {
        let id = self.store.create(config);
        self.events.push(WmEvent::WindowCreated { id });
        self.events.push(WmEvent::FocusChanged { id: Some(id) });
        id
    }

    /// Close a window, cancelling any gesture on it first
    pub fn close_window(&mut self, id: WindowId) {
        if self.store.get(id).is_none() {
            return;
        }
        self.cancel_interaction_on(id);
        self.tracking_focus(|engine| engine.store.close_window(id));
        self.events.push(WmEvent::WindowClosed { id });
    }

    /// Focus a window, restoring it if minimized
    pub fn focus_window(&mut self, id: WindowId) {
        let was_minimized = self.store.get(id).is_some_and(|w| w.minimized);
        self.tracking_focus(|engine| engine.store.focus_window(id));
        if was_minimized {
            self.events.push(WmEvent::WindowRestored { id });
        }
    }

    pub fn minimize_window(&mut self, id: WindowId) {
        match self.store.get(id) {
            Some(w) if !w.minimized => {}
            _ => return,
        }
        self.cancel_interaction_on(id);
        self.tracking_focus(|engine| engine.store.minimize_window(id));
        self.events.push(WmEvent::WindowMinimized { id });
    }

    /// Un-hide a minimized window without changing focus
    pub fn restore_window(&mut self, id: WindowId) {
        if self.store.get(id).is_some_and(|w| w.minimized) {
            self.store.restore_window(id);
            self.events.push(WmEvent::WindowRestored { id });
        }
    }

    pub fn maximize_window(&mut self, id: WindowId) {
        match self.store.get(id) {
            Some(w) if !w.is_maximized() => {}
            _ => return,
        }
        self.cancel_interaction_on(id);
        self.store.maximize_window(id, self.snap_target(SnapZone::Maximize));
        self.events.push(WmEvent::WindowMaximized { id });
    }

    pub fn unmaximize_window(&mut self, id: WindowId) {
        if self.store.get(id).is_some_and(|w| w.is_maximized()) {
            self.store.unmaximize_window(id);
            self.events.push(WmEvent::WindowUnmaximized { id });
        }
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        match self.store.get(id) {
            Some(w) if w.is_maximized() => self.unmaximize_window(id),
            Some(_) => self.maximize_window(id),
            None => {}
        }
    }

    /// Move a window into a snap zone
    ///
    /// `Maximize` goes through the normal maximize path. Snapping a
    /// maximized window to a half discards its restore bounds.
    pub fn snap_window(&mut self, id: WindowId, zone: SnapZone) {
        if self.store.get(id).is_none() {
            return;
        }
        if zone == SnapZone::Maximize {
            self.maximize_window(id);
            return;
        }
        self.cancel_interaction_on(id);
        let target = self.snap_target(zone);
        self.store.update_window_bounds(id, target);
        self.store.update_window_snap_state(id, Some(zone.state()));
        self.events.push(WmEvent::WindowSnapped { id, zone });
    }

    pub fn set_title(&mut self, id: WindowId, title: &str) {
        self.store.set_title(id, title);
    }

    pub fn set_unsaved_state(&mut self, id: WindowId, unsaved: bool) {
        self.store.set_unsaved_state(id, unsaved);
    }

    /// Focus the next (or previous) visible window
    ///
    /// Forward raises the bottom-most visible window, so repeated calls
    /// visit every window. Backward raises the one just below the top,
    /// undoing a single forward step.
    pub fn cycle_focus(&mut self, forward: bool) {
        let visible: Vec<WindowId> = self.store.visible_windows().iter().map(|w| w.id).collect();
        if visible.len() < 2 {
            if let Some(&only) = visible.first() {
                self.focus_window(only);
            }
            return;
        }
        let target = if forward {
            visible[0]
        } else {
            visible[visible.len() - 2]
        };
        trace!(window_id = target, forward, "cycle focus");
        self.focus_window(target);
    }

    /// Run a command against the store
    ///
    /// Returns `false` when the command had nothing to act on.
    pub fn execute(&mut self, command: WmCommand) -> bool {
        let focused = self.store.focused();
        match command {
            WmCommand::CloseFocused => focused.map(|id| self.close_window(id)).is_some(),
            WmCommand::MinimizeFocused => focused.map(|id| self.minimize_window(id)).is_some(),
            WmCommand::ToggleMaximizeFocused => {
                focused.map(|id| self.toggle_maximize(id)).is_some()
            }
            WmCommand::SnapFocused { zone } => {
                focused.map(|id| self.snap_window(id, zone)).is_some()
            }
            WmCommand::FocusNext | WmCommand::FocusPrevious => {
                if self.store.visible_windows().is_empty() {
                    return false;
                }
                self.cycle_focus(command == WmCommand::FocusNext);
                true
            }
            WmCommand::Focus { id } => {
                let known = self.store.get(id).is_some();
                self.focus_window(id);
                known
            }
            WmCommand::Close { id } => {
                let known = self.store.get(id).is_some();
                self.close_window(id);
                known
            }
        }
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Title-bar pointer-down on `id`
    pub fn start_drag(&mut self, id: WindowId, sample: &PointerSample) -> InputResult {
        let started = self.tracking_focus(|engine| {
            engine.drag.start(
                &mut engine.store,
                engine.capture.as_mut(),
                &engine.config,
                &engine.viewport,
                id,
                sample,
            )
        });
        if started {
            self.events.push(WmEvent::DragStarted { id });
        }
        started.into()
    }

    /// Border pointer-down on `id` at `handle`
    pub fn start_resize(
        &mut self,
        id: WindowId,
        handle: ResizeHandle,
        sample: &PointerSample,
    ) -> InputResult {
        let started = self.tracking_focus(|engine| {
            engine.resize.start(
                &mut engine.store,
                engine.capture.as_mut(),
                &engine.config,
                &engine.viewport,
                id,
                handle,
                sample,
            )
        });
        if started {
            self.events.push(WmEvent::ResizeStarted { id, handle });
        }
        started.into()
    }

    /// Global pointer move
    pub fn pointer_move(&mut self, sample: &PointerSample) -> InputResult {
        if self.drag.is_active() {
            self.drag.update(&mut self.store, sample).into()
        } else if self.resize.is_active() {
            self.resize.update(&mut self.store, sample).into()
        } else {
            InputResult::Unhandled
        }
    }

    /// Global pointer release
    pub fn pointer_up(&mut self, sample: &PointerSample) -> InputResult {
        if self.drag.accepts(sample) {
            if let Some(end) = self.drag.finish(&mut self.store, self.capture.as_mut()) {
                self.publish_drag_end(end);
            }
            InputResult::Handled
        } else if self.resize.accepts(sample) {
            if let Some(end) = self.resize.finish(&mut self.store, self.capture.as_mut()) {
                self.publish_resize_end(end);
            }
            InputResult::Handled
        } else {
            InputResult::Unhandled
        }
    }

    /// Cancel the active gesture, restoring its start bounds
    pub fn pointer_cancel(&mut self) -> InputResult {
        if let Some(end) = self.drag.cancel(&mut self.store, self.capture.as_mut()) {
            self.publish_drag_end(end);
            InputResult::Handled
        } else if let Some(end) = self.resize.cancel(&mut self.store, self.capture.as_mut()) {
            self.publish_resize_end(end);
            InputResult::Handled
        } else {
            InputResult::Unhandled
        }
    }

    /// Global key-down
    ///
    /// Escape cancels an active gesture. Shortcuts only run when nothing
    /// is in progress.
    pub fn key_down(&mut self, chord: &KeyChord) -> InputResult {
        if self.is_interacting() {
            if chord.is_escape() {
                return self.pointer_cancel();
            }
            return InputResult::Unhandled;
        }
        match self.shortcuts.resolve(chord) {
            Some(command) => {
                debug!(chord = %chord, ?command, "shortcut");
                self.execute(command);
                InputResult::Handled
            }
            None => InputResult::Unhandled,
        }
    }

    // =========================================================================
    // Touch input
    // =========================================================================

    /// A finger went down; `active` lists every contact now down
    pub fn touch_start(&mut self, active: &[TouchPoint], now_ms: f64) -> Option<Gesture> {
        let gesture = self.gestures.touch_start(active, now_ms);
        self.publish_gesture(gesture, self.is_interacting())
    }

    /// Fingers moved; `active` lists every contact now down
    ///
    /// The contact driving a touch drag or resize moves it; others only
    /// feed the recognizer.
    pub fn touch_move(&mut self, active: &[TouchPoint], now_ms: f64) -> Option<Gesture> {
        for touch in active {
            let sample =
                PointerSample::touch(touch.id, touch.position.x, touch.position.y, active.len());
            if self.drag.accepts(&sample) || self.resize.accepts(&sample) {
                self.pointer_move(&sample);
            }
        }
        let gesture = self.gestures.touch_move(active, now_ms);
        self.publish_gesture(gesture, self.is_interacting())
    }

    /// Fingers lifted; `remaining` are still down, `ended` just lifted
    pub fn touch_end(
        &mut self,
        remaining: &[TouchPoint],
        ended: &[TouchPoint],
        now_ms: f64,
    ) -> Option<Gesture> {
        let was_interacting = self.is_interacting();
        for touch in ended {
            let sample =
                PointerSample::touch(touch.id, touch.position.x, touch.position.y, remaining.len());
            self.pointer_up(&sample);
        }
        let gesture = self.gestures.touch_end(remaining, ended, now_ms);
        self.publish_gesture(gesture, was_interacting)
    }

    /// The host cancelled the touch sequence
    pub fn touch_cancel(&mut self) {
        self.gestures.touch_cancel();
        self.pointer_cancel();
    }

    /// Fire due timers
    pub fn tick(&mut self, now_ms: f64) -> Option<Gesture> {
        let gesture = self.gestures.tick(now_ms);
        self.publish_gesture(gesture, self.is_interacting())
    }

    /// Tear down all input state: cancel any gesture and every timer
    pub fn reset_input(&mut self) {
        self.pointer_cancel();
        self.gestures.reset();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Run `f`, then queue a focus notification if focus moved
    fn tracking_focus<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.store.focused();
        let result = f(self);
        let after = self.store.focused();
        if before != after {
            self.events.push(WmEvent::FocusChanged { id: after });
        }
        result
    }

    fn cancel_interaction_on(&mut self, id: WindowId) {
        if self.drag.window_id() == Some(id) || self.resize.window_id() == Some(id) {
            self.pointer_cancel();
        }
    }

    fn publish_drag_end(&mut self, end: DragEnd) {
        self.events.push(WmEvent::DragEnded {
            id: end.window_id,
            snapped: end.snapped,
            cancelled: end.cancelled,
        });
    }

    fn publish_resize_end(&mut self, end: ResizeEnd) {
        self.events.push(WmEvent::ResizeEnded {
            id: end.window_id,
            handle: end.handle,
            cancelled: end.cancelled,
        });
    }

    fn publish_gesture(&mut self, gesture: Option<Gesture>, interacting: bool) -> Option<Gesture> {
        let gesture = gesture?;
        self.events.push(WmEvent::Gesture { gesture });

        if !interacting {
            match gesture {
                Gesture::Swipe { direction, .. } if direction.is_horizontal() => {
                    self.cycle_focus(direction == SwipeDirection::Left);
                }
                Gesture::LongPress { position } => {
                    self.events.push(WmEvent::ContextMenuRequested {
                        position,
                        id: self.store.window_at(position),
                    });
                }
                _ => {}
            }
        }
        Some(gesture)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::window::SnapState;

    /// Counts acquire/release pairs through shared cells
    #[derive(Clone, Default)]
    struct CountingCapture {
        acquired: Rc<Cell<usize>>,
        released: Rc<Cell<usize>>,
    }

    impl PointerCapture for CountingCapture {
        fn acquire(&mut self, _window_id: WindowId) {
            self.acquired.set(self.acquired.get() + 1);
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    const START: Rect = Rect::new(100.0, 100.0, 800.0, 600.0);

    fn engine() -> (WindowManagerEngine, CountingCapture) {
        let capture = CountingCapture::default();
        let engine = WindowManagerEngine::default().with_capture(Box::new(capture.clone()));
        (engine, capture)
    }

    fn mouse(x: f32, y: f32) -> PointerSample {
        PointerSample::mouse(x, y, 0)
    }

    #[test]
    fn test_create_emits_created_then_focus() {
        let (mut wm, _) = engine();
        let id = wm.create_window("notepad", Some(START));
        assert_eq!(
            wm.take_events(),
            vec![
                WmEvent::WindowCreated { id },
                WmEvent::FocusChanged { id: Some(id) },
            ]
        );
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn test_drag_then_release_releases_capture_once() {
        let (mut wm, capture) = engine();
        let id = wm.create_window("notepad", Some(START));
        wm.take_events();

        assert_eq!(wm.start_drag(id, &mouse(150.0, 110.0)), InputResult::Handled);
        assert_eq!(wm.pointer_move(&mouse(450.0, 310.0)), InputResult::Handled);
        assert_eq!(wm.pointer_up(&mouse(450.0, 310.0)), InputResult::Handled);
        assert_eq!(wm.pointer_up(&mouse(450.0, 310.0)), InputResult::Unhandled);

        assert_eq!(capture.acquired.get(), 1);
        assert_eq!(capture.released.get(), 1);
        assert_eq!(wm.store().get(id).unwrap().bounds, Rect::new(400.0, 300.0, 800.0, 600.0));
        assert_eq!(
            wm.take_events(),
            vec![
                WmEvent::DragStarted { id },
                WmEvent::DragEnded {
                    id,
                    snapped: None,
                    cancelled: false
                },
            ]
        );
    }

    #[test]
    fn test_escape_cancels_resize() {
        let (mut wm, capture) = engine();
        let id = wm.create_window("paint", Some(START));
        wm.start_resize(id, ResizeHandle::SE, &mouse(900.0, 700.0));
        wm.pointer_move(&mouse(1200.0, 900.0));
        assert_eq!(wm.key_down(&KeyChord::key("Escape")), InputResult::Handled);
        assert_eq!(wm.store().get(id).unwrap().bounds, START);
        assert!(!wm.is_interacting());
        assert_eq!(capture.released.get(), 1);

        // Late events after teardown are ignored
        assert_eq!(wm.pointer_move(&mouse(1500.0, 1000.0)), InputResult::Unhandled);
        assert_eq!(wm.store().get(id).unwrap().bounds, START);
    }

    #[test]
    fn test_drag_release_in_top_zone_maximizes() {
        let (mut wm, _) = engine();
        let id = wm.create_window("notepad", Some(START));
        wm.start_drag(id, &mouse(500.0, 110.0));
        wm.pointer_move(&mouse(600.0, 5.0));
        assert_eq!(wm.pending_snap_zone(), Some(SnapZone::Maximize));
        wm.pointer_up(&mouse(600.0, 5.0));

        let w = wm.store().get(id).unwrap();
        assert!(w.is_maximized());
        assert_eq!(w.bounds, Rect::new(0.0, 0.0, 1920.0, 1032.0));
        // Restore goes back to where the drag left the window
        assert_eq!(w.previous_bounds(), Some(Rect::new(200.0, 0.0, 800.0, 600.0)));
    }

    #[test]
    fn test_close_during_drag_releases_capture() {
        let (mut wm, capture) = engine();
        let id = wm.create_window("notepad", Some(START));
        wm.start_drag(id, &mouse(150.0, 110.0));
        wm.close_window(id);
        assert!(!wm.is_interacting());
        assert_eq!(capture.released.get(), 1);
        assert!(wm.store().check_invariants().is_ok());
    }

    #[test]
    fn test_drop_releases_live_capture() {
        let (mut wm, capture) = engine();
        let id = wm.create_window("notepad", Some(START));
        wm.start_drag(id, &mouse(150.0, 110.0));
        drop(wm);
        assert_eq!(capture.released.get(), 1);
    }

    #[test]
    fn test_shortcuts() {
        let (mut wm, _) = engine();
        let a = wm.create_window("a", Some(START));
        let b = wm.create_window("b", Some(START));

        wm.key_down(&KeyChord::parse("Meta+Left").unwrap());
        assert_eq!(wm.store().get(b).unwrap().snap_state(), Some(SnapState::Left));
        assert_eq!(wm.store().get(b).unwrap().bounds, Rect::new(0.0, 0.0, 960.0, 1032.0));

        wm.key_down(&KeyChord::parse("Alt+F4").unwrap());
        assert!(wm.store().get(b).is_none());
        assert_eq!(wm.store().focused(), Some(a));

        assert_eq!(wm.key_down(&KeyChord::key("x")), InputResult::Unhandled);
    }

    #[test]
    fn test_shortcuts_ignored_mid_gesture() {
        let (mut wm, _) = engine();
        let id = wm.create_window("a", Some(START));
        wm.start_drag(id, &mouse(150.0, 110.0));
        assert_eq!(
            wm.key_down(&KeyChord::parse("Alt+F4").unwrap()),
            InputResult::Unhandled
        );
        assert!(wm.store().get(id).is_some());
    }

    #[test]
    fn test_cycle_focus_visits_every_window() {
        let (mut wm, _) = engine();
        let ids: Vec<WindowId> = (0..3)
            .map(|i| wm.create_window(&format!("app{}", i), None))
            .collect();

        let mut seen = Vec::new();
        for _ in 0..3 {
            wm.execute(WmCommand::FocusNext);
            seen.push(wm.store().focused().unwrap());
        }
        assert_eq!(seen, vec![ids[0], ids[1], ids[2]]);

        wm.execute(WmCommand::FocusNext);
        wm.execute(WmCommand::FocusPrevious);
        assert_eq!(wm.store().focused(), Some(ids[2]));
    }

    #[test]
    fn test_long_press_requests_context_menu() {
        let (mut wm, _) = engine();
        let id = wm.create_window("a", Some(START));
        wm.take_events();

        wm.touch_start(&[TouchPoint::new(3, 300.0, 300.0)], 0.0);
        assert_eq!(wm.next_deadline(), Some(500.0));
        let gesture = wm.tick(600.0);
        assert!(matches!(gesture, Some(Gesture::LongPress { .. })));
        assert!(wm.take_events().contains(&WmEvent::ContextMenuRequested {
            position: Vec2::new(300.0, 300.0),
            id: Some(id),
        }));
    }

    #[test]
    fn test_horizontal_swipe_cycles_focus() {
        let (mut wm, _) = engine();
        let a = wm.create_window("a", None);
        let _b = wm.create_window("b", None);

        let start = TouchPoint::new(1, 800.0, 500.0);
        let end = TouchPoint::new(1, 600.0, 500.0);
        wm.touch_start(&[start], 0.0);
        wm.touch_move(&[end], 50.0);
        let gesture = wm.touch_end(&[], &[end], 100.0);
        assert!(matches!(
            gesture,
            Some(Gesture::Swipe {
                direction: SwipeDirection::Left,
                ..
            })
        ));
        assert_eq!(wm.store().focused(), Some(a));
    }

    #[test]
    fn test_touch_drag_ignores_second_finger() {
        let (mut wm, capture) = engine();
        let id = wm.create_window("a", Some(START));

        wm.touch_start(&[TouchPoint::new(1, 150.0, 110.0)], 0.0);
        wm.start_drag(id, &PointerSample::touch(1, 150.0, 110.0, 1));
        wm.touch_move(&[TouchPoint::new(1, 250.0, 210.0)], 20.0);

        // Second finger comes down and moves; the drag only follows finger 1
        let second = TouchPoint::new(2, 700.0, 700.0);
        wm.touch_start(&[TouchPoint::new(1, 250.0, 210.0), second], 30.0);
        wm.touch_move(&[TouchPoint::new(1, 260.0, 220.0), TouchPoint::new(2, 900.0, 900.0)], 40.0);
        assert_eq!(wm.store().get(id).unwrap().bounds.position(), Vec2::new(210.0, 210.0));

        // Lifting the second finger does not end the drag
        wm.touch_end(
            &[TouchPoint::new(1, 260.0, 220.0)],
            &[TouchPoint::new(2, 900.0, 900.0)],
            50.0,
        );
        assert!(wm.is_interacting());

        wm.touch_end(&[], &[TouchPoint::new(1, 260.0, 220.0)], 60.0);
        assert!(!wm.is_interacting());
        assert_eq!(capture.released.get(), 1);
    }

    #[test]
    fn test_touch_cancel_restores_drag() {
        let (mut wm, capture) = engine();
        let id = wm.create_window("a", Some(START));
        wm.start_drag(id, &PointerSample::touch(4, 150.0, 110.0, 1));
        wm.touch_move(&[TouchPoint::new(4, 600.0, 600.0)], 10.0);
        wm.touch_cancel();
        assert_eq!(wm.store().get(id).unwrap().bounds, START);
        assert_eq!(capture.released.get(), 1);
        assert_eq!(wm.next_deadline(), None);
    }

    #[test]
    fn test_viewport_change_refits_maximized_and_snapped() {
        let (mut wm, _) = engine();
        let a = wm.create_window("a", Some(START));
        let b = wm.create_window("b", Some(START));
        wm.maximize_window(a);
        wm.snap_window(b, SnapZone::Right);

        wm.set_viewport(Viewport::touch(1280.0, 800.0));
        assert_eq!(wm.store().get(a).unwrap().bounds, Rect::new(0.0, 0.0, 1280.0, 800.0));
        assert_eq!(wm.store().get(b).unwrap().bounds, Rect::new(640.0, 0.0, 640.0, 800.0));

        wm.unmaximize_window(a);
        assert_eq!(wm.store().get(a).unwrap().bounds, START);
    }

    #[test]
    fn test_half_snap_keeps_min_width_on_phone() {
        let mut wm = WindowManagerEngine::new(WmConfig::default(), Viewport::touch(390.0, 844.0));
        let id = wm.create_window("notepad", Some(Rect::new(20.0, 100.0, 340.0, 400.0)));

        wm.start_drag(id, &mouse(40.0, 110.0));
        wm.pointer_move(&mouse(5.0, 300.0));
        assert_eq!(wm.pending_snap_zone(), Some(SnapZone::Left));
        wm.pointer_up(&mouse(5.0, 300.0));
        assert_eq!(wm.store().get(id).unwrap().bounds, Rect::new(0.0, 0.0, 320.0, 844.0));

        wm.snap_window(id, SnapZone::Right);
        assert_eq!(wm.store().get(id).unwrap().bounds, Rect::new(70.0, 0.0, 320.0, 844.0));

        wm.set_viewport(Viewport::touch(360.0, 780.0));
        assert_eq!(wm.store().get(id).unwrap().bounds, Rect::new(40.0, 0.0, 320.0, 780.0));
    }

    #[test]
    fn test_small_initial_bounds_resize_in_place() {
        let (mut wm, _) = engine();
        let id = wm.create_window("a", Some(Rect::new(100.0, 100.0, 100.0, 100.0)));
        assert_eq!(wm.store().get(id).unwrap().bounds, Rect::new(100.0, 100.0, 320.0, 240.0));

        wm.start_resize(id, ResizeHandle::NW, &mouse(100.0, 100.0));
        wm.pointer_move(&mouse(101.0, 101.0));
        wm.pointer_up(&mouse(101.0, 101.0));
        assert_eq!(wm.store().get(id).unwrap().bounds, Rect::new(100.0, 100.0, 320.0, 240.0));
    }

    #[test]
    fn test_minimize_focused_passes_focus() {
        let (mut wm, _) = engine();
        let a = wm.create_window("a", None);
        let b = wm.create_window("b", None);
        wm.take_events();

        assert!(wm.execute(WmCommand::MinimizeFocused));
        assert_eq!(wm.store().focused(), Some(a));
        assert_eq!(
            wm.take_events(),
            vec![
                WmEvent::FocusChanged { id: Some(a) },
                WmEvent::WindowMinimized { id: b },
            ]
        );

        wm.focus_window(b);
        assert!(!wm.store().get(b).unwrap().minimized);
        assert!(wm.take_events().contains(&WmEvent::WindowRestored { id: b }));
    }
}

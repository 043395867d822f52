//! WASM bindings for the window manager
//!
//! Thin adapters from DOM `MouseEvent`/`TouchEvent`/`KeyboardEvent` to the
//! engine's pointer samples, touch points, and key chords. The rendering
//! layer reads window state and notifications as JSON.

use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent, TouchEvent, TouchList};

use crate::config::WmConfig;
use crate::engine::{InputResult, WindowManagerEngine};
use crate::error::WmError;
use crate::gesture::TouchPoint;
use crate::input::{PointerCapture, PointerSample};
use crate::math::Rect;
use crate::shortcuts::KeyChord;
use crate::snap::SnapZone;
use crate::viewport::Viewport;
use crate::window::{ResizeHandle, WindowId};

/// Pointer capture backed by JS callbacks
///
/// `on_acquire(windowId)` should attach document-level move/up/cancel/keydown
/// listeners; `on_release()` must remove every one of them.
struct JsCapture {
    on_acquire: js_sys::Function,
    on_release: js_sys::Function,
}

impl PointerCapture for JsCapture {
    fn acquire(&mut self, window_id: WindowId) {
        if let Err(err) = self
            .on_acquire
            .call1(&JsValue::NULL, &JsValue::from_f64(window_id as f64))
        {
            warn!(window_id, error = ?err, "capture acquire callback threw");
        }
    }

    fn release(&mut self) {
        if let Err(err) = self.on_release.call0(&JsValue::NULL) {
            warn!(error = ?err, "capture release callback threw");
        }
    }
}

fn to_js(err: WmError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn mouse_sample(event: &MouseEvent) -> PointerSample {
    PointerSample::mouse(
        event.client_x() as f32,
        event.client_y() as f32,
        event.button().clamp(0, u8::MAX as i16) as u8,
    )
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint::new(t.identifier(), t.client_x() as f32, t.client_y() as f32))
        .collect()
}

/// Sample for the first changed touch of a start event
fn touch_start_sample(event: &TouchEvent) -> Option<PointerSample> {
    let touch = event.changed_touches().get(0)?;
    Some(PointerSample::touch(
        touch.identifier(),
        touch.client_x() as f32,
        touch.client_y() as f32,
        event.touches().length() as usize,
    ))
}

fn key_chord(event: &KeyboardEvent) -> KeyChord {
    let mut chord = KeyChord::key(&event.key());
    chord.ctrl = event.ctrl_key();
    chord.alt = event.alt_key();
    chord.shift = event.shift_key();
    chord.meta = event.meta_key();
    chord
}

/// Window manager exported to JavaScript
#[wasm_bindgen]
pub struct WasmWindowManager {
    engine: WindowManagerEngine,
}

#[wasm_bindgen]
impl WasmWindowManager {
    /// Create a window manager with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, touch_primary: bool) -> Self {
        Self {
            engine: WindowManagerEngine::new(
                WmConfig::default(),
                viewport(width, height, touch_primary),
            ),
        }
    }

    /// Create a window manager from a JSON configuration
    pub fn with_config(
        config_json: &str,
        width: f32,
        height: f32,
        touch_primary: bool,
    ) -> Result<WasmWindowManager, JsValue> {
        let engine =
            WindowManagerEngine::from_json(config_json, viewport(width, height, touch_primary))
                .map_err(to_js)?;
        Ok(Self { engine })
    }

    /// Install the global listener hooks used during drag and resize
    pub fn set_capture_callbacks(
        &mut self,
        on_acquire: js_sys::Function,
        on_release: js_sys::Function,
    ) {
        self.engine.set_capture(Box::new(JsCapture {
            on_acquire,
            on_release,
        }));
    }

    pub fn set_viewport(&mut self, width: f32, height: f32, touch_primary: bool) {
        self.engine.set_viewport(viewport(width, height, touch_primary));
    }

    pub fn set_snapping(&mut self, enabled: bool) {
        self.engine.set_snapping(enabled);
    }

    // =========================================================================
    // Window operations
    // =========================================================================

    pub fn create_window(&mut self, app_id: &str) -> f64 {
        self.engine.create_window(app_id, None) as f64
    }

    pub fn create_window_at(&mut self, app_id: &str, x: f32, y: f32, w: f32, h: f32) -> f64 {
        self.engine
            .create_window(app_id, Some(Rect::new(x, y, w, h))) as f64
    }

    pub fn close_window(&mut self, id: f64) {
        self.engine.close_window(id as WindowId);
    }

    pub fn focus_window(&mut self, id: f64) {
        self.engine.focus_window(id as WindowId);
    }

    pub fn minimize_window(&mut self, id: f64) {
        self.engine.minimize_window(id as WindowId);
    }

    pub fn restore_window(&mut self, id: f64) {
        self.engine.restore_window(id as WindowId);
    }

    pub fn maximize_window(&mut self, id: f64) {
        self.engine.maximize_window(id as WindowId);
    }

    pub fn unmaximize_window(&mut self, id: f64) {
        self.engine.unmaximize_window(id as WindowId);
    }

    pub fn toggle_maximize(&mut self, id: f64) {
        self.engine.toggle_maximize(id as WindowId);
    }

    /// Snap to "left", "right", or "maximize"
    pub fn snap_window(&mut self, id: f64, zone: &str) -> Result<(), JsValue> {
        let zone = SnapZone::from_id(zone).map_err(to_js)?;
        self.engine.snap_window(id as WindowId, zone);
        Ok(())
    }

    pub fn set_title(&mut self, id: f64, title: &str) {
        self.engine.set_title(id as WindowId, title);
    }

    pub fn set_unsaved_state(&mut self, id: f64, unsaved: bool) {
        self.engine.set_unsaved_state(id as WindowId, unsaved);
    }

    /// Bind a chord such as "Ctrl+Alt+W" to a JSON-encoded command
    pub fn bind_shortcut(&mut self, chord: &str, command_json: &str) -> Result<(), JsValue> {
        let command = serde_json::from_str(command_json).map_err(|e| to_js(e.into()))?;
        self.engine
            .shortcuts_mut()
            .register_str(chord, command)
            .map_err(to_js)?;
        Ok(())
    }

    // =========================================================================
    // DOM event adapters
    // =========================================================================

    /// Title-bar `mousedown`; returns whether a drag started
    pub fn title_mouse_down(&mut self, id: f64, event: &MouseEvent) -> bool {
        let sample = mouse_sample(event);
        self.engine.start_drag(id as WindowId, &sample) == InputResult::Handled
    }

    /// Border `mousedown` on `handle` ("n", "se", ...); returns whether a resize started
    pub fn border_mouse_down(
        &mut self,
        id: f64,
        handle: &str,
        event: &MouseEvent,
    ) -> Result<bool, JsValue> {
        let handle = ResizeHandle::from_id(handle).map_err(to_js)?;
        let sample = mouse_sample(event);
        Ok(self.engine.start_resize(id as WindowId, handle, &sample) == InputResult::Handled)
    }

    /// Title-bar `touchstart`; returns whether a drag started
    pub fn title_touch_start(&mut self, id: f64, event: &TouchEvent) -> bool {
        touch_start_sample(event).is_some_and(|sample| {
            self.engine.start_drag(id as WindowId, &sample) == InputResult::Handled
        })
    }

    /// Border `touchstart` on `handle`; returns whether a resize started
    pub fn border_touch_start(
        &mut self,
        id: f64,
        handle: &str,
        event: &TouchEvent,
    ) -> Result<bool, JsValue> {
        let handle = ResizeHandle::from_id(handle).map_err(to_js)?;
        Ok(touch_start_sample(event).is_some_and(|sample| {
            self.engine.start_resize(id as WindowId, handle, &sample) == InputResult::Handled
        }))
    }

    /// Document `mousemove` while captured
    pub fn mouse_move(&mut self, event: &MouseEvent) -> bool {
        self.engine.pointer_move(&mouse_sample(event)) == InputResult::Handled
    }

    /// Document `mouseup` while captured
    pub fn mouse_up(&mut self, event: &MouseEvent) -> bool {
        self.engine.pointer_up(&mouse_sample(event)) == InputResult::Handled
    }

    /// Document `keydown`; returns whether the host should `preventDefault`
    pub fn key_down(&mut self, event: &KeyboardEvent) -> bool {
        self.engine.key_down(&key_chord(event)) == InputResult::Handled
    }

    /// Surface `touchstart`
    pub fn touch_start(&mut self, event: &TouchEvent, now_ms: f64) {
        self.engine.touch_start(&touch_points(&event.touches()), now_ms);
    }

    /// Surface `touchmove`
    pub fn touch_move(&mut self, event: &TouchEvent, now_ms: f64) {
        self.engine.touch_move(&touch_points(&event.touches()), now_ms);
    }

    /// Surface `touchend`
    pub fn touch_end(&mut self, event: &TouchEvent, now_ms: f64) {
        self.engine.touch_end(
            &touch_points(&event.touches()),
            &touch_points(&event.changed_touches()),
            now_ms,
        );
    }

    /// Surface `touchcancel`
    pub fn touch_cancel(&mut self) {
        self.engine.touch_cancel();
    }

    /// Fire due gesture timers
    pub fn tick(&mut self, now_ms: f64) {
        self.engine.tick(now_ms);
    }

    /// Deadline for the next `tick`, or `undefined` when no timer is armed
    pub fn next_deadline(&self) -> Option<f64> {
        self.engine.next_deadline()
    }

    /// Cancel any gesture and timer (call on unmount)
    pub fn reset_input(&mut self) {
        self.engine.reset_input();
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn is_interacting(&self) -> bool {
        self.engine.is_interacting()
    }

    /// Window records back to front, as JSON
    pub fn windows_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.windows()).map_err(|e| to_js(e.into()))
    }

    /// Drain notifications as a JSON array
    pub fn take_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.take_events()).map_err(|e| to_js(e.into()))
    }
}

fn viewport(width: f32, height: f32, touch_primary: bool) -> Viewport {
    if touch_primary {
        Viewport::touch(width, height)
    } else {
        Viewport::new(width, height)
    }
}

//! Border resize controller

use tracing::{debug, trace, warn};

use super::session::{InteractionSession, PointerCapture};
use super::{PointerSample, ResizeState};
use crate::config::WmConfig;
use crate::constraint::Constraints;
use crate::math::BoundsPatch;
use crate::viewport::Viewport;
use crate::window::{ResizeHandle, WindowId, WindowStore};

/// How a resize ended
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEnd {
    pub window_id: WindowId,
    pub handle: ResizeHandle,
    /// Ended by Escape or touch-cancel rather than release
    pub cancelled: bool,
}

/// Resizes a window from one of its eight handles
///
/// There is no snapping on resize; release commits the last computed bounds.
#[derive(Debug, Default)]
pub struct ResizeController {
    session: Option<InteractionSession<ResizeHandle>>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `sample` comes from the pointer driving the active gesture
    pub fn accepts(&self, sample: &PointerSample) -> bool {
        self.session.as_ref().is_some_and(|s| s.accepts(sample))
    }

    /// Window being resized
    pub fn window_id(&self) -> Option<WindowId> {
        self.session.as_ref().map(|s| s.window_id)
    }

    /// Start resizing `id` from `handle`
    ///
    /// Refused under the same conditions as a drag.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        &mut self,
        store: &mut WindowStore,
        capture: &mut dyn PointerCapture,
        config: &WmConfig,
        viewport: &Viewport,
        id: WindowId,
        handle: ResizeHandle,
        sample: &PointerSample,
    ) -> bool {
        if self.session.is_some() || store.is_interacting() {
            warn!(window_id = id, "resize start ignored: interaction already active");
            return false;
        }
        if !sample.can_start() {
            return false;
        }
        match store.get(id) {
            Some(window) if !window.is_maximized() && !window.minimized => {}
            _ => return false,
        }

        store.focus_window(id);
        let Some(window) = store.get(id) else {
            return false;
        };

        let session = InteractionSession::begin(
            capture,
            window,
            sample,
            Constraints::new(config, viewport),
            *viewport,
            handle,
        );

        store.set_resize_state(Some(ResizeState {
            window_id: id,
            start_bounds: session.start_bounds,
            start_position: session.start_position,
            handle,
        }));
        debug!(window_id = id, handle = handle.id(), "resize started");

        self.session = Some(session);
        true
    }

    /// Follow a pointer move; returns whether the bounds changed
    pub fn update(&mut self, store: &mut WindowStore, sample: &PointerSample) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if !session.accepts(sample) {
            return false;
        }
        let Some(window) = store.get(session.window_id) else {
            return false;
        };

        let bounds = session
            .constraints
            .resize(session.kind, session.start_bounds, session.delta(sample));
        let id = session.window_id;

        if window.snap_state().is_some() {
            store.update_window_snap_state(id, None);
        }
        store.update_window_bounds(id, BoundsPatch::full(bounds));
        trace!(window_id = id, bounds = ?bounds, "resize move");
        true
    }

    /// Release: tear down and keep the last computed bounds
    pub fn finish(
        &mut self,
        store: &mut WindowStore,
        capture: &mut dyn PointerCapture,
    ) -> Option<ResizeEnd> {
        let data = self.session.take()?.dispose(capture);
        store.set_resize_state(None);

        debug!(window_id = data.window_id, "resize ended");
        Some(ResizeEnd {
            window_id: data.window_id,
            handle: data.kind,
            cancelled: false,
        })
    }

    /// Escape or touch-cancel: tear down and restore all four bounds fields
    pub fn cancel(
        &mut self,
        store: &mut WindowStore,
        capture: &mut dyn PointerCapture,
    ) -> Option<ResizeEnd> {
        let data = self.session.take()?.dispose(capture);
        store.set_resize_state(None);

        store.update_window_bounds(data.window_id, BoundsPatch::full(data.start_bounds));
        store.update_window_snap_state(data.window_id, data.start_snap);

        debug!(window_id = data.window_id, "resize cancelled");
        Some(ResizeEnd {
            window_id: data.window_id,
            handle: data.kind,
            cancelled: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::session::testing::RecordingCapture;
    use crate::math::{Rect, Size};

    const VP: Viewport = Viewport::new(1920.0, 1080.0);
    const START: Rect = Rect::new(100.0, 100.0, 800.0, 600.0);

    fn run(handle: ResizeHandle, from: (f32, f32), to: (f32, f32)) -> Rect {
        let config = WmConfig::default();
        let mut store = WindowStore::with_config(&config);
        let mut capture = RecordingCapture::default();
        let id = store.create_window("paint", Some(START));
        let mut resize = ResizeController::new();

        assert!(resize.start(
            &mut store,
            &mut capture,
            &config,
            &VP,
            id,
            handle,
            &PointerSample::mouse(from.0, from.1, 0),
        ));
        resize.update(&mut store, &PointerSample::mouse(to.0, to.1, 0));
        resize.finish(&mut store, &mut capture);
        assert_eq!(capture.released(), 1);
        store.get(id).unwrap().bounds
    }

    #[test]
    fn test_se_resize() {
        assert_eq!(
            run(ResizeHandle::SE, (900.0, 700.0), (950.0, 750.0)),
            Rect::new(100.0, 100.0, 850.0, 650.0)
        );
    }

    #[test]
    fn test_nw_resize() {
        assert_eq!(
            run(ResizeHandle::NW, (100.0, 100.0), (50.0, 50.0)),
            Rect::new(50.0, 50.0, 850.0, 650.0)
        );
    }

    #[test]
    fn test_se_resize_overshoot_stays_in_viewport() {
        let b = run(ResizeHandle::SE, (900.0, 700.0), (2500.0, 1500.0));
        assert!(b.right() <= 1920.0 + 0.001);
        assert!(b.bottom() <= 1032.0 + 0.001);
    }

    #[test]
    fn test_resize_never_below_minimum() {
        for handle in ResizeHandle::all() {
            let b = run(*handle, (500.0, 400.0), (5000.0, 5000.0));
            assert!(b.width >= 320.0 && b.height >= 240.0, "{:?}: {:?}", handle, b);
            let b = run(*handle, (500.0, 400.0), (-5000.0, -5000.0));
            assert!(b.width >= 320.0 && b.height >= 240.0, "{:?}: {:?}", handle, b);
        }
    }

    #[test]
    fn test_escape_restores_all_fields() {
        let config = WmConfig::default();
        let mut store = WindowStore::with_config(&config);
        let mut capture = RecordingCapture::default();
        let id = store.create_window("paint", Some(START));
        let mut resize = ResizeController::new();

        resize.start(
            &mut store,
            &mut capture,
            &config,
            &VP,
            id,
            ResizeHandle::NW,
            &PointerSample::mouse(100.0, 100.0, 0),
        );
        assert!(store.resize_state().is_some());
        resize.update(&mut store, &PointerSample::mouse(10.0, 30.0, 0));
        resize.update(&mut store, &PointerSample::mouse(700.0, 600.0, 0));
        assert_eq!(store.get(id).unwrap().bounds.size(), Size::new(320.0, 240.0));

        let end = resize.cancel(&mut store, &mut capture).unwrap();
        assert!(end.cancelled);
        assert_eq!(store.get(id).unwrap().bounds, START);
        assert!(store.resize_state().is_none());
        assert!(resize.cancel(&mut store, &mut capture).is_none());
        assert_eq!(store.get(id).unwrap().bounds, START);
    }

    #[test]
    fn test_resize_refused_on_maximized_window() {
        let config = WmConfig::default();
        let mut store = WindowStore::with_config(&config);
        let mut capture = RecordingCapture::default();
        let id = store.create_window("paint", Some(START));
        store.maximize_window(id, VP.usable_rect(48.0));
        let mut resize = ResizeController::new();

        assert!(!resize.start(
            &mut store,
            &mut capture,
            &config,
            &VP,
            id,
            ResizeHandle::SE,
            &PointerSample::mouse(1900.0, 1000.0, 0),
        ));
        assert!(store.resize_state().is_none());
        assert_eq!(capture.acquired(), 0);
    }
}

//! Title-bar drag controller

use tracing::{debug, trace, warn};

use super::session::{InteractionSession, PointerCapture};
use super::{DragState, PointerSample};
use crate::config::WmConfig;
use crate::constraint::Constraints;
use crate::math::{BoundsPatch, Vec2};
use crate::snap::{self, SnapDetector, SnapZone};
use crate::viewport::Viewport;
use crate::window::{WindowId, WindowStore};

/// Drag-specific session state
#[derive(Clone, Copy, Debug)]
pub(crate) struct DragSession {
    /// Offset from window origin to pointer
    offset: Vec2,
    /// Zone under the pointer on the latest move
    pending_zone: Option<SnapZone>,
    /// Taskbar height for snap targets
    taskbar_height: f32,
}

/// How a drag ended
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEnd {
    pub window_id: WindowId,
    /// Zone committed on release
    pub snapped: Option<SnapZone>,
    /// Ended by Escape or touch-cancel rather than release
    pub cancelled: bool,
}

/// Moves a window with the pointer, clamping to the viewport and
/// committing snap zones on release
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<InteractionSession<DragSession>>,
    detector: SnapDetector,
}

impl DragController {
    /// Create a controller with the given snap detector
    pub fn new(detector: SnapDetector) -> Self {
        Self {
            session: None,
            detector,
        }
    }

    /// Controller configured from `config`
    pub fn from_config(config: &WmConfig) -> Self {
        Self::new(SnapDetector::new(config.snap_threshold, config.enable_snapping))
    }

    /// Enable or disable snapping for future moves
    pub fn set_snapping(&mut self, enabled: bool) {
        self.detector.enabled = enabled;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `sample` comes from the pointer driving the active gesture
    pub fn accepts(&self, sample: &PointerSample) -> bool {
        self.session.as_ref().is_some_and(|s| s.accepts(sample))
    }

    /// Window being dragged
    pub fn window_id(&self) -> Option<WindowId> {
        self.session.as_ref().map(|s| s.window_id)
    }

    /// Zone that release would commit
    pub fn pending_zone(&self) -> Option<SnapZone> {
        self.session.as_ref().and_then(|s| s.kind.pending_zone)
    }

    /// Start dragging `id` from `sample`
    ///
    /// Refused (returns `false`, nothing changes) for unknown, minimized,
    /// or maximized windows, non-primary pointers, and while another
    /// interaction is in progress.
    pub fn start(
        &mut self,
        store: &mut WindowStore,
        capture: &mut dyn PointerCapture,
        config: &WmConfig,
        viewport: &Viewport,
        id: WindowId,
        sample: &PointerSample,
    ) -> bool {
        if self.session.is_some() || store.is_interacting() {
            warn!(window_id = id, "drag start ignored: interaction already active");
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

        let offset = sample.position - window.bounds.position();
        let session = InteractionSession::begin(
            capture,
            window,
            sample,
            Constraints::new(config, viewport),
            *viewport,
            DragSession {
                offset,
                pending_zone: None,
                taskbar_height: config.taskbar_height,
            },
        );

        store.set_drag_state(Some(DragState {
            window_id: id,
            start_bounds: session.start_bounds,
            start_position: session.start_position,
            offset,
        }));
        debug!(window_id = id, "drag started");

        self.session = Some(session);
        true
    }

    /// Follow a pointer move; returns whether the window moved
    pub fn update(&mut self, store: &mut WindowStore, sample: &PointerSample) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.accepts(sample) {
            return false;
        }
        let Some(window) = store.get(session.window_id) else {
            return false;
        };

        session.kind.pending_zone = self.detector.detect(sample.position, &session.viewport);

        let candidate = sample.position - session.kind.offset;
        let origin = session
            .constraints
            .clamp_drag_origin(candidate, window.bounds.size());
        let id = session.window_id;

        if window.snap_state().is_some() {
            store.update_window_snap_state(id, None);
        }
        store.update_window_bounds(id, BoundsPatch::position(origin));
        trace!(
            window_id = id,
            x = origin.x,
            y = origin.y,
            zone = ?session.kind.pending_zone,
            "drag move"
        );
        true
    }

    /// Release: tear down, then commit the pending snap zone if any
    pub fn finish(
        &mut self,
        store: &mut WindowStore,
        capture: &mut dyn PointerCapture,
    ) -> Option<DragEnd> {
        let data = self.session.take()?.dispose(capture);
        store.set_drag_state(None);

        let id = data.window_id;
        let zone = data.kind.pending_zone;
        if let Some(zone) = zone {
            let target = snap::target_bounds(
                zone,
                &data.viewport,
                data.kind.taskbar_height,
                data.constraints.min_size,
            );
            match zone {
                SnapZone::Maximize => store.maximize_window(id, target),
                SnapZone::Left | SnapZone::Right => {
                    store.update_window_bounds(id, target);
                    store.update_window_snap_state(id, Some(zone.state()));
                }
            }
        }

        debug!(window_id = id, snapped = ?zone, "drag ended");
        Some(DragEnd {
            window_id: id,
            snapped: zone,
            cancelled: false,
        })
    }

    /// Escape or touch-cancel: tear down and put the window back
    pub fn cancel(
        &mut self,
        store: &mut WindowStore,
        capture: &mut dyn PointerCapture,
    ) -> Option<DragEnd> {
        let data = self.session.take()?.dispose(capture);
        store.set_drag_state(None);

        let id = data.window_id;
        store.update_window_bounds(id, BoundsPatch::position(data.start_bounds.position()));
        store.update_window_snap_state(id, data.start_snap);

        debug!(window_id = id, "drag cancelled");
        Some(DragEnd {
            window_id: id,
            snapped: None,
            cancelled: true,
        })
    }
}

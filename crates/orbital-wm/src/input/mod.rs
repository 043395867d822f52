//! Pointer input and interaction controllers
//!
//! Mouse and touch events are normalized into [`PointerSample`]s by thin
//! host adapters; the drag and resize controllers only ever see samples.
//! Each gesture lives in an interaction session that acquires the host's
//! pointer capture on start and releases it exactly once on release,
//! cancel, or Escape.

mod drag;
mod pointer;
mod resize;
mod session;
mod state;

pub use drag::{DragController, DragEnd};
pub use pointer::{PointerId, PointerKind, PointerSample};
pub use resize::{ResizeController, ResizeEnd};
pub use session::{NoCapture, PointerCapture};
pub use state::{DragState, ResizeState};

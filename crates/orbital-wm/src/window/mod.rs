//! Window management module
//!
//! Provides the window record, its placement mode, resize handles, and the
//! [`WindowStore`] that owns every window, the z-order, focus, and the
//! transient drag/resize state.

mod config;
mod handle;
mod store;
#[allow(clippy::module_inception)]
mod window;

pub use config::WindowConfig;
pub use handle::ResizeHandle;
pub use store::WindowStore;
pub use window::{Placement, SnapSide, SnapState, Window, WindowView};

pub use crate::types::WindowId;

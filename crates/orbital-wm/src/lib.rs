//! Window Manager for the Orbital desktop shell
//!
//! This crate provides the window management core of a browser-hosted
//! desktop:
//! - Window lifecycle, focus, and z-order
//! - Title-bar drag with viewport clamping and edge snapping
//! - Eight-handle border resize with minimum size enforcement
//! - Touch gesture recognition (tap, double-tap, long-press, swipe, pinch)
//! - Keyboard shortcuts
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Core geometry types (`Vec2`, `Rect`, `Size`)
//! - [`window`]: Window records, placement, and the [`WindowStore`]
//! - [`constraint`]: Drag clamping and per-handle resize arithmetic
//! - [`snap`]: Snap zone detection and target bounds
//! - [`input`]: Pointer samples and the drag/resize controllers
//! - [`gesture`]: Touch gesture state machine
//! - [`shortcuts`]: Key chords and command bindings
//!
//! ## Example
//!
//! ```rust
//! use orbital_wm::{PointerSample, Rect, Viewport, WindowManagerEngine, WmConfig};
//!
//! let mut wm = WindowManagerEngine::new(WmConfig::default(), Viewport::new(1920.0, 1080.0));
//! let id = wm.create_window("notepad", Some(Rect::new(100.0, 100.0, 800.0, 600.0)));
//!
//! wm.start_drag(id, &PointerSample::mouse(150.0, 110.0, 0));
//! wm.pointer_move(&PointerSample::mouse(250.0, 210.0, 0));
//! wm.pointer_up(&PointerSample::mouse(250.0, 210.0, 0));
//!
//! assert_eq!(wm.store().get(id).unwrap().bounds.x, 200.0);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without browser
//! 2. **Time Abstraction**: Gesture timers take injected `now_ms` for deterministic testing
//! 3. **Session Ownership**: A gesture's pointer capture is released exactly once
//! 4. **Minimal Dependencies**: Core types have no browser dependencies

pub mod config;
pub mod constraint;
pub mod error;
pub mod gesture;
pub mod input;
pub mod math;
pub mod shortcuts;
pub mod snap;
pub mod window;

mod engine;
mod types;
mod viewport;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use config::{GestureConfig, WmConfig};
pub use engine::{InputResult, WindowManagerEngine, WmEvent};
pub use error::{WmError, WmResult};
pub use gesture::{Gesture, GestureRecognizer, SwipeDirection, TouchPoint};
pub use input::{
    DragController, DragState, NoCapture, PointerCapture, PointerId, PointerKind, PointerSample,
    ResizeController, ResizeState,
};
pub use math::{BoundsPatch, Rect, Size, Vec2};
pub use shortcuts::{KeyChord, ShortcutRegistry, WmCommand};
pub use snap::{SnapDetector, SnapZone};
pub use types::TouchId;
pub use viewport::Viewport;
pub use window::{
    Placement, ResizeHandle, SnapSide, SnapState, Window, WindowConfig, WindowId, WindowStore,
    WindowView,
};

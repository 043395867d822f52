//! Core type definitions for the window manager
//!
//! This module centralizes type aliases used throughout the crate
//! for consistency and discoverability.

/// Unique window identifier
///
/// Windows are identified by a monotonically increasing 64-bit integer.
/// Window IDs are never reused within a `WindowStore` instance.
pub type WindowId = u64;

/// Identifier of a single touch contact, as reported by the host
pub type TouchId = i32;

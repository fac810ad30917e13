//! Tint model shared between the UI core and the host.
//!
//! The host multiplies every textured quad by the active tint. Colors here are
//! straight (non-premultiplied) RGBA because that is what the host's
//! `set_tint` primitive expects.

pub mod color;

pub use color::Color;

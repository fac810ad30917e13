//! Lodestar engine crate.
//!
//! Owns the pieces that sit between the UI core and the host application:
//! integer geometry, tint colors, the [`host::RenderHost`] boundary, a
//! recording host for headless runs, frame timing, and logger setup.
//!
//! The host (a game client) owns the GPU, the input loop and the frame clock.
//! Nothing in this crate draws on its own.

pub mod coords;
pub mod host;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod time;

//! Frame timing.
//!
//! The host normally owns the frame clock and hands `dt` to
//! `UiManager::frame`. `FrameClock` exists for hosts that do not track time
//! themselves and for headless runs, where [`FrameClock::fixed`] gives a
//! deterministic step.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};

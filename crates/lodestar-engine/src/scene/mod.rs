//! Recorded draw stream.
//!
//! Responsibilities:
//! - store every host call of a render pass as a renderer-agnostic [`DrawCmd`]
//! - track the effective scissor for each recorded command
//! - provide [`RecordingHost`], a [`RenderHost`](crate::host::RenderHost) that
//!   renders into a [`DrawList`] for headless runs and tests

mod cmd;
mod list;
mod recording;

pub use cmd::{DrawCmd, TextCmd};
pub use list::{DrawItem, DrawList};
pub use recording::RecordingHost;

use crate::coords::Rect;
use crate::host::Quad;

use super::{DrawCmd, TextCmd};

/// A single recorded command plus the scissor that was active when it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Effective scissor in scaled pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for a frame, in paint order (back-to-front).
///
/// # Clipping
///
/// Scissor commands are recorded as-is and also folded into a clip stack.
/// Clips are intersected with the current parent, so nested regions behave
/// like the host's scissor stack does.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,

    /// Stack of active scissor rects.
    /// The top is always the current effective clip, already intersected with all parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.clip_stack.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current scissor depth.
    #[inline]
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Records a command. Scissor commands also update the clip stack.
    pub fn push(&mut self, cmd: DrawCmd) {
        match cmd {
            DrawCmd::PushScissor(rect) => {
                let effective = match self.clip_stack.last() {
                    None => rect,
                    // No overlap with the parent: keep a zero-area rect so everything
                    // recorded inside is known to be invisible.
                    Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(rect.x, rect.y, 0, 0)),
                };
                self.record(cmd);
                self.clip_stack.push(effective);
            }
            DrawCmd::PopScissor => {
                if self.clip_stack.pop().is_none() {
                    log::warn!("pop_scissor without matching push_scissor; ignored");
                    return;
                }
                self.record(cmd);
            }
            other => self.record(other),
        }
    }

    /// Iterates recorded quads together with their effective scissor.
    pub fn quads(&self) -> impl Iterator<Item = (&Quad, Option<Rect>)> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Quad(q) => Some((q, item.clip_rect)),
            _ => None,
        })
    }

    /// Iterates recorded text runs.
    pub fn texts(&self) -> impl Iterator<Item = &TextCmd> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Text(t) => Some(t),
            _ => None,
        })
    }

    fn record(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem { cmd, clip_rect: self.clip_stack.last().copied() });
    }
}

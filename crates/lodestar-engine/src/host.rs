//! The boundary between the UI core and the host application.
//!
//! The host owns the window, the textured-quad rasterizer, the scissor stack
//! and the font. The core only ever talks to it through [`RenderHost`], once
//! per render pass, on the host's main thread.

use crate::coords::{Point, Rect, Size};
use crate::paint::Color;

/// Opaque handle to a host-managed texture atlas.
///
/// The core never loads, decodes or frees atlases; it only passes the handle
/// back to [`RenderHost::draw_textured_quad`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtlasId(pub u32);

/// One textured quad: `src` (atlas texels) stretched onto `dst` (screen pixels).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Quad {
    pub atlas: AtlasId,
    pub dst: Rect,
    pub src: Rect,
    /// Full atlas dimensions, needed by the host to normalize `src` into UVs.
    pub atlas_size: Size,
}

/// Services the host provides to a render pass.
///
/// Implementations are expected to be cheap to call many times per frame.
/// None of the methods may fail: a host that cannot honour a call should
/// drop it silently, the same way the core treats its own errors.
pub trait RenderHost {
    /// Current viewport in scaled pixels. Polled once per frame to size the root.
    fn viewport_size(&self) -> Size;

    fn draw_textured_quad(&mut self, quad: Quad);

    /// Multiplies subsequent quads by `color` until [`clear_tint`](Self::clear_tint).
    fn set_tint(&mut self, color: Color);

    fn clear_tint(&mut self);

    /// Begins a scissor region. Must be paired with [`pop_scissor`](Self::pop_scissor).
    fn push_scissor(&mut self, rect: Rect);

    fn pop_scissor(&mut self);

    /// Width of `text` in pixels when drawn with the host font.
    fn measure_text(&self, text: &str) -> i32;

    /// Height of one line of text. Defaults to the classic 9px bitmap font.
    fn line_height(&self) -> i32 {
        9
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color, shadow: bool);
}

/// Runs `draw` inside a scissor region, popping it afterwards.
pub fn with_scissor<H, R>(host: &mut H, rect: Rect, draw: impl FnOnce(&mut H) -> R) -> R
where
    H: RenderHost + ?Sized,
{
    host.push_scissor(rect);
    let out = draw(host);
    host.pop_scissor();
    out
}

/// Runs `draw` with `tint` active. White tints skip the state change entirely.
pub fn with_tint<H, R>(host: &mut H, tint: Color, draw: impl FnOnce(&mut H) -> R) -> R
where
    H: RenderHost + ?Sized,
{
    if tint.is_white() {
        return draw(host);
    }
    host.set_tint(tint);
    let out = draw(host);
    host.clear_tint();
    out
}

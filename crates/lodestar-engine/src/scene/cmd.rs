use crate::coords::{Point, Rect};
use crate::host::Quad;
use crate::paint::Color;

/// A text run as handed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub origin: Point,
    pub color: Color,
    pub shadow: bool,
}

/// Renderer-agnostic draw command stream, one variant per host primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad(Quad),
    SetTint(Color),
    ClearTint,
    PushScissor(Rect),
    PopScissor,
    Text(TextCmd),
}

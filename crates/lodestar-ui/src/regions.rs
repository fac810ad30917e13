//! Built-in regions of the default widget sheet.
//!
//! The host is expected to bind [`WIDGET_SHEET`] to
//! `uitoolkit:textures/gui/widgets-sheet.png` (1024×1024).

use lodestar_engine::coords::{Insets, Size};
use lodestar_engine::host::AtlasId;

use crate::texture::TextureRegion;

pub const WIDGET_SHEET: AtlasId = AtlasId(0);
pub const WIDGET_SHEET_SIZE: Size = Size::new(1024, 1024);

fn sheet(u: i32, v: i32, w: i32, h: i32) -> TextureRegion {
    TextureRegion::new(WIDGET_SHEET, u, v, w, h, WIDGET_SHEET_SIZE)
}

/// 16×16 framed panel, 4px nine-slice border.
pub fn widget_panel() -> TextureRegion {
    sheet(0, 0, 16, 16).with_insets(Insets::all(4))
}

pub fn progress_border_tile_left() -> TextureRegion {
    sheet(16, 30, 10, 5)
}

pub fn progress_border_tile() -> TextureRegion {
    sheet(26, 30, 10, 5)
}

pub fn progress_border_tile_right() -> TextureRegion {
    sheet(36, 30, 11, 5)
}

pub fn progress_fill_tile_left() -> TextureRegion {
    sheet(16, 35, 10, 5)
}

pub fn progress_fill_tile() -> TextureRegion {
    sheet(26, 35, 10, 5)
}

pub fn progress_fill_tile_right() -> TextureRegion {
    sheet(36, 35, 11, 5)
}

//! Built-in components.

mod background;
mod label;
mod panel;
mod position;
mod scale;

pub use background::{BackgroundComponent, DrawMode, fit_to_region};
pub use label::{HAlign, LabelComponent, VAlign};
pub use panel::{CrossAlign, Orientation, PanelComponent};
pub use position::PositionComponent;
pub use scale::ScaleComponent;

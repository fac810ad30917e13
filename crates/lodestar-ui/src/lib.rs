//! Lodestar UI: anchored, component-composed in-game interface on top of
//! `lodestar-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use lodestar_ui::prelude::*;
//!
//! let mut ui = UiManager::new(UiConfig::default());
//!
//! let panel = ui.tree_mut().spawn();
//! ui.tree_mut().set_size(panel, Size::new(120, 40))?;
//! ui.tree_mut().add_component(panel, BackgroundComponent::nine_slice(regions::widget_panel()))?;
//! ui.tree_mut().edit::<PositionComponent, _>(panel, |p| p.set_alignment(Anchor::BottomCenter, Anchor::BottomCenter));
//! ui.attach(panel)?;
//!
//! // In your host tick:
//! ui.frame(&mut host, dt);
//! ```
//!
//! # Extending with custom behaviors
//!
//! Implement [`Behavior`](component::Behavior) and attach it with
//! [`Component::custom`](component::Component::custom). Errors returned from a
//! hook are logged and skip only that hook for the frame.

pub mod anchor;
pub mod clip;
pub mod component;
pub mod components;
pub mod manager;
pub mod nine_slice;
pub mod progress;
pub mod regions;
pub mod texture;
pub mod tree;

pub use manager::{UiConfig, UiManager};

/// Everything needed to build a UI tree and write components.
pub mod prelude {
    pub use crate::anchor::{Anchor, AnchorPoint, AnchorSpec, Margin, Margins};
    pub use crate::clip::{ClipAxis, ClipDirection, ContentClip};
    pub use crate::component::{Behavior, Component, ComponentType, RenderCx, UpdateCx, priority};
    pub use crate::components::{
        BackgroundComponent, CrossAlign, DrawMode, HAlign, LabelComponent, Orientation, PanelComponent,
        PositionComponent, ScaleComponent, VAlign,
    };
    pub use crate::manager::{UiConfig, UiManager};
    pub use crate::nine_slice::{NineSliceMode, NineSlicePolicy};
    pub use crate::progress::{AnimatedProgress, ProgressSkin, TileProgressBar};
    pub use crate::regions;
    pub use crate::texture::TextureRegion;
    pub use crate::tree::{Entity, EntityId, TreeError, UiTree};

    pub use lodestar_engine::coords::{Insets, Point, Rect, Size};
    pub use lodestar_engine::host::{AtlasId, RenderHost};
    pub use lodestar_engine::paint::Color;
}

use std::any::{Any, TypeId};

use lodestar_engine::host::RenderHost;

use crate::components::{
    BackgroundComponent, LabelComponent, PanelComponent, PositionComponent, ScaleComponent,
};
use crate::progress::ProgressComponent;
use crate::tree::{Entity, EntityId, UiTree};

// ── priorities ────────────────────────────────────────────────────────────

/// Conventional execution priorities. Lower runs first in both update and
/// render, so backgrounds paint under content.
pub mod priority {
    pub const SIZING: i32 = 5;
    pub const POSITIONING: i32 = 10;
    pub const BACKGROUND: i32 = 20;
    pub const CONTENT: i32 = 30;
    pub const LAYOUT: i32 = 50;
    pub const PROGRESS: i32 = 60;
}

// ── hook contexts ─────────────────────────────────────────────────────────

/// What an update hook can reach: the whole tree and the id of its owner.
///
/// While a hook runs, its own component is lent out of the owner, so looking
/// up that same kind on the owner returns `None`.
pub struct UpdateCx<'a> {
    pub tree: &'a mut UiTree,
    pub owner: EntityId,
}

impl UpdateCx<'_> {
    #[inline]
    pub fn owner(&self) -> Option<&Entity> {
        self.tree.get(self.owner)
    }

    #[inline]
    pub fn owner_mut(&mut self) -> Option<&mut Entity> {
        self.tree.get_mut(self.owner)
    }
}

/// Render hooks additionally get the host.
pub struct RenderCx<'a> {
    pub tree: &'a mut UiTree,
    pub owner: EntityId,
    pub host: &'a mut dyn RenderHost,
}

impl RenderCx<'_> {
    #[inline]
    pub fn owner(&self) -> Option<&Entity> {
        self.tree.get(self.owner)
    }

    #[inline]
    pub fn owner_mut(&mut self) -> Option<&mut Entity> {
        self.tree.get_mut(self.owner)
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────

/// Object-safe access to the concrete type behind a `dyn Behavior`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A user-defined component.
///
/// ```rust,ignore
/// struct Blink { t: f32 }
///
/// impl Behavior for Blink {
///     fn update(&mut self, cx: &mut UpdateCx<'_>, dt: f32) -> anyhow::Result<()> {
///         self.t += dt;
///         let on = self.t.fract() < 0.5;
///         cx.tree.set_visible(cx.owner, on)?;
///         Ok(())
///     }
/// }
///
/// tree.add_component(id, Component::custom(Blink { t: 0.0 }))?;
/// ```
///
/// A returned error is logged and skips only this hook for this frame.
pub trait Behavior: AsAny {
    fn update(&mut self, _cx: &mut UpdateCx<'_>, _dt: f32) -> anyhow::Result<()> {
        Ok(())
    }

    fn render(&mut self, _cx: &mut RenderCx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Read before every traversal; may change between frames.
    fn priority(&self) -> i32 {
        0
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

// ── Component ─────────────────────────────────────────────────────────────

/// A unit of behavior attached to an [`Entity`].
///
/// An entity holds at most one component per kind; the kind of a built-in
/// variant is its payload type, the kind of [`Component::Custom`] is the
/// concrete behavior type.
pub enum Component {
    Scale(ScaleComponent),
    Position(PositionComponent),
    Background(BackgroundComponent),
    Label(LabelComponent),
    Panel(PanelComponent),
    Progress(ProgressComponent),
    Custom(Box<dyn Behavior>),
}

impl Component {
    pub fn custom<B: Behavior>(behavior: B) -> Self {
        Component::Custom(Box::new(behavior))
    }

    pub fn kind(&self) -> TypeId {
        match self {
            Component::Scale(_) => TypeId::of::<ScaleComponent>(),
            Component::Position(_) => TypeId::of::<PositionComponent>(),
            Component::Background(_) => TypeId::of::<BackgroundComponent>(),
            Component::Label(_) => TypeId::of::<LabelComponent>(),
            Component::Panel(_) => TypeId::of::<PanelComponent>(),
            Component::Progress(_) => TypeId::of::<ProgressComponent>(),
            Component::Custom(b) => Any::type_id((**b).as_any()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Component::Scale(_) => "scale",
            Component::Position(_) => "position",
            Component::Background(_) => "background",
            Component::Label(_) => "label",
            Component::Panel(_) => "panel",
            Component::Progress(_) => "progress",
            Component::Custom(b) => b.name(),
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Component::Scale(_) => priority::SIZING,
            Component::Position(_) => priority::POSITIONING,
            Component::Background(_) => priority::BACKGROUND,
            Component::Label(_) => priority::CONTENT,
            Component::Panel(_) => priority::LAYOUT,
            Component::Progress(_) => priority::PROGRESS,
            Component::Custom(b) => b.priority(),
        }
    }

    pub(crate) fn update(&mut self, cx: &mut UpdateCx<'_>, dt: f32) -> anyhow::Result<()> {
        match self {
            Component::Scale(_) | Component::Background(_) => Ok(()),
            Component::Position(c) => c.update(cx),
            Component::Label(c) => c.update(cx),
            Component::Panel(c) => c.update(cx),
            Component::Progress(c) => c.update(cx, dt),
            Component::Custom(b) => b.update(cx, dt),
        }
    }

    pub(crate) fn render(&mut self, cx: &mut RenderCx<'_>) -> anyhow::Result<()> {
        match self {
            Component::Scale(_)
            | Component::Position(_)
            | Component::Panel(_)
            | Component::Progress(_) => Ok(()),
            Component::Background(c) => c.render(cx),
            Component::Label(c) => c.render(cx),
            Component::Custom(b) => b.render(cx),
        }
    }

    pub fn as_behavior<B: Behavior>(&self) -> Option<&B> {
        match self {
            Component::Custom(b) => (**b).as_any().downcast_ref::<B>(),
            _ => None,
        }
    }

    pub fn as_behavior_mut<B: Behavior>(&mut self) -> Option<&mut B> {
        match self {
            Component::Custom(b) => (**b).as_any_mut().downcast_mut::<B>(),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Component").field(&self.name()).finish()
    }
}

// ── typed access ──────────────────────────────────────────────────────────

/// Built-in component payloads, addressable by type on an [`Entity`].
pub trait ComponentType: Sized + 'static {
    fn wrap(self) -> Component;
    fn peek(component: &Component) -> Option<&Self>;
    fn peek_mut(component: &mut Component) -> Option<&mut Self>;
    fn from_component(component: Component) -> Option<Self>;
}

macro_rules! component_type {
    ($($variant:ident => $ty:ty),* $(,)?) => {$(
        impl ComponentType for $ty {
            #[inline]
            fn wrap(self) -> Component {
                Component::$variant(self)
            }

            #[inline]
            fn peek(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(c) => Some(c),
                    _ => None,
                }
            }

            #[inline]
            fn peek_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(c) => Some(c),
                    _ => None,
                }
            }

            fn from_component(component: Component) -> Option<Self> {
                match component {
                    Component::$variant(c) => Some(c),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Component {
            fn from(c: $ty) -> Self {
                Component::$variant(c)
            }
        }
    )*};
}

component_type! {
    Scale => ScaleComponent,
    Position => PositionComponent,
    Background => BackgroundComponent,
    Label => LabelComponent,
    Panel => PanelComponent,
    Progress => ProgressComponent,
}

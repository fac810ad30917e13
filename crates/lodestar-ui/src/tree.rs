//! The entity arena and the per-frame traversal.
//!
//! Entities are owned by the [`UiTree`]; parents own their children through
//! the tree, and the parent link is a plain [`EntityId`] that never keeps
//! anything alive. Destroying an entity destroys its whole subtree.

use std::any::{Any, TypeId};
use std::panic::{self, AssertUnwindSafe};

use lodestar_engine::coords::{Point, Rect, Size};
use lodestar_engine::host::RenderHost;
use slotmap::SlotMap;
use thiserror::Error;

use crate::anchor::{self, AnchorCache, AnchorKey, AnchorSpec};
use crate::component::{Behavior, Component, ComponentType, RenderCx, UpdateCx};
use crate::components::{BackgroundComponent, PositionComponent, ScaleComponent};
use crate::texture::TextureRegion;

slotmap::new_key_type! {
    /// Generational handle to an [`Entity`]. Stale after the entity is destroyed.
    pub struct EntityId;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("entity {0:?} does not exist")]
    Stale(EntityId),
    #[error("cannot attach {child:?} under {parent:?}: it is an ancestor of (or equal to) the parent")]
    Cycle { parent: EntityId, child: EntityId },
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild { parent: EntityId, child: EntityId },
}

// ── Entity ────────────────────────────────────────────────────────────────

struct Slot {
    kind: TypeId,
    /// `None` while the component is lent out to its own hook.
    component: Option<Component>,
}

/// A node of the UI tree: visibility, hierarchy links and up to one component
/// per kind.
pub struct Entity {
    visible: bool,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    slots: Vec<Slot>,
    /// Bumped on every mutable component access; part of the anchor cache key.
    generation: u64,
    anchor: AnchorCache,
}

impl Entity {
    fn new() -> Self {
        Self {
            visible: true,
            parent: None,
            children: Vec::new(),
            slots: Vec::new(),
            generation: 0,
            anchor: AnchorCache::new(),
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in insertion order (back-to-front).
    #[inline]
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn anchor_cache(&self) -> &AnchorCache {
        &self.anchor
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn slot(&self, kind: TypeId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.kind == kind)
    }

    fn slot_mut(&mut self, kind: TypeId) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.kind == kind)
    }

    pub fn component<T: ComponentType>(&self) -> Option<&T> {
        self.slot(TypeId::of::<T>())?.component.as_ref().and_then(T::peek)
    }

    /// Mutable access. Counts as a mutation for rectangle caching.
    pub fn component_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        self.touch();
        self.slot_mut(TypeId::of::<T>())?.component.as_mut().and_then(T::peek_mut)
    }

    pub fn behavior<B: Behavior>(&self) -> Option<&B> {
        self.slot(TypeId::of::<B>())?.component.as_ref()?.as_behavior::<B>()
    }

    pub fn behavior_mut<B: Behavior>(&mut self) -> Option<&mut B> {
        self.touch();
        self.slot_mut(TypeId::of::<B>())?.component.as_mut()?.as_behavior_mut::<B>()
    }

    /// Whether a component of `kind` is attached, including one currently
    /// running its own hook.
    pub fn has_kind(&self, kind: TypeId) -> bool {
        self.slot(kind).is_some()
    }

    pub fn has<T: 'static>(&self) -> bool {
        self.has_kind(TypeId::of::<T>())
    }

    pub fn component_count(&self) -> usize {
        self.slots.len()
    }

    /// Attaches `component`, replacing (and returning) any component of the
    /// same kind. A replacement keeps the original attach position.
    pub fn add_component(&mut self, component: impl Into<Component>) -> Option<Component> {
        let component = component.into();
        let kind = component.kind();
        self.touch();
        match self.slot_mut(kind) {
            Some(slot) => slot.component.replace(component),
            None => {
                self.slots.push(Slot { kind, component: Some(component) });
                None
            }
        }
    }

    /// Detaches the component of `kind`. Returns `None` if absent or lent out.
    pub fn remove_kind(&mut self, kind: TypeId) -> Option<Component> {
        let idx = self.slots.iter().position(|s| s.kind == kind)?;
        self.touch();
        self.slots.remove(idx).component
    }

    pub fn remove_component<T: ComponentType>(&mut self) -> Option<T> {
        self.remove_kind(TypeId::of::<T>()).and_then(T::from_component)
    }

    // ── convenience accessors ─────────────────────────────────────────────

    /// Authored size; zero without a [`ScaleComponent`].
    pub fn size(&self) -> Size {
        self.component::<ScaleComponent>().map_or(Size::zero(), |s| s.size())
    }

    /// Uniform scale; `1.0` without a [`ScaleComponent`].
    pub fn scale(&self) -> f32 {
        self.component::<ScaleComponent>().map_or(1.0, |s| s.scale())
    }

    /// Size in pixels after scaling.
    pub fn scaled_size(&self) -> Size {
        self.component::<ScaleComponent>().map_or(Size::zero(), |s| s.scaled_size())
    }

    /// Effective placement, if a [`PositionComponent`] is attached.
    pub fn position(&self) -> Option<AnchorSpec> {
        self.component::<PositionComponent>().map(|p| p.effective_spec())
    }
}

// ── UiTree ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UiTree {
    entities: SlotMap<EntityId, Entity>,
}

impl UiTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// A root entity with default [`ScaleComponent`] and [`PositionComponent`].
    pub fn spawn(&mut self) -> EntityId {
        let mut entity = Entity::new();
        entity.add_component(ScaleComponent::default());
        entity.add_component(PositionComponent::default());
        let id = self.entities.insert(entity);
        log::trace!("spawned {id:?}");
        id
    }

    /// A root entity with no components at all.
    pub fn spawn_empty(&mut self) -> EntityId {
        self.entities.insert(Entity::new())
    }

    pub fn spawn_child(&mut self, parent: EntityId) -> Result<EntityId, TreeError> {
        self.entity(parent)?;
        let id = self.spawn();
        self.add_child(parent, id)?;
        Ok(id)
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    fn entity(&self, id: EntityId) -> Result<&Entity, TreeError> {
        self.entities.get(id).ok_or(TreeError::Stale(id))
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, TreeError> {
        self.entities.get_mut(id).ok_or(TreeError::Stale(id))
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(id)?.parent
    }

    /// Children of `id`; empty for a stale id.
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.entities.get(id).map(|e| e.children()).unwrap_or_default()
    }

    pub fn is_ancestor(&self, ancestor: EntityId, of: EntityId) -> bool {
        let mut cur = self.parent(of);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    // ── structure ─────────────────────────────────────────────────────────

    /// Appends `child` to `parent`, moving it out of any previous parent.
    pub fn add_child(&mut self, parent: EntityId, child: EntityId) -> Result<(), TreeError> {
        self.entity(parent)?;
        let current = self.entity(child)?.parent;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }
        if current == Some(parent) {
            return Ok(());
        }
        if let Some(old) = current {
            self.unlink(old, child);
        }
        self.entity_mut(parent)?.children.push(child);
        self.entity_mut(child)?.parent = Some(parent);
        self.invalidate_subtree(child);
        log::trace!("attached {child:?} under {parent:?}");
        Ok(())
    }

    /// Detaches `child` from `parent`. The child survives as a root until
    /// destroyed or re-attached.
    pub fn remove_child(&mut self, parent: EntityId, child: EntityId) -> Result<(), TreeError> {
        self.entity(parent)?;
        if self.entity(child)?.parent != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.unlink(parent, child);
        self.entity_mut(child)?.parent = None;
        self.invalidate_subtree(child);
        log::trace!("detached {child:?} from {parent:?}");
        Ok(())
    }

    fn unlink(&mut self, parent: EntityId, child: EntityId) {
        if let Some(p) = self.entities.get_mut(parent) {
            p.children.retain(|&c| c != child);
        }
    }

    /// Removes `id` and all of its descendants.
    pub fn destroy(&mut self, id: EntityId) -> Result<(), TreeError> {
        let parent = self.entity(id)?.parent;
        if let Some(p) = parent {
            self.unlink(p, id);
        }
        let mut stack = vec![id];
        let mut removed = 0usize;
        while let Some(next) = stack.pop() {
            if let Some(entity) = self.entities.remove(next) {
                stack.extend(entity.children);
                removed += 1;
            }
        }
        log::trace!("destroyed {id:?} ({removed} entities)");
        Ok(())
    }

    // ── components ────────────────────────────────────────────────────────

    pub fn add_component(
        &mut self,
        id: EntityId,
        component: impl Into<Component>,
    ) -> Result<Option<Component>, TreeError> {
        let component = component.into();
        log::trace!("adding {} to {id:?}", component.name());
        let replaced = self.entity_mut(id)?.add_component(component);
        self.invalidate_subtree(id);
        Ok(replaced)
    }

    /// Detaches the component of `kind`, built-in or custom.
    pub fn remove_kind(&mut self, id: EntityId, kind: TypeId) -> Result<Option<Component>, TreeError> {
        let removed = self.entity_mut(id)?.remove_kind(kind);
        self.invalidate_subtree(id);
        if let Some(component) = &removed {
            log::trace!("removed {} from {id:?}", component.name());
        }
        Ok(removed)
    }

    pub fn remove_component<T: ComponentType>(&mut self, id: EntityId) -> Result<Option<T>, TreeError> {
        Ok(self.remove_kind(id, TypeId::of::<T>())?.and_then(T::from_component))
    }

    /// Detaches a custom [`Behavior`] of type `B`.
    pub fn remove_behavior<B: Behavior>(&mut self, id: EntityId) -> Result<Option<Component>, TreeError> {
        self.remove_kind(id, TypeId::of::<B>())
    }

    pub fn component<T: ComponentType>(&self, id: EntityId) -> Option<&T> {
        self.entities.get(id)?.component::<T>()
    }

    /// Mutable access to one component. Only the owner's own cache is
    /// affected; prefer [`edit`](Self::edit) when descendants depend on it.
    pub fn component_mut<T: ComponentType>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entities.get_mut(id)?.component_mut::<T>()
    }

    /// Applies `f` to a component and invalidates the owner's subtree.
    /// Returns `None` if the entity or the component is missing.
    pub fn edit<T: ComponentType, R>(&mut self, id: EntityId, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let out = f(self.component_mut::<T>(id)?);
        self.invalidate_subtree(id);
        Some(out)
    }

    // ── convenience accessors ─────────────────────────────────────────────

    pub fn is_visible(&self, id: EntityId) -> bool {
        self.entities.get(id).is_some_and(|e| e.visible)
    }

    pub fn set_visible(&mut self, id: EntityId, visible: bool) -> Result<(), TreeError> {
        self.entity_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn size(&self, id: EntityId) -> Size {
        self.entities.get(id).map_or(Size::zero(), |e| e.size())
    }

    pub fn scaled_size(&self, id: EntityId) -> Size {
        self.entities.get(id).map_or(Size::zero(), |e| e.scaled_size())
    }

    /// Sets the authored size. No-op (beyond the stale check) without a
    /// [`ScaleComponent`].
    pub fn set_size(&mut self, id: EntityId, size: Size) -> Result<(), TreeError> {
        let entity = self.entity(id)?;
        if entity.component::<ScaleComponent>().is_none_or(|s| s.size() == size) {
            return Ok(());
        }
        self.edit::<ScaleComponent, _>(id, |s| s.set_size(size));
        Ok(())
    }

    pub fn set_scale(&mut self, id: EntityId, scale: f32) -> Result<(), TreeError> {
        self.entity(id)?;
        self.edit::<ScaleComponent, _>(id, |s| s.set_scale(scale));
        Ok(())
    }

    pub fn position(&self, id: EntityId) -> Option<AnchorSpec> {
        self.entities.get(id)?.position()
    }

    pub fn set_local_position(&mut self, id: EntityId, pos: Point) -> Result<(), TreeError> {
        self.entity(id)?;
        self.edit::<PositionComponent, _>(id, |p| p.set_local_position(pos));
        Ok(())
    }

    /// Offset written by flow layout, added on top of the authored local
    /// position. Skips invalidation when unchanged.
    pub fn set_layout_offset(&mut self, id: EntityId, offset: Point) -> Result<(), TreeError> {
        let entity = self.entity(id)?;
        if entity.component::<PositionComponent>().is_none_or(|p| p.layout_offset() == offset) {
            return Ok(());
        }
        self.edit::<PositionComponent, _>(id, |p| p.set_layout_offset(offset));
        Ok(())
    }

    /// Sets the background region, attaching a [`BackgroundComponent`] if missing.
    pub fn set_background(&mut self, id: EntityId, region: TextureRegion) -> Result<(), TreeError> {
        let entity = self.entity_mut(id)?;
        match entity.component_mut::<BackgroundComponent>() {
            Some(bg) => bg.set_region(Some(region)),
            None => {
                entity.add_component(BackgroundComponent::new(region));
            }
        }
        Ok(())
    }

    // ── rectangles ────────────────────────────────────────────────────────

    /// Absolute rectangle of `id`, resolved through its ancestors.
    ///
    /// Without a [`PositionComponent`] the rect sits at the origin; without a
    /// [`ScaleComponent`] it is empty. Stale ids resolve to `Rect::default()`.
    pub fn rect(&mut self, id: EntityId) -> Rect {
        let spec = self.position(id);
        self.resolve_rect(id, spec)
    }

    /// Resolves `id` with an explicit spec instead of its attached one.
    pub(crate) fn resolve_rect(&mut self, id: EntityId, spec: Option<AnchorSpec>) -> Rect {
        let Some(parent) = self.entities.get(id).map(|e| e.parent) else {
            return Rect::default();
        };
        let parent_rect = match parent {
            Some(p) => {
                let spec = self.position(p);
                self.resolve_rect(p, spec)
            }
            None => Rect::default(),
        };
        let Some(entity) = self.entities.get_mut(id) else {
            return Rect::default();
        };
        let (size, scale) = (entity.size(), entity.scale());
        match spec {
            None => Rect::from_origin_size(Point::zero(), anchor::draw_size(size, scale)),
            Some(spec) => {
                let key = AnchorKey::new(entity.generation, size, scale, &spec, parent_rect);
                entity
                    .anchor
                    .get_or_resolve(key, || anchor::resolve(size, scale, &spec, parent_rect))
            }
        }
    }

    /// Drops cached rectangles of `id` and every descendant.
    pub fn invalidate_subtree(&mut self, id: EntityId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(entity) = self.entities.get_mut(next) {
                entity.touch();
                entity.anchor.invalidate();
                stack.extend_from_slice(&entity.children);
            }
        }
    }

    // ── traversal ─────────────────────────────────────────────────────────

    /// Runs update hooks of `id` in priority order, then updates its children.
    /// Invisible entities are skipped along with their subtree.
    pub fn update(&mut self, id: EntityId, dt: f32) {
        if !self.is_visible(id) {
            return;
        }
        for kind in self.hook_order(id) {
            let Some(mut component) = self.lend(id, kind) else {
                continue;
            };
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                component.update(&mut UpdateCx { tree: &mut *self, owner: id }, dt)
            }));
            let name = component.name();
            self.restore(id, kind, component);
            report("update", name, id, result);
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.update(child, dt);
        }
    }

    /// Same traversal as [`update`](Self::update), invoking render hooks.
    pub fn render(&mut self, id: EntityId, host: &mut dyn RenderHost) {
        if !self.is_visible(id) {
            return;
        }
        for kind in self.hook_order(id) {
            let Some(mut component) = self.lend(id, kind) else {
                continue;
            };
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                component.render(&mut RenderCx { tree: &mut *self, owner: id, host: &mut *host })
            }));
            let name = component.name();
            self.restore(id, kind, component);
            report("render", name, id, result);
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.render(child, host);
        }
    }

    /// Attached kinds sorted by ascending priority; ties keep attach order.
    fn hook_order(&self, id: EntityId) -> Vec<TypeId> {
        let Some(entity) = self.entities.get(id) else {
            return Vec::new();
        };
        let mut order: Vec<(i32, TypeId)> = entity
            .slots
            .iter()
            .filter_map(|s| s.component.as_ref().map(|c| (c.priority(), s.kind)))
            .collect();
        order.sort_by_key(|&(p, _)| p);
        order.into_iter().map(|(_, kind)| kind).collect()
    }

    fn lend(&mut self, id: EntityId, kind: TypeId) -> Option<Component> {
        self.entities.get_mut(id)?.slot_mut(kind)?.component.take()
    }

    /// Puts a lent component back. Dropped if its hook removed it, replaced
    /// it, or destroyed the owner.
    fn restore(&mut self, id: EntityId, kind: TypeId, component: Component) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        if let Some(slot) = entity.slots.iter_mut().find(|s| s.kind == kind && s.component.is_none()) {
            slot.component = Some(component);
        }
    }
}

/// Logs a failed or panicked hook. Neither stops the traversal.
fn report(hook: &str, name: &str, id: EntityId, result: std::thread::Result<anyhow::Result<()>>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::warn!("{hook} of {name} on {id:?} failed: {e:#}"),
        Err(payload) => log::warn!("{hook} of {name} on {id:?} panicked: {}", panic_message(&*payload)),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string payload"
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use lodestar_engine::scene::RecordingHost;

    use super::*;
    use crate::anchor::Anchor;

    type Log = Rc<RefCell<Vec<i32>>>;

    /// Records `N` on every hook call.
    struct Probe<const N: i32> {
        prio: i32,
        log: Log,
    }

    impl<const N: i32> Behavior for Probe<N> {
        fn update(&mut self, _cx: &mut UpdateCx<'_>, _dt: f32) -> anyhow::Result<()> {
            self.log.borrow_mut().push(N);
            Ok(())
        }

        fn render(&mut self, _cx: &mut RenderCx<'_>) -> anyhow::Result<()> {
            self.log.borrow_mut().push(-N);
            Ok(())
        }

        fn priority(&self) -> i32 {
            self.prio
        }
    }

    fn probe<const N: i32>(prio: i32, log: &Log) -> Component {
        Component::custom(Probe::<N> { prio, log: log.clone() })
    }

    struct Failing;

    impl Behavior for Failing {
        fn update(&mut self, _cx: &mut UpdateCx<'_>, _dt: f32) -> anyhow::Result<()> {
            anyhow::bail!("boom")
        }

        fn render(&mut self, _cx: &mut RenderCx<'_>) -> anyhow::Result<()> {
            anyhow::bail!("boom")
        }

        fn priority(&self) -> i32 {
            1
        }
    }

    fn taken(log: &Log) -> Vec<i32> {
        std::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn hooks_run_in_priority_order_and_resort_on_removal() {
        let log = Log::default();
        let mut tree = UiTree::new();
        let id = tree.spawn_empty();
        tree.add_component(id, probe::<50>(50, &log)).unwrap();
        tree.add_component(id, probe::<5>(5, &log)).unwrap();
        tree.add_component(id, probe::<10>(10, &log)).unwrap();
        tree.add_component(id, probe::<20>(20, &log)).unwrap();

        tree.update(id, 0.0);
        assert_eq!(taken(&log), vec![5, 10, 20, 50]);
        tree.render(id, &mut RecordingHost::default());
        assert_eq!(taken(&log), vec![-5, -10, -20, -50]);

        assert!(tree.remove_behavior::<Probe<5>>(id).unwrap().is_some());
        assert!(tree.remove_behavior::<Probe<5>>(id).unwrap().is_none());
        tree.update(id, 0.0);
        assert_eq!(taken(&log), vec![10, 20, 50]);
    }

    #[test]
    fn equal_priorities_keep_attach_order() {
        let log = Log::default();
        let mut tree = UiTree::new();
        let id = tree.spawn_empty();
        tree.add_component(id, probe::<3>(0, &log)).unwrap();
        tree.add_component(id, probe::<1>(0, &log)).unwrap();
        tree.add_component(id, probe::<2>(0, &log)).unwrap();
        tree.update(id, 0.0);
        assert_eq!(taken(&log), vec![3, 1, 2]);
    }

    #[test]
    fn one_component_per_kind() {
        let log = Log::default();
        let mut tree = UiTree::new();
        let id = tree.spawn_empty();
        assert!(tree.add_component(id, probe::<7>(0, &log)).unwrap().is_none());
        let replaced = tree.add_component(id, probe::<7>(99, &log)).unwrap();
        assert!(replaced.is_some());
        let e = tree.get(id).unwrap();
        assert_eq!(e.component_count(), 1);
        assert_eq!(e.behavior::<Probe<7>>().map(|p| p.prio), Some(99));
    }

    #[test]
    fn failing_hook_is_isolated() {
        let log = Log::default();
        let mut tree = UiTree::new();
        let parent = tree.spawn_empty();
        tree.add_component(parent, Component::custom(Failing)).unwrap();
        tree.add_component(parent, probe::<2>(2, &log)).unwrap();
        let child = tree.spawn_empty();
        tree.add_child(parent, child).unwrap();
        tree.add_component(child, probe::<9>(0, &log)).unwrap();

        tree.update(parent, 0.0);
        assert_eq!(taken(&log), vec![2, 9]);
        tree.render(parent, &mut RecordingHost::default());
        assert_eq!(taken(&log), vec![-2, -9]);
        // still attached after failing
        assert!(tree.get(parent).unwrap().behavior::<Failing>().is_some());
    }

    struct Panicking;

    impl Behavior for Panicking {
        fn update(&mut self, _cx: &mut UpdateCx<'_>, _dt: f32) -> anyhow::Result<()> {
            let empty: Vec<i32> = Vec::new();
            let i = empty.len() + 3;
            let _ = empty[i];
            Ok(())
        }

        fn render(&mut self, _cx: &mut RenderCx<'_>) -> anyhow::Result<()> {
            panic!("render blew up")
        }

        fn priority(&self) -> i32 {
            1
        }
    }

    #[test]
    fn panicking_hook_is_isolated_and_restored() {
        let log = Log::default();
        let mut tree = UiTree::new();
        let root = tree.spawn_empty();
        let a = tree.spawn_child(root).unwrap();
        let b = tree.spawn_child(root).unwrap();
        tree.add_component(a, Component::custom(Panicking)).unwrap();
        tree.add_component(a, probe::<5>(5, &log)).unwrap();
        tree.add_component(b, probe::<6>(0, &log)).unwrap();

        tree.update(root, 0.0);
        assert_eq!(taken(&log), vec![5, 6]);
        tree.render(root, &mut RecordingHost::default());
        assert_eq!(taken(&log), vec![-5, -6]);

        // the slot is refilled, so the next frame runs it again
        assert!(tree.get(a).unwrap().behavior::<Panicking>().is_some());
        tree.update(root, 0.0);
        assert_eq!(taken(&log), vec![5, 6]);
    }

    #[test]
    fn remove_kind_reaches_custom_behaviors() {
        let log = Log::default();
        let mut tree = UiTree::new();
        let id = tree.spawn();
        tree.add_component(id, probe::<4>(0, &log)).unwrap();
        let removed = tree.remove_kind(id, TypeId::of::<Probe<4>>()).unwrap();
        assert_eq!(removed.map(|c| c.priority()), Some(0));
        assert_eq!(tree.get(id).unwrap().component_count(), 2);
        assert!(tree.remove_kind(id, TypeId::of::<Probe<4>>()).unwrap().is_none());
    }

    #[test]
    fn invisible_subtree_is_skipped() {
        let log = Log::default();
        let mut tree = UiTree::new();
        let parent = tree.spawn_empty();
        let child = tree.spawn_empty();
        tree.add_child(parent, child).unwrap();
        tree.add_component(parent, probe::<1>(0, &log)).unwrap();
        tree.add_component(child, probe::<2>(0, &log)).unwrap();

        tree.set_visible(parent, false).unwrap();
        tree.update(parent, 0.0);
        tree.render(parent, &mut RecordingHost::default());
        assert!(taken(&log).is_empty());

        tree.set_visible(parent, true).unwrap();
        tree.set_visible(child, false).unwrap();
        tree.update(parent, 0.0);
        assert_eq!(taken(&log), vec![1]);
    }

    struct SelfRemoving;

    impl Behavior for SelfRemoving {
        fn update(&mut self, cx: &mut UpdateCx<'_>, _dt: f32) -> anyhow::Result<()> {
            let owner = cx.owner_mut().ok_or_else(|| anyhow::anyhow!("owner gone"))?;
            owner.remove_kind(TypeId::of::<SelfRemoving>());
            Ok(())
        }
    }

    #[test]
    fn component_removed_by_its_own_hook_stays_removed() {
        let mut tree = UiTree::new();
        let id = tree.spawn_empty();
        tree.add_component(id, Component::custom(SelfRemoving)).unwrap();
        tree.update(id, 0.0);
        assert_eq!(tree.get(id).unwrap().component_count(), 0);
    }

    #[test]
    fn degenerate_rects() {
        let mut tree = UiTree::new();
        let bare = tree.spawn_empty();
        assert_eq!(tree.rect(bare), Rect::default());

        let sized = tree.spawn_empty();
        tree.add_component(sized, ScaleComponent::new(Size::new(8, 4))).unwrap();
        let parent = tree.spawn();
        tree.set_local_position(parent, Point::new(50, 50)).unwrap();
        tree.add_child(parent, sized).unwrap();
        // no Position: origin, not relative to parent
        assert_eq!(tree.rect(sized), Rect::new(0, 0, 8, 4));
    }

    #[test]
    fn rect_is_cached_until_inputs_change() {
        let mut tree = UiTree::new();
        let id = tree.spawn();
        tree.set_size(id, Size::new(10, 10)).unwrap();
        let miss = tree.rect(id);
        let hit = tree.rect(id);
        let (hits, misses) = tree.get(id).unwrap().anchor_cache().stats();
        assert_eq!((hits, misses), (1, 1));
        assert_eq!(hit, miss);
        assert_eq!(hit, Rect::new(0, 0, 10, 10));

        tree.set_local_position(id, Point::new(3, 4)).unwrap();
        assert_eq!(tree.rect(id), Rect::new(3, 4, 10, 10));
    }

    #[test]
    fn parent_resize_reaches_descendants() {
        let mut tree = UiTree::new();
        let root = tree.spawn();
        tree.set_size(root, Size::new(100, 100)).unwrap();
        let mid = tree.spawn_child(root).unwrap();
        tree.set_size(mid, Size::new(50, 50)).unwrap();
        tree.edit::<PositionComponent, _>(mid, |p| p.set_alignment(Anchor::BottomRight, Anchor::BottomRight));
        let leaf = tree.spawn_child(mid).unwrap();
        tree.set_size(leaf, Size::new(4, 4)).unwrap();
        tree.edit::<PositionComponent, _>(leaf, |p| p.set_alignment(Anchor::Center, Anchor::Center));
        assert_eq!(tree.rect(leaf), Rect::new(73, 73, 4, 4));

        tree.set_size(root, Size::new(200, 120)).unwrap();
        assert_eq!(tree.rect(leaf), Rect::new(173, 93, 4, 4));

        // direct component access still caught by the key comparison
        if let Some(s) = tree.component_mut::<ScaleComponent>(root) {
            s.set_size(Size::new(60, 60));
        }
        assert_eq!(tree.rect(leaf), Rect::new(33, 33, 4, 4));
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = UiTree::new();
        let a = tree.spawn();
        let b = tree.spawn_child(a).unwrap();
        let c = tree.spawn_child(b).unwrap();
        assert_eq!(tree.add_child(c, a), Err(TreeError::Cycle { parent: c, child: a }));
        assert_eq!(tree.add_child(a, a), Err(TreeError::Cycle { parent: a, child: a }));
        assert!(tree.is_ancestor(a, c));
    }

    #[test]
    fn reparenting_moves_the_child() {
        let mut tree = UiTree::new();
        let p1 = tree.spawn();
        let p2 = tree.spawn();
        tree.set_local_position(p2, Point::new(30, 0)).unwrap();
        let child = tree.spawn_child(p1).unwrap();
        tree.set_size(child, Size::new(1, 1)).unwrap();
        assert_eq!(tree.rect(child).x, 0);

        tree.add_child(p2, child).unwrap();
        assert!(tree.children(p1).is_empty());
        assert_eq!(tree.children(p2), &[child]);
        assert_eq!(tree.parent(child), Some(p2));
        assert_eq!(tree.rect(child).x, 30);

        // adding again is a no-op
        tree.add_child(p2, child).unwrap();
        assert_eq!(tree.children(p2).len(), 1);
    }

    #[test]
    fn remove_child_checks_parentage() {
        let mut tree = UiTree::new();
        let p = tree.spawn();
        let other = tree.spawn();
        let child = tree.spawn_child(p).unwrap();
        assert_eq!(tree.remove_child(other, child), Err(TreeError::NotAChild { parent: other, child }));
        tree.remove_child(p, child).unwrap();
        assert_eq!(tree.parent(child), None);
        assert!(tree.contains(child));
    }

    #[test]
    fn destroy_removes_subtree() {
        let mut tree = UiTree::new();
        let root = tree.spawn();
        let a = tree.spawn_child(root).unwrap();
        let b = tree.spawn_child(a).unwrap();
        tree.destroy(a).unwrap();
        assert!(!tree.contains(a) && !tree.contains(b));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.add_child(root, b), Err(TreeError::Stale(b)));
        assert_eq!(tree.rect(b), Rect::default());
    }

    #[test]
    fn typed_component_access() {
        let mut tree = UiTree::new();
        let id = tree.spawn();
        assert!(tree.get(id).unwrap().has::<ScaleComponent>());
        let removed = tree.remove_component::<ScaleComponent>(id).unwrap();
        assert_eq!(removed, Some(ScaleComponent::default()));
        assert_eq!(tree.size(id), Size::zero());
        // set_size without a Scale is a no-op
        tree.set_size(id, Size::new(5, 5)).unwrap();
        assert_eq!(tree.size(id), Size::zero());
    }

    #[test]
    fn set_background_attaches_once() {
        let mut tree = UiTree::new();
        let id = tree.spawn();
        let region = crate::regions::widget_panel();
        tree.set_background(id, region).unwrap();
        tree.set_background(id, region.with_alpha(0.5)).unwrap();
        let bg = tree.component::<BackgroundComponent>(id).unwrap();
        assert_eq!(bg.region().map(|r| r.alpha()), Some(0.5));
        assert_eq!(tree.get(id).unwrap().component_count(), 3);
    }
}

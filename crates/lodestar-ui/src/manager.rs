use lodestar_engine::coords::Size;
use lodestar_engine::host::RenderHost;

use crate::progress::{ProgressSkin, TileProgressBar};
use crate::tree::{EntityId, TreeError, UiTree};

// ── UiConfig ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Root size until the first viewport poll.
    pub initial_root_size: Size,
    /// Resize the root to the host viewport every frame.
    pub track_viewport: bool,
    /// Smoothing speed handed to new progress bars, per second.
    pub progress_animation_speed: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            initial_root_size: Size::new(320, 240),
            track_viewport: true,
            progress_animation_speed: crate::progress::DEFAULT_SPEED,
        }
    }
}

impl UiConfig {
    pub fn initial_root_size(mut self, size: Size) -> Self {
        self.initial_root_size = size;
        self
    }

    pub fn track_viewport(mut self, on: bool) -> Self {
        self.track_viewport = on;
        self
    }

    pub fn progress_animation_speed(mut self, speed: f32) -> Self {
        self.progress_animation_speed = speed;
        self
    }
}

// ── UiManager ─────────────────────────────────────────────────────────────

/// Owns the tree and its root and drives one frame at a time.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiManager::new(UiConfig::default());
/// let hud = ui.tree_mut().spawn();
/// ui.attach(hud)?;
///
/// // once per host tick:
/// ui.frame(&mut host, clock.tick().dt);
/// ```
pub struct UiManager {
    tree: UiTree,
    root: EntityId,
    config: UiConfig,
}

impl UiManager {
    pub fn new(config: UiConfig) -> Self {
        let mut tree = UiTree::new();
        let root = tree.spawn();
        // Freshly spawned, cannot be stale.
        let _ = tree.set_size(root, config.initial_root_size);
        log::debug!(
            "ui root {root:?} at {}x{}",
            config.initial_root_size.width,
            config.initial_root_size.height
        );
        Self { tree, root, config }
    }

    #[inline]
    pub fn root(&self) -> EntityId {
        self.root
    }

    #[inline]
    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Makes `id` a child of the root.
    pub fn attach(&mut self, id: EntityId) -> Result<(), TreeError> {
        self.tree.add_child(self.root, id)
    }

    /// Builds a progress bar with the default skin and configured speed,
    /// attached to the root.
    pub fn progress_bar(&mut self, tiles: usize) -> Result<TileProgressBar, TreeError> {
        let bar = TileProgressBar::build(
            &mut self.tree,
            tiles,
            &ProgressSkin::default(),
            self.config.progress_animation_speed,
        )?;
        self.attach(bar.bar)?;
        Ok(bar)
    }

    /// Resizes the root to `viewport` if it differs.
    pub fn resize(&mut self, viewport: Size) {
        if self.tree.size(self.root) == viewport {
            return;
        }
        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        let _ = self.tree.set_size(self.root, viewport);
    }

    pub fn update(&mut self, dt: f32) {
        self.tree.update(self.root, dt);
    }

    pub fn render(&mut self, host: &mut dyn RenderHost) {
        self.tree.render(self.root, host);
    }

    /// One host tick: poll the viewport, update, render.
    pub fn frame(&mut self, host: &mut dyn RenderHost, dt: f32) {
        if self.config.track_viewport {
            self.resize(host.viewport_size());
        }
        self.update(dt);
        self.render(host);
    }
}

impl Default for UiManager {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

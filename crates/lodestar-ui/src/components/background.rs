use lodestar_engine::coords::Rect;
use lodestar_engine::host::{Quad, RenderHost, with_scissor, with_tint};
use lodestar_engine::paint::Color;

use crate::clip::ContentClip;
use crate::component::RenderCx;
use crate::nine_slice::{self, NineSlicePolicy};
use crate::texture::TextureRegion;
use crate::tree::{EntityId, TreeError, UiTree};

/// How a region fills its owner's rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DrawMode {
    #[default]
    Stretch,
    /// Repeats the region; partial tiles at the right/bottom edge sample a
    /// sub-rectangle instead of squashing.
    Tile,
    /// Source size, centered.
    Center,
    /// Nine-slice; plain regions fall back to [`DrawMode::Stretch`].
    NineSlice,
}

/// Paints a texture region behind the owner's content.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundComponent {
    region: Option<TextureRegion>,
    mode: DrawMode,
    tint: Color,
    policy: NineSlicePolicy,
    clip: Option<ContentClip>,
}

impl Default for BackgroundComponent {
    fn default() -> Self {
        Self {
            region: None,
            mode: DrawMode::Stretch,
            tint: Color::WHITE,
            policy: NineSlicePolicy::default(),
            clip: None,
        }
    }
}

impl BackgroundComponent {
    pub fn new(region: TextureRegion) -> Self {
        Self { region: Some(region), ..Self::default() }
    }

    /// Nine-sliced background with the default policy.
    pub fn nine_slice(region: TextureRegion) -> Self {
        Self::new(region).with_mode(DrawMode::NineSlice)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: NineSlicePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_tint(mut self, rgb: u32) -> Self {
        self.set_tint(rgb);
        self
    }

    #[inline]
    pub fn region(&self) -> Option<&TextureRegion> {
        self.region.as_ref()
    }

    pub fn set_region(&mut self, region: Option<TextureRegion>) {
        self.region = region;
    }

    #[inline]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    pub fn set_policy(&mut self, policy: NineSlicePolicy) {
        self.policy = policy;
    }

    /// Packed `0xRRGGBB` tint.
    pub fn tint(&self) -> u32 {
        self.tint.to_rgb_hex()
    }

    pub fn set_tint(&mut self, rgb: u32) {
        self.tint = Color::from_rgb_hex(rgb);
    }

    #[inline]
    pub fn clip(&self) -> Option<ContentClip> {
        self.clip
    }

    /// `None` draws unclipped.
    pub fn set_clip(&mut self, clip: Option<ContentClip>) {
        self.clip = clip;
    }

    pub(crate) fn render(&mut self, cx: &mut RenderCx<'_>) -> anyhow::Result<()> {
        let Some(region) = self.region else {
            return Ok(());
        };
        if region.atlas_size().is_empty() {
            anyhow::bail!("region in atlas {:?} has an empty atlas size", region.atlas());
        }
        let rect = cx.tree.rect(cx.owner);
        if rect.is_empty() {
            return Ok(());
        }

        let tint = self.tint.with_alpha(region.alpha());
        let host: &mut dyn RenderHost = &mut *cx.host;
        let visible = match self.clip {
            Some(clip) => clip.apply(rect),
            None => rect,
        };
        if visible.is_empty() {
            return Ok(());
        }
        with_tint(host, tint, |host| {
            if visible == rect {
                self.draw(host, rect, &region);
            } else {
                with_scissor(host, visible, |host| self.draw(host, rect, &region));
            }
        });
        Ok(())
    }

    fn draw(&self, host: &mut dyn RenderHost, rect: Rect, region: &TextureRegion) {
        let quad = |dst: Rect, src: Rect| Quad {
            atlas: region.atlas(),
            dst,
            src,
            atlas_size: region.atlas_size(),
        };
        let src = region.src_rect();

        match self.mode {
            DrawMode::NineSlice if region.has_insets() => {
                let slices = nine_slice::slice(region.insets(), region.size(), rect.size(), self.policy);
                for patch in slices.patches() {
                    let p = patch.offset(rect.origin(), region.uv());
                    host.draw_textured_quad(quad(p.dst, p.src));
                }
            }
            DrawMode::Stretch | DrawMode::NineSlice => host.draw_textured_quad(quad(rect, src)),
            DrawMode::Center => {
                let dst = Rect::new(
                    rect.x + (rect.width - src.width) / 2,
                    rect.y + (rect.height - src.height) / 2,
                    src.width,
                    src.height,
                );
                host.draw_textured_quad(quad(dst, src));
            }
            DrawMode::Tile => {
                if src.is_empty() {
                    return;
                }
                let mut y = rect.y;
                while y < rect.bottom() {
                    let h = src.height.min(rect.bottom() - y);
                    let mut x = rect.x;
                    while x < rect.right() {
                        let w = src.width.min(rect.right() - x);
                        host.draw_textured_quad(quad(Rect::new(x, y, w, h), Rect::new(src.x, src.y, w, h)));
                        x += src.width;
                    }
                    y += src.height;
                }
            }
        }
    }
}

/// Sizes `id` to the source size of its background region.
pub fn fit_to_region(tree: &mut UiTree, id: EntityId) -> Result<(), TreeError> {
    let size = tree
        .component::<BackgroundComponent>(id)
        .and_then(|bg| bg.region())
        .map(|r| r.size());
    match size {
        Some(size) => tree.set_size(id, size),
        None => {
            tree.get(id).ok_or(TreeError::Stale(id))?;
            Ok(())
        }
    }
}

//! Headless HUD demo: builds a small interface, drives it with a fixed clock
//! against the recording host and logs what would reach the screen.
//!
//! `RUST_LOG=debug cargo run -p lodestar-studio` shows per-frame detail.

use std::time::Duration;

use lodestar_engine::logging::{LoggingConfig, init_logging};
use lodestar_engine::scene::{DrawCmd, DrawList, RecordingHost};
use lodestar_engine::time::FrameClock;
use lodestar_ui::prelude::*;

const FRAMES: u64 = 90;

/// Sweeps a progress bar back and forth.
struct Charge {
    bar: TileProgressBar,
    elapsed: f32,
}

impl Behavior for Charge {
    fn update(&mut self, cx: &mut UpdateCx<'_>, dt: f32) -> anyhow::Result<()> {
        self.elapsed += dt;
        let target = if (self.elapsed / 0.5) as u32 % 2 == 0 { 0.9 } else { 0.2 };
        self.bar.set_progress(cx.tree, target);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "charge"
    }
}

fn build_hud(ui: &mut UiManager) -> anyhow::Result<(EntityId, TileProgressBar)> {
    let bar = ui.progress_bar(8)?;
    bar.set_fill_color(ui.tree_mut(), 0x3FD2FF);

    let tree = ui.tree_mut();
    let panel = tree.spawn();
    tree.add_component(
        panel,
        PanelComponent::vertical().spacing(3).padding_all(5).cross_align(CrossAlign::Center).auto_size(),
    )?;
    tree.add_component(panel, BackgroundComponent::nine_slice(regions::widget_panel()))?;
    tree.edit::<PositionComponent, _>(panel, |p| {
        p.set_alignment(Anchor::BottomCenter, Anchor::BottomCenter);
        p.set_margin_bottom(Margin::Px(10));
    });

    let title = tree.spawn_child(panel)?;
    tree.add_component(title, LabelComponent::new("SHIELD").color(0xFFD700))?;

    tree.add_child(panel, bar.bar)?;
    tree.add_component(panel, Component::custom(Charge { bar, elapsed: 0.0 }))?;

    let hint = tree.spawn_child(panel)?;
    tree.add_component(hint, LabelComponent::new("hold [E] to recharge").color(0xA0A0A0).shadow(false))?;

    ui.attach(panel)?;
    Ok((panel, bar))
}

fn summarize(list: &DrawList) -> (usize, usize, usize) {
    let mut quads = 0;
    let mut texts = 0;
    let mut scissors = 0;
    for item in list.items() {
        match item.cmd {
            DrawCmd::Quad(_) => quads += 1,
            DrawCmd::Text(_) => texts += 1,
            DrawCmd::PushScissor(_) => scissors += 1,
            _ => {}
        }
    }
    (quads, texts, scissors)
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          LODESTAR STUDIO v0.1          ║");
    println!("  ║   headless HUD  ·  recording host      ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let mut ui = UiManager::new(UiConfig::default());
    let (panel, bar) = build_hud(&mut ui)?;

    let mut host = RecordingHost::new(Size::new(427, 240));
    let mut clock = FrameClock::fixed(Duration::from_micros(16_667));

    for _ in 0..FRAMES {
        let time = clock.tick();
        if time.frame_index == 45 {
            // simulated window resize
            host.viewport = Size::new(320, 180);
        }
        host.begin_frame();
        ui.frame(&mut host, time.dt);

        let (quads, texts, scissors) = summarize(&host.draw_list);
        log::debug!(
            "frame {:>3}: {quads} quads, {texts} texts, {scissors} scissors, shield {:.3}",
            time.frame_index,
            bar.displayed(ui.tree()).unwrap_or(0.0),
        );
    }

    let rect = ui.tree_mut().rect(panel);
    log::info!(
        "hud panel at ({}, {}) {}x{} after {FRAMES} frames",
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );
    for text in host.draw_list.texts() {
        log::info!("  text {:?} at ({}, {})", text.text, text.origin.x, text.origin.y);
    }
    Ok(())
}

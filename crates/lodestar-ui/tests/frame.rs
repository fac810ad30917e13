use lodestar_engine::scene::{DrawCmd, RecordingHost};
use lodestar_ui::prelude::*;

fn hud_panel(ui: &mut UiManager) -> EntityId {
    let tree = ui.tree_mut();
    let panel = tree.spawn();
    tree.set_size(panel, Size::new(100, 40)).unwrap();
    tree.add_component(panel, BackgroundComponent::nine_slice(regions::widget_panel())).unwrap();
    tree.edit::<PositionComponent, _>(panel, |p| {
        p.set_alignment(Anchor::BottomCenter, Anchor::BottomCenter);
        p.set_margin_bottom(Margin::Px(10));
    });
    ui.attach(panel).unwrap();
    panel
}

#[test]
fn bottom_centered_panel_resolves_and_paints() {
    let mut ui = UiManager::default();
    let panel = hud_panel(&mut ui);
    let mut host = RecordingHost::new(Size::new(320, 240));

    ui.frame(&mut host, 1.0 / 60.0);

    assert_eq!(ui.tree_mut().rect(panel), Rect::new(110, 190, 100, 40));
    let quads: Vec<_> = host.draw_list.quads().map(|(q, _)| *q).collect();
    assert_eq!(quads.len(), 9);
    // top-left corner of the 16x16 / 4px sheet panel scaled onto 100x40
    assert_eq!(quads[0].dst.origin(), Point::new(110, 190));
    assert_eq!(quads[0].atlas, regions::WIDGET_SHEET);
    let covered: i64 = quads.iter().map(|q| q.dst.size().area()).sum();
    assert_eq!(covered, 100 * 40);
}

#[test]
fn labels_stack_inside_an_auto_sized_panel() {
    let mut ui = UiManager::default();
    let tree = ui.tree_mut();
    let list = tree.spawn();
    tree.add_component(list, PanelComponent::vertical().spacing(2).padding_all(3).auto_size()).unwrap();
    for text in ["Score", "Lives"] {
        let label = tree.spawn_child(list).unwrap();
        tree.add_component(label, LabelComponent::new(text)).unwrap();
    }
    ui.attach(list).unwrap();

    let mut host = RecordingHost::default();
    // first frame measures, second lays out with measured sizes
    ui.frame(&mut host, 0.0);
    host.begin_frame();
    ui.frame(&mut host, 0.0);

    let origins: Vec<Point> = host.draw_list.texts().map(|t| t.origin).collect();
    // label 5 chars * 6 + 4 wide, 9 + 4 tall; padding 3, spacing 2
    assert_eq!(origins, vec![Point::new(5, 5), Point::new(5, 20)]);
    assert_eq!(ui.tree().size(list), Size::new(40, 34));
}

#[test]
fn progress_bar_fills_over_several_frames() {
    let mut ui = UiManager::default();
    let bar = ui.progress_bar(5).unwrap();
    bar.set_progress(ui.tree_mut(), 1.0);

    let mut host = RecordingHost::default();
    let mut last = 0.0;
    let mut last_quads = 0;
    for _ in 0..30 {
        host.begin_frame();
        ui.frame(&mut host, 1.0 / 60.0);
        let shown = bar.displayed(ui.tree()).unwrap();
        assert!(shown > last && shown <= 1.0);
        last = shown;

        let quads = host.draw_list.quads().count();
        assert!(quads >= last_quads);
        last_quads = quads;
    }

    // every border tile plus the visible fill tiles; partial tiles are scissored
    let border_tiles = 7;
    assert!(last_quads > border_tiles);
    let scissors = host
        .draw_list
        .items()
        .iter()
        .filter(|i| matches!(i.cmd, DrawCmd::PushScissor(_)))
        .count();
    assert!(scissors <= 1);
    assert_eq!(host.draw_list.clip_depth(), 0);
}

#[test]
fn hidden_branch_draws_nothing() {
    let mut ui = UiManager::default();
    let panel = hud_panel(&mut ui);
    ui.tree_mut().set_visible(panel, false).unwrap();
    let mut host = RecordingHost::default();
    ui.frame(&mut host, 0.016);
    assert!(host.draw_list.is_empty());
}

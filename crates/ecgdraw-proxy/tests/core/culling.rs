use chrono::Utc;
use ecgdraw_core::{EcgRecord, Lead, Rectangle, Signal};
use ecgdraw_proxy::{ChangeCause, DrawingProxy, RenderMode, WindowRetention};
use ecgdraw_settings::ProxyConfig;
use proptest::prelude::*;

fn record(samples: usize) -> EcgRecord {
    EcgRecord::new("r", Utc::now()).with_signal(Signal::new(
        500.0,
        vec![Lead::II],
        vec![vec![0.0; samples]],
    ))
}

/// Proxy whose window is exactly 100 columns wide (scale 1).
fn unit_proxy() -> DrawingProxy {
    let mut config = ProxyConfig::default();
    config.layout.px_per_mm = 20.0;
    config.layout.paper_speed_mm_s = 25.0;
    let mut proxy = DrawingProxy::new(config);
    proxy.init(Rectangle::new(0.0, 0.0, 100.0, 100.0));
    proxy
}

#[test]
fn test_unit_proxy_scale() {
    let proxy = unit_proxy();
    let state = proxy.state().expect("state");
    assert_eq!(state.scale, 1.0);
    assert_eq!(state.min_px(), 0.0);
    assert_eq!(state.max_px(), 100.0);
}

#[test]
fn test_cull_boundaries() {
    let mut proxy = unit_proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    // Records laid out as [0,49] [50,149] [150,249] [250,349] [350,350].
    let records = [record(50), record(100), record(100), record(100), record(1)];
    proxy.build_signal(&records, &client);

    // Window [100, 200]: straddles record 1 and 2 boundaries.
    proxy.scroll(100.0);
    let visible = proxy
        .collect_changes(ChangeCause::Scroll, None)
        .expect("initialized");
    let indices: Vec<_> = visible.objects.iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![Some(1), Some(2)]);

    // Window [149, 249]: touches record 1 at its last column, contains 2.
    proxy.scroll(149.0);
    let visible = proxy.collect_changes(ChangeCause::Scroll, None).expect("initialized");
    let indices: Vec<_> = visible.objects.iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![Some(1), Some(2)]);

    // Window [250, 350]: touches record 3 at its first column and the single
    // column record at the window end.
    proxy.scroll(250.0);
    let visible = proxy.collect_changes(ChangeCause::Scroll, None).expect("initialized");
    let indices: Vec<_> = visible.objects.iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![Some(3), Some(4)]);

    // Window [351, 451]: everything is behind.
    proxy.scroll(351.0);
    let visible = proxy.collect_changes(ChangeCause::Scroll, None).expect("initialized");
    assert!(visible.objects.is_empty());
}

#[test]
fn test_change_event_carries_snapshot() {
    let mut proxy = unit_proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    proxy.build_signal(&[record(10)], &client);
    proxy.build_floating_objects(&client);
    proxy.scroll(-20.0);

    let event = proxy
        .collect_changes(ChangeCause::Scroll, None)
        .expect("initialized");
    assert_eq!(event.sender, ChangeCause::Scroll);
    assert_eq!(event.state.scroll, 20.0);
    assert_eq!(event.objects.len(), 1);
    assert_eq!(event.overlay.len(), 1);
    assert!(event.clients.is_empty());
}

#[test]
fn test_scroll_round_trips_delta() {
    let mut proxy = unit_proxy();
    for delta in [0.0, 250.0, -75.5] {
        proxy.scroll(delta);
        assert_eq!(proxy.state().map(|s| s.scroll), Some(-delta));
    }
}

#[test]
fn test_gc_keeps_margin_around_window() {
    let mut config = ProxyConfig::default();
    config.layout.px_per_mm = 20.0;
    config.retention.margin_px = 100.0;
    let mut proxy = DrawingProxy::new(config);
    proxy.init(Rectangle::new(0.0, 0.0, 100.0, 100.0));
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});

    let records: Vec<_> = (0..10).map(|_| record(100)).collect();
    proxy.build_signal(&records, &client);
    proxy.scroll(500.0);

    // Window [500, 600] widened to [400, 700].
    assert_eq!(proxy.gc(), 6);
    let kept: Vec<_> = proxy.objects().iter().map(|o| o.index).collect();
    assert_eq!(kept, vec![Some(4), Some(5), Some(6), Some(7)]);

    assert_eq!(proxy.gc_with(&WindowRetention::new(0.0)), 2);
}

proptest! {
    #[test]
    fn prop_cull_matches_overlap_rule(
        counts in prop::collection::vec(1usize..200, 1..20),
        delta in -500.0f64..3000.0,
    ) {
        let mut proxy = unit_proxy();
        let client = proxy.attach_client(RenderMode::Canvas, |_| {});
        let records: Vec<_> = counts.iter().map(|c| record(*c)).collect();
        proxy.build_signal(&records, &client);
        proxy.scroll(delta);

        let state = proxy.state().cloned().expect("state");
        let (min_px, max_px) = (state.min_px(), state.max_px());
        let event = proxy.collect_changes(ChangeCause::Scroll, None).expect("initialized");

        let expected: Vec<_> = proxy
            .objects()
            .iter()
            .filter(|o| o.container.max_ox() >= min_px && o.container.min_ox() <= max_px)
            .map(|o| o.index)
            .collect();
        let actual: Vec<_> = event.objects.iter().map(|o| o.index).collect();
        prop_assert_eq!(actual, expected);
    }
}

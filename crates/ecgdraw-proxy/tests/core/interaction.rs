use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use ecgdraw_core::{Annotation, EcgRecord, Lead, PrimitiveState, Rectangle, Signal};
use ecgdraw_proxy::{DragEvent, DrawingGeometry, DrawingProxy, PointerEvent, RenderMode};
use ecgdraw_settings::ProxyConfig;

fn record(samples: usize) -> EcgRecord {
    let channels = Lead::STANDARD
        .iter()
        .enumerate()
        .map(|(lead, _)| (0..samples).map(|i| (i + lead * 1000) as f64).collect())
        .collect();
    EcgRecord::new("r", Utc::now()).with_signal(Signal::new(
        500.0,
        Lead::STANDARD.to_vec(),
        channels,
    ))
}

/// One column per pixel, 12 cells of 50 px.
fn unit_proxy() -> DrawingProxy {
    let mut config = ProxyConfig::default();
    config.layout.px_per_mm = 20.0;
    let mut proxy = DrawingProxy::new(config);
    proxy.init(Rectangle::new(100.0, 50.0, 400.0, 600.0));
    proxy
}

#[test]
fn test_crosshair_tracks_every_cell() {
    let mut proxy = unit_proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    proxy.build_signal(&[record(2000)], &client);
    proxy.build_floating_objects(&client);

    proxy.scroll(300.0);
    proxy.perform_mouse_move(PointerEvent::new(150.0, 200.0));

    // Viewport x 50 with scroll -300 is world column 350.
    match &proxy.overlay()[0].geometry {
        DrawingGeometry::Object { lines, peaks } => {
            assert_eq!(lines[0].a.left, 50.0);
            assert_eq!(lines[1].a.top, 200.0);
            assert_eq!(peaks.len(), 12);
            for peak in peaks {
                let expected = 350.0 + peak.cell_index as f64 * 1000.0;
                assert_eq!(peak.label.position.top, expected);
                assert_eq!(peak.line.a.left, 50.0);
            }
        }
        other => panic!("unexpected geometry {:?}", other),
    }
}

#[test]
fn test_scroll_refreshes_crosshair_under_pointer() {
    let mut proxy = unit_proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    proxy.build_signal(&[record(2000)], &client);
    proxy.build_floating_objects(&client);

    proxy.perform_mouse_move(PointerEvent::new(110.0, 100.0));
    proxy.scroll(40.0);

    match &proxy.overlay()[0].geometry {
        DrawingGeometry::Object { peaks, .. } => assert_eq!(peaks[0].label.position.top, 50.0),
        other => panic!("unexpected geometry {:?}", other),
    }
}

#[test]
fn test_click_outside_annotation_clears_selection() {
    let mut proxy = unit_proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    let records = [record(500).with_annotations(vec![Annotation::new(10, 30, "N")])];
    proxy.build_annotations(&records, &client);

    proxy.perform_click(PointerEvent::new(120.0, 60.0));
    assert_eq!(proxy.objects()[0].state(), PrimitiveState::Selected);

    proxy.perform_click(PointerEvent::new(300.0, 60.0));
    assert_eq!(proxy.objects()[0].state(), PrimitiveState::Default);
}

#[test]
fn test_hidden_objects_ignore_clicks() {
    let mut proxy = unit_proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    proxy.build_measure(0.0, 100.0, &client);
    let mut hidden = proxy.objects()[0].clone();
    hidden.set_state(PrimitiveState::Hidden);
    assert!(!hidden.is_selectable());

    proxy.perform_double_click(PointerEvent::new(150.0, 60.0));
    assert_eq!(proxy.objects()[0].state(), PrimitiveState::Activated);
}

#[test]
fn test_drag_pans_opposite_to_movement() {
    let mut proxy = unit_proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    proxy.build_signal(&[record(2000)], &client);

    proxy.perform_drag(DragEvent::new(300.0, 100.0, -150.0, 0.0));
    assert_eq!(proxy.state().map(|s| s.min_px()), Some(150.0));

    proxy.perform_drag(DragEvent::new(300.0, 100.0, 50.0, 0.0));
    assert_eq!(proxy.state().map(|s| s.min_px()), Some(100.0));

    proxy.perform_drag(DragEvent::new(300.0, 100.0, -5000.0, 0.0));
    assert_eq!(proxy.state().map(|s| s.max_px()), Some(2000.0));
}

#[test]
fn test_drag_with_short_content_stays_put() {
    let mut proxy = unit_proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    proxy.build_signal(&[record(100)], &client);

    proxy.perform_drag(DragEvent::new(300.0, 100.0, -150.0, 0.0));
    assert_eq!(proxy.state().map(|s| s.min_px()), Some(0.0));
}

fn counted(proxy: &mut DrawingProxy) -> (ecgdraw_proxy::DrawingClient, Arc<AtomicUsize>) {
    let events = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&events);
    let client = proxy.attach_client(RenderMode::Canvas, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (client, events)
}

const NON_FINITE: [f64; 3] = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];

#[test]
fn test_non_finite_pointer_leaves_crosshair_alone() {
    let mut proxy = unit_proxy();
    let (client, events) = counted(&mut proxy);
    proxy.build_signal(&[record(2000)], &client);
    proxy.build_floating_objects(&client);
    proxy.perform_mouse_move(PointerEvent::new(150.0, 200.0));
    let placed = proxy.overlay().to_vec();
    let emitted = events.load(Ordering::SeqCst);

    for bad in NON_FINITE {
        proxy.perform_mouse_move(PointerEvent::new(bad, 200.0));
        proxy.perform_mouse_move(PointerEvent::new(150.0, bad));
    }
    assert_eq!(proxy.overlay(), placed.as_slice());
    assert_eq!(events.load(Ordering::SeqCst), emitted);

    // Scrolling re-places the crosshair from the last finite pointer.
    proxy.scroll(300.0);
    match &proxy.overlay()[0].geometry {
        DrawingGeometry::Object { lines, peaks } => {
            assert_eq!(lines[0].a.left, 50.0);
            assert_eq!(peaks[0].label.position.top, 350.0);
        }
        other => panic!("unexpected geometry {:?}", other),
    }
}

#[test]
fn test_non_finite_clicks_select_nothing() {
    let mut proxy = unit_proxy();
    let (client, events) = counted(&mut proxy);
    let records = [record(2000).with_annotations(vec![
        Annotation::new(0, 10, "N"),
        Annotation::new(1500, 1600, "V"),
    ])];
    proxy.build_annotations(&records, &client);

    for bad in NON_FINITE {
        proxy.perform_click(PointerEvent::new(bad, bad));
        proxy.perform_click(PointerEvent::new(bad, 60.0));
        proxy.perform_double_click(PointerEvent::new(120.0, bad));
    }
    assert!(proxy
        .objects()
        .iter()
        .all(|o| o.state() == PrimitiveState::Default));
    assert_eq!(events.load(Ordering::SeqCst), 0);
}

#[test]
fn test_non_finite_drag_keeps_scroll() {
    let mut proxy = unit_proxy();
    let (client, events) = counted(&mut proxy);
    proxy.build_signal(&[record(2000)], &client);
    proxy.perform_drag(DragEvent::new(300.0, 100.0, -150.0, 0.0));
    let emitted = events.load(Ordering::SeqCst);

    for bad in NON_FINITE {
        proxy.perform_drag(DragEvent::new(10.0, 10.0, bad, 0.0));
        proxy.perform_drag(DragEvent::new(10.0, 10.0, -5.0, bad));
        proxy.perform_drag(DragEvent::new(bad, 10.0, -5.0, 0.0));
    }
    assert_eq!(proxy.state().map(|s| s.min_px()), Some(150.0));
    assert_eq!(events.load(Ordering::SeqCst), emitted);

    let visible = proxy
        .collect_changes(ecgdraw_proxy::ChangeCause::Drag, None)
        .expect("initialized");
    assert_eq!(visible.objects.len(), 1);
}

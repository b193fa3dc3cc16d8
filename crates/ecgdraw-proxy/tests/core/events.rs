use std::sync::{Arc, Mutex};

use chrono::Utc;
use ecgdraw_core::{EcgRecord, Lead, Rectangle, Signal};
use ecgdraw_proxy::{ChangeCause, DrawingProxy, EventFilter, PointerEvent, RenderMode};
use ecgdraw_settings::ProxyConfig;

fn proxy() -> DrawingProxy {
    let mut proxy = DrawingProxy::default();
    proxy.init(Rectangle::new(0.0, 0.0, 600.0, 400.0));
    proxy
}

#[test]
fn test_each_interaction_emits_once() {
    let mut proxy = proxy();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    proxy.attach_client(RenderMode::Canvas, move |event| {
        sink.lock().expect("lock").push(event.sender);
    });

    proxy.scroll(10.0);
    proxy.scroll(20.0);
    proxy.perform_mouse_move(PointerEvent::new(50.0, 50.0));
    proxy.perform_click(PointerEvent::new(50.0, 50.0));
    proxy.perform_double_click(PointerEvent::new(50.0, 50.0));

    let seen = seen.lock().expect("lock");
    assert_eq!(
        *seen,
        vec![
            ChangeCause::Scroll,
            ChangeCause::Scroll,
            ChangeCause::MouseMove,
            ChangeCause::Click,
            ChangeCause::DoubleClick,
        ]
    );
}

#[test]
fn test_subscribers_run_in_registration_order() {
    let mut proxy = proxy();
    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["canvas", "svg", "mix"] {
        let order = Arc::clone(&order);
        proxy.attach_client(RenderMode::Canvas, move |_| {
            order.lock().expect("lock").push(name);
        });
    }

    proxy.scroll(0.0);
    assert_eq!(*order.lock().expect("lock"), vec!["canvas", "svg", "mix"]);
}

#[test]
fn test_failing_subscriber_does_not_block_others() {
    let mut proxy = proxy();
    let reached = Arc::new(Mutex::new(0));

    proxy.attach_client(RenderMode::Canvas, |_| panic!("renderer crashed"));
    let counter = Arc::clone(&reached);
    proxy.attach_client(RenderMode::Svg, move |_| {
        *counter.lock().expect("lock") += 1;
    });

    proxy.scroll(5.0);
    proxy.scroll(6.0);
    assert_eq!(*reached.lock().expect("lock"), 2);
}

#[test]
fn test_filtered_observer_sees_only_its_causes() {
    let mut proxy = proxy();
    let drags = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&drags);
    proxy.subscribe(EventFilter::Causes(vec![ChangeCause::Drag]), move |_| {
        *counter.lock().expect("lock") += 1;
    });

    proxy.scroll(5.0);
    proxy.perform_drag(ecgdraw_proxy::DragEvent::new(10.0, 10.0, -1.0, 0.0));
    assert_eq!(*drags.lock().expect("lock"), 1);
}

#[test]
fn test_history_records_when_enabled() {
    let mut config = ProxyConfig::default();
    config.events.enable_history = true;
    config.events.history_size = 2;
    let mut proxy = DrawingProxy::new(config);
    proxy.init(Rectangle::new(0.0, 0.0, 600.0, 400.0));
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    proxy.build_signal(
        &[EcgRecord::new("r", Utc::now()).with_signal(Signal::new(
            500.0,
            vec![Lead::I],
            vec![vec![0.0; 10]],
        ))],
        &client,
    );

    for delta in [1.0, 2.0, 3.0] {
        proxy.scroll(delta);
    }
    let history = proxy.bus().history(None);
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].state.scroll, -3.0);
}

#[tokio::test]
async fn test_async_receiver_gets_changes() {
    let mut proxy = proxy();
    let mut receiver = proxy.bus().receiver();
    proxy.scroll(42.0);

    let event = receiver.recv().await.expect("event");
    assert_eq!(event.sender, ChangeCause::Scroll);
    assert_eq!(event.state.scroll, -42.0);
}

use chrono::Utc;
use ecgdraw_core::{EcgRecord, Lead, Rectangle, Signal};
use ecgdraw_proxy::{DrawingGeometry, DrawingObjectType, DrawingProxy, RenderMode};

fn twelve_lead(id: &str, samples: usize) -> EcgRecord {
    let channels = Lead::STANDARD
        .iter()
        .enumerate()
        .map(|(lead, _)| {
            (0..samples)
                .map(|i| ((i as f64) * 0.05 + lead as f64).sin() * 800.0)
                .collect()
        })
        .collect();
    EcgRecord::new(id, Utc::now()).with_signal(Signal::new(
        500.0,
        Lead::STANDARD.to_vec(),
        channels,
    ))
}

fn proxy() -> DrawingProxy {
    let mut proxy = DrawingProxy::default();
    proxy.init(Rectangle::new(0.0, 0.0, 1200.0, 800.0));
    proxy
}

#[test]
fn test_twelve_lead_record_builds_one_object() {
    let mut proxy = proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});

    assert_eq!(proxy.build_signal(&[twelve_lead("ecg", 1000)], &client), 1);
    assert_eq!(proxy.len(), 1);

    let object = &proxy.objects()[0];
    assert_eq!(object.object_type(), DrawingObjectType::Signal);
    assert_eq!(object.container.left, 0.0);
    assert_eq!(object.container.width, 999.0);
    match &object.geometry {
        DrawingGeometry::Signal { traces } => {
            assert_eq!(traces.len(), 12);
            assert!(traces.iter().all(|t| t.polyline.points.len() == 1000));
        }
        other => panic!("unexpected geometry {:?}", other),
    }
}

#[test]
fn test_records_lay_out_contiguously() {
    let mut proxy = proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    let counts = [120usize, 1, 640, 37];
    let records: Vec<EcgRecord> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| twelve_lead(&format!("r{}", i), *c))
        .collect();

    assert_eq!(proxy.build_signal(&records, &client), counts.len());

    let mut expected_left = 0usize;
    for (object, count) in proxy.objects().iter().zip(counts) {
        assert_eq!(object.container.left, expected_left as f64);
        assert_eq!(object.container.width, (count - 1) as f64);
        expected_left += count;
    }
    for pair in proxy.objects().windows(2) {
        assert!(pair[0].container.max_ox() < pair[1].container.min_ox());
    }
}

#[test]
fn test_pinned_beats_snap_to_trace() {
    let mut proxy = proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    let records = [twelve_lead("ecg", 1000).with_beats(vec![10, 50, 120])];

    proxy.build_signal(&records, &client);
    assert_eq!(proxy.build_beats(&records, &client, true), 1);

    let signal = &proxy.objects()[0];
    let beats = &proxy.objects()[1];
    match &beats.geometry {
        DrawingGeometry::Beats { points } => {
            assert_eq!(points.len(), 3);
            for (point, sample) in points.iter().zip([10.0, 50.0, 120.0]) {
                assert_eq!(point.left, sample);
                assert_eq!(Some(point.top), signal.first_trace_top_at(sample));
            }
        }
        other => panic!("unexpected geometry {:?}", other),
    }
}

#[test]
fn test_missing_inputs_leave_collection_unchanged() {
    let mut proxy = proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    let bare = [EcgRecord::new("bare", Utc::now())];

    for records in [&[][..], &bare[..]] {
        assert_eq!(proxy.build_signal(records, &client), 0);
        assert_eq!(proxy.build_beats(records, &client, true), 0);
        assert_eq!(proxy.build_annotations(records, &client), 0);
        assert_eq!(proxy.build_wavepoints(records, &client), 0);
    }
    assert!(proxy.is_empty());
}

#[test]
fn test_builds_are_not_idempotent() {
    let mut proxy = proxy();
    let client = proxy.attach_client(RenderMode::Canvas, |_| {});
    let records = [twelve_lead("ecg", 100)];

    proxy.build_signal(&records, &client);
    proxy.build_signal(&records, &client);
    assert_eq!(proxy.len(), 2);
    assert_eq!(proxy.objects()[0].container, proxy.objects()[1].container);

    proxy.reset();
    proxy.build_signal(&records, &client);
    assert_eq!(proxy.len(), 1);
}

#[test]
fn test_objects_record_their_owner() {
    let mut proxy = proxy();
    let canvas = proxy.attach_client(RenderMode::Canvas, |_| {});
    let svg = proxy.attach_client(RenderMode::Svg, |_| {});

    proxy.build_signal(&[twelve_lead("a", 10)], &canvas);
    proxy.build_grid(&svg);

    assert_eq!(proxy.objects()[0].owner, canvas.id());
    assert!(proxy.objects()[1..].iter().all(|o| o.owner == svg.id()));
}

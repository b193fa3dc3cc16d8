//! Demo driver: builds a synthetic 12-lead recording set and replays a short
//! interaction session against the drawing proxy.
//!
//! Usage: `ecgdraw [config.toml]`

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use ecgdraw::{
    init_logging, Annotation, DragEvent, DrawingProxy, EcgRecord, Lead, PointerEvent, ProxyConfig,
    Rectangle, RenderMode, Signal, WavePoint, WavePointKind,
};

const SAMPLE_RATE: f64 = 500.0;
const RECORD_SECONDS: usize = 10;
const BEAT_INTERVAL: usize = 400;

/// One synthetic record: a crude PQRST template repeated every beat.
fn synthetic_record(index: usize) -> EcgRecord {
    let samples = SAMPLE_RATE as usize * RECORD_SECONDS;
    let beats: Vec<usize> = (60..samples).step_by(BEAT_INTERVAL).collect();

    let channels = Lead::STANDARD
        .iter()
        .map(|lead| {
            let polarity = if lead.is_inverted_by_default() { -1.0 } else { 1.0 };
            (0..samples)
                .map(|s| {
                    let phase = (s % BEAT_INTERVAL) as f64;
                    let p = 120.0 * (-((phase - 20.0) / 8.0).powi(2)).exp();
                    let r = 1100.0 * (-((phase - 60.0) / 3.0).powi(2)).exp();
                    let t = 300.0 * (-((phase - 180.0) / 20.0).powi(2)).exp();
                    polarity * (p + r + t)
                })
                .collect()
        })
        .collect();

    let wave_points = beats
        .iter()
        .flat_map(|b| {
            [
                WavePoint::new(WavePointKind::POnset, b.saturating_sub(52)),
                WavePoint::new(WavePointKind::POffset, b.saturating_sub(28)),
                WavePoint::new(WavePointKind::QrsOnset, b.saturating_sub(10)),
                WavePoint::new(WavePointKind::QrsOffset, b + 12),
                WavePoint::new(WavePointKind::TOnset, b + 90),
                WavePoint::new(WavePointKind::TOffset, b + 160),
            ]
        })
        .collect();

    let mut annotation = Annotation::new(beats[2], beats[5], "SR");
    annotation.beat_count = 4;
    annotation.cluster = Some(index % 3);

    let mut record = EcgRecord::new(
        format!("demo-{}", index),
        Utc::now() + Duration::seconds((index * RECORD_SECONDS) as i64),
    )
    .with_signal(Signal::new(SAMPLE_RATE, Lead::STANDARD.to_vec(), channels))
    .with_beats(beats)
    .with_wave_points(wave_points)
    .with_annotations(vec![annotation]);
    record
        .annotation_labels
        .insert("SR".to_string(), "Sinus rhythm".to_string());
    record
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = match std::env::args().nth(1) {
        Some(path) => ProxyConfig::load_or_default(&PathBuf::from(path))?,
        None => ProxyConfig::default(),
    };

    let mut proxy = DrawingProxy::new(config);
    proxy.init(Rectangle::new(0.0, 0.0, 1280.0, 960.0));

    let events = Arc::new(AtomicUsize::new(0));
    let painted = Arc::new(AtomicUsize::new(0));
    let (events_seen, painted_seen) = (Arc::clone(&events), Arc::clone(&painted));
    let client = proxy.attach_client(RenderMode::Canvas, move |event| {
        events_seen.fetch_add(1, Ordering::Relaxed);
        painted_seen.fetch_add(event.len(), Ordering::Relaxed);
        tracing::info!("{}", event);
    });

    let records: Vec<EcgRecord> = (0..6).map(synthetic_record).collect();
    let pin_beats = proxy.config().markers.pin_beats;
    let built = proxy.build_signal(&records, &client)
        + proxy.build_beats(&records, &client, pin_beats)
        + proxy.build_annotations(&records, &client)
        + proxy.build_wavepoints(&records, &client)
        + proxy.build_grid(&client)
        + proxy.build_measure(1000.0, 1400.0, &client)
        + proxy.build_floating_objects(&client);
    tracing::info!("Built {} drawing objects", built);

    proxy.scroll(0.0);
    proxy.perform_mouse_move(PointerEvent::new(320.0, 200.0));
    proxy.perform_click(PointerEvent::new(300.0, 200.0));
    proxy.perform_drag(DragEvent::new(300.0, 200.0, -600.0, 0.0));
    proxy.scroll(5000.0);
    proxy.perform_double_click(PointerEvent::new(640.0, 480.0));

    let evicted = proxy.gc();
    tracing::info!(
        "{} change events, {} objects painted, {} evicted, {} kept",
        events.load(Ordering::Relaxed),
        painted.load(Ordering::Relaxed),
        evicted,
        proxy.len()
    );

    Ok(())
}

use ecgdraw_core::record::{EcgRecord, Lead, WavePointKind};

#[test]
fn test_record_deserializes_with_missing_optional_fields() {
    let json = r#"{
        "id": "holter-42",
        "start_time": "2024-03-01T10:00:00Z"
    }"#;
    let record: EcgRecord = serde_json::from_str(json).expect("valid record json");
    assert_eq!(record.id, "holter-42");
    assert!(record.signal.is_none());
    assert!(record.beats.is_none());
    assert_eq!(record.sample_count(), 0);
}

#[test]
fn test_record_deserializes_signal_and_wave_points() {
    let json = r#"{
        "id": "rest-1",
        "start_time": "2024-03-01T10:00:00Z",
        "signal": {
            "sample_rate": 500.0,
            "leads": ["I", "aVR"],
            "channels": [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            "in_microvolts": false,
            "resolution_uv": 2.5
        },
        "beats": [1],
        "wave_points": [{"kind": "QrsOnset", "sample": 0}, {"kind": "QrsOffset", "sample": 2}]
    }"#;
    let record: EcgRecord = serde_json::from_str(json).expect("valid record json");
    let signal = record.checked_signal().expect("usable signal");
    assert_eq!(signal.leads, vec![Lead::I, Lead::AVR]);
    assert_eq!(signal.to_microvolts(2.0), 5.0);
    assert_eq!(record.sample_count(), 3);

    let points = record.checked_wave_points().expect("wave points");
    assert_eq!(points[1].kind, WavePointKind::QrsOffset);
}

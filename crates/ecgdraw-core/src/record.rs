//! ECG domain model.
//!
//! Records are produced by an external ingestion layer and are read-only to
//! the drawing proxy. Every optional field may be absent; builders treat an
//! absent field as "nothing to draw" rather than as a failure.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PrepareError, PrepareResult};

/// One electrical measurement channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lead {
    I,
    II,
    III,
    #[serde(rename = "aVR")]
    AVR,
    #[serde(rename = "aVL")]
    AVL,
    #[serde(rename = "aVF")]
    AVF,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
}

impl Lead {
    /// Standard 12-lead order.
    pub const STANDARD: [Lead; 12] = [
        Lead::I,
        Lead::II,
        Lead::III,
        Lead::AVR,
        Lead::AVL,
        Lead::AVF,
        Lead::V1,
        Lead::V2,
        Lead::V3,
        Lead::V4,
        Lead::V5,
        Lead::V6,
    ];

    /// Label drawn in the grid cell.
    pub fn label(&self) -> &'static str {
        match self {
            Lead::I => "I",
            Lead::II => "II",
            Lead::III => "III",
            Lead::AVR => "aVR",
            Lead::AVL => "aVL",
            Lead::AVF => "aVF",
            Lead::V1 => "V1",
            Lead::V2 => "V2",
            Lead::V3 => "V3",
            Lead::V4 => "V4",
            Lead::V5 => "V5",
            Lead::V6 => "V6",
        }
    }

    /// aVR is conventionally displayed inverted.
    pub fn is_inverted_by_default(&self) -> bool {
        matches!(self, Lead::AVR)
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Supported grid layouts. Cells are stacked top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Rhythm strip of lead II.
    Single,
    /// Leads I, II, III.
    Three,
    /// Limb leads.
    Six,
    #[default]
    Twelve,
}

impl GridMode {
    /// Leads shown by this layout, in cell order.
    pub fn leads(&self) -> &'static [Lead] {
        match self {
            GridMode::Single => &Lead::STANDARD[1..2],
            GridMode::Three => &Lead::STANDARD[..3],
            GridMode::Six => &Lead::STANDARD[..6],
            GridMode::Twelve => &Lead::STANDARD,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.leads().len()
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-lead", self.cell_count())
    }
}

fn default_true() -> bool {
    true
}

fn default_resolution() -> f64 {
    1.0
}

/// Multi-channel sampled signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Samples per second.
    pub sample_rate: f64,
    /// Lead code of each channel, parallel to `channels`.
    pub leads: Vec<Lead>,
    /// Channel-major sample values.
    pub channels: Vec<Vec<f64>>,
    /// False when values are raw converter units rather than microvolts.
    #[serde(default = "default_true")]
    pub in_microvolts: bool,
    /// Microvolts per raw unit; only used when `in_microvolts` is false.
    #[serde(default = "default_resolution")]
    pub resolution_uv: f64,
}

impl Signal {
    pub fn new(sample_rate: f64, leads: Vec<Lead>, channels: Vec<Vec<f64>>) -> Self {
        Self {
            sample_rate,
            leads,
            channels,
            in_microvolts: true,
            resolution_uv: 1.0,
        }
    }

    /// Longest channel length.
    pub fn sample_count(&self) -> usize {
        self.channels.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Samples of the channel recorded for `lead`.
    pub fn channel(&self, lead: Lead) -> Option<&[f64]> {
        self.leads
            .iter()
            .position(|l| *l == lead)
            .and_then(|i| self.channels.get(i))
            .map(Vec::as_slice)
    }

    /// Converts a stored value to microvolts.
    pub fn to_microvolts(&self, value: f64) -> f64 {
        if self.in_microvolts {
            value
        } else {
            value * self.resolution_uv
        }
    }
}

/// Landmark kinds inside a heartbeat complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WavePointKind {
    POnset,
    POffset,
    QrsOnset,
    RPeak,
    QrsOffset,
    TOnset,
    TOffset,
}

impl WavePointKind {
    /// Short caption used by peak markers.
    pub fn symbol(&self) -> &'static str {
        match self {
            WavePointKind::POnset => "P(",
            WavePointKind::POffset => "P)",
            WavePointKind::QrsOnset => "QRS(",
            WavePointKind::RPeak => "R",
            WavePointKind::QrsOffset => "QRS)",
            WavePointKind::TOnset => "T(",
            WavePointKind::TOffset => "T)",
        }
    }

    /// Name of the interval spanned from `self` to `next`, empty when the
    /// pair does not bound a named interval.
    pub fn segment_name(&self, next: WavePointKind) -> &'static str {
        use WavePointKind::*;
        match (self, next) {
            (POnset, POffset) => "P",
            (POffset, QrsOnset) => "PR",
            (QrsOnset, RPeak) | (RPeak, QrsOffset) | (QrsOnset, QrsOffset) => "QRS",
            (QrsOffset, TOnset) => "ST",
            (TOnset, TOffset) => "T",
            (TOffset, POnset) => "TP",
            _ => "",
        }
    }
}

/// Annotated landmark sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePoint {
    pub kind: WavePointKind,
    pub sample: usize,
}

impl WavePoint {
    pub fn new(kind: WavePointKind, sample: usize) -> Self {
        Self { kind, sample }
    }
}

/// Annotated span of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    pub code: String,
    #[serde(default)]
    pub beat_count: usize,
    #[serde(default)]
    pub cluster: Option<usize>,
}

impl Annotation {
    pub fn new(start: usize, end: usize, code: impl Into<String>) -> Self {
        Self {
            start,
            end,
            code: code.into(),
            beat_count: 0,
            cluster: None,
        }
    }
}

/// One recording as delivered by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcgRecord {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub signal: Option<Signal>,
    /// Sample indices of detected beats.
    #[serde(default)]
    pub beats: Option<Vec<usize>>,
    #[serde(default)]
    pub wave_points: Option<Vec<WavePoint>>,
    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
    /// Annotation code to display value.
    #[serde(default)]
    pub annotation_labels: HashMap<String, String>,
}

impl EcgRecord {
    pub fn new(id: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start_time,
            signal: None,
            beats: None,
            wave_points: None,
            annotations: None,
            annotation_labels: HashMap::new(),
        }
    }

    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn with_beats(mut self, beats: Vec<usize>) -> Self {
        self.beats = Some(beats);
        self
    }

    pub fn with_wave_points(mut self, wave_points: Vec<WavePoint>) -> Self {
        self.wave_points = Some(wave_points);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Signal usable for layout: present, non-empty and with a positive rate.
    pub fn checked_signal(&self) -> PrepareResult<&Signal> {
        let signal = self.signal.as_ref().ok_or_else(|| PrepareError::MissingSignal {
            record: self.id.clone(),
        })?;
        if signal.sample_count() == 0 {
            return Err(PrepareError::EmptySignal {
                record: self.id.clone(),
            });
        }
        if !(signal.sample_rate > 0.0) {
            return Err(PrepareError::InvalidSampleRate {
                record: self.id.clone(),
                rate: signal.sample_rate,
            });
        }
        Ok(signal)
    }

    /// Number of columns the record occupies; zero when it has no usable signal.
    pub fn sample_count(&self) -> usize {
        self.checked_signal().map(Signal::sample_count).unwrap_or(0)
    }

    pub fn checked_beats(&self) -> PrepareResult<&[usize]> {
        self.beats
            .as_deref()
            .ok_or_else(|| PrepareError::MissingBeats {
                record: self.id.clone(),
            })
    }

    pub fn checked_wave_points(&self) -> PrepareResult<&[WavePoint]> {
        match self.wave_points.as_deref() {
            Some(points) if !points.is_empty() => Ok(points),
            _ => Err(PrepareError::MissingWavePoints {
                record: self.id.clone(),
            }),
        }
    }

    pub fn checked_annotations(&self) -> PrepareResult<&[Annotation]> {
        match self.annotations.as_deref() {
            Some(annotations) if !annotations.is_empty() => Ok(annotations),
            _ => Err(PrepareError::MissingAnnotations {
                record: self.id.clone(),
            }),
        }
    }

    /// Display value for an annotation code, falling back to the code itself.
    pub fn annotation_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.annotation_labels
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }
}

//! Builders turning domain records into drawing objects.
//!
//! Every drawing object is created here, one builder per source category.
//! Builders never fail loudly: missing inputs surface as [`PrepareError`]
//! for the proxy to log and skip, and partially usable inputs yield a
//! degraded object (for example a beat object with no points).

use ecgdraw_core::constants::PEAK_HALF_WIDTH;
use ecgdraw_core::{
    Annotation, EcgRecord, Label, Line, Peak, Point, Polyline, PrepareResult, Rectangle,
    WavePoint,
};

use crate::client::ClientId;
use crate::object::{DrawingGeometry, DrawingObject, DrawingObjectType, Trace};
use crate::state::ProxyState;

/// Where a built object lands: its source position, owner and first world column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub owner: ClientId,
    pub skip_pixels: f64,
}

impl Placement {
    pub fn new(index: usize, owner: ClientId, skip_pixels: f64) -> Self {
        Self {
            index,
            owner,
            skip_pixels,
        }
    }
}

/// How beat markers are placed vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatMarkers {
    /// Snap onto the first trace of the signal under each beat.
    pub pin: bool,
    /// Distance above the container top when not pinned.
    pub float_offset: f64,
}

fn clip(value: f64, clip_uv: f64) -> f64 {
    if clip_uv > 0.0 {
        value.clamp(-clip_uv, clip_uv)
    } else {
        value
    }
}

/// Container spanning `width` columns from `left` over the full surface height.
fn column_container(state: &ProxyState, left: f64, width: f64) -> Rectangle {
    Rectangle::new(left, state.container.top, width, state.container.height)
}

/// Builds one signal object with a trace per grid cell whose lead the signal
/// records.
///
/// Trace points are `(skip + sample index, microvolts)`. Returns the object
/// and the first free column after it, so consecutive records lay out
/// back to back.
pub fn prepare_signal(
    placement: Placement,
    record: &EcgRecord,
    state: &ProxyState,
) -> PrepareResult<(DrawingObject, f64)> {
    let signal = record.checked_signal()?;
    let count = signal.sample_count();
    let skip = placement.skip_pixels;

    let traces: Vec<Trace> = state
        .cells
        .iter()
        .enumerate()
        .filter_map(|(cell_index, cell)| {
            let channel = signal.channel(cell.lead)?;
            let points = channel
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let microvolts = clip(signal.to_microvolts(*v), state.clip_uv);
                    Point::new(skip + i as f64, microvolts)
                })
                .collect();
            Some(Trace {
                cell_index,
                polyline: Polyline::new(points),
            })
        })
        .collect();

    if traces.is_empty() {
        tracing::debug!(
            "Record {} shares no lead with the {} grid",
            record.id,
            state.grid_mode
        );
    }

    let container = column_container(state, skip, (count - 1) as f64);
    let next = skip + count as f64;
    Ok((
        DrawingObject::new(
            Some(placement.index),
            placement.owner,
            container,
            None,
            DrawingGeometry::Signal { traces },
        ),
        next,
    ))
}

/// Builds the beat markers of one record.
///
/// `limit_pixels` is the record's column count; beats at or past it are
/// dropped. Pinned beats read their Y from the signal object covering their
/// column and are dropped when none does.
pub fn prepare_beats(
    placement: Placement,
    signals: &[DrawingObject],
    beats: &[usize],
    state: &ProxyState,
    limit_pixels: usize,
    markers: BeatMarkers,
) -> DrawingObject {
    let skip = placement.skip_pixels;
    let float_top = state.container.top - markers.float_offset;

    let points = beats
        .iter()
        .filter(|beat| **beat < limit_pixels)
        .filter_map(|beat| {
            let x = skip + *beat as f64;
            if !markers.pin {
                return Some(Point::new(x, float_top));
            }
            signals
                .iter()
                .filter(|o| o.object_type() == DrawingObjectType::Signal)
                .filter(|o| !o.container.check_horizontal_overflow(x))
                .find_map(|o| o.first_trace_top_at(x))
                .map(|top| Point::new(x, top))
        })
        .collect::<Vec<_>>();

    if markers.pin && points.is_empty() && !beats.is_empty() {
        tracing::debug!("No signal backs the beats at column {}", skip);
    }

    DrawingObject::new(
        Some(placement.index),
        placement.owner,
        column_container(state, skip, limit_pixels.saturating_sub(1) as f64),
        None,
        DrawingGeometry::Beats { points },
    )
}

/// Builds the shaded region and caption of one annotation.
pub fn prepare_annotation(
    placement: Placement,
    record: &EcgRecord,
    annotation: &Annotation,
    state: &ProxyState,
) -> DrawingObject {
    let start = annotation.start.min(annotation.end) as f64;
    let end = annotation.start.max(annotation.end) as f64;
    let container = column_container(state, placement.skip_pixels + start, end - start);

    let mut text = record.annotation_label(&annotation.code).to_string();
    if annotation.beat_count > 0 {
        text.push_str(&format!(" ({})", annotation.beat_count));
    }
    let label = Label::new(
        Point::new(container.left, container.top),
        container,
        text,
    );

    DrawingObject::new(
        Some(placement.index),
        placement.owner,
        container,
        None,
        DrawingGeometry::Annotations {
            rectangles: vec![container],
            labels: vec![label],
            cluster: annotation.cluster,
        },
    )
}

/// Vertical peak marker for `cell_index` at world column `x`.
fn peak_marker(state: &ProxyState, cell_index: usize, x: f64, text: &str) -> Option<Peak> {
    let cell = state.cells.get(cell_index)?;
    let container = Rectangle::new(
        x - PEAK_HALF_WIDTH,
        cell.container.top,
        2.0 * PEAK_HALF_WIDTH,
        cell.container.height,
    );
    let line = Line::new(
        Point::new(x, cell.container.top),
        Point::new(x, cell.container.bottom()),
    );
    let label = Label::new(Point::new(x, cell.container.top), container, text);
    Some(Peak::new(container, label, line, cell_index))
}

/// Builds the interval between two adjacent wave-points.
///
/// The segment line runs `band_offset` below the surface top, captioned with
/// the interval name. Every cell gets a peak marker at `a`; `close` adds one
/// at `b` too, for the last pair of a record.
pub fn prepare_pqrst_complex(
    placement: Placement,
    a: &WavePoint,
    b: &WavePoint,
    state: &ProxyState,
    band_offset: f64,
    close: bool,
) -> DrawingObject {
    let xa = placement.skip_pixels + a.sample as f64;
    let xb = placement.skip_pixels + b.sample as f64;
    let container = column_container(state, xa, xb - xa);
    let band = state.container.top + band_offset;

    let line = Line::new(Point::new(xa, band), Point::new(xb, band));
    let name = a.kind.segment_name(b.kind);
    let labels = if name.is_empty() {
        Vec::new()
    } else {
        vec![Label::new(line.center(), container, name)]
    };

    let mut peaks: Vec<Peak> = (0..state.cells.len())
        .filter_map(|cell| peak_marker(state, cell, xa, a.kind.symbol()))
        .collect();
    if close {
        peaks.extend(
            (0..state.cells.len()).filter_map(|cell| peak_marker(state, cell, xb, b.kind.symbol())),
        );
    }

    DrawingObject::new(
        Some(placement.index),
        placement.owner,
        container,
        None,
        DrawingGeometry::Pqrst {
            lines: vec![line],
            labels,
            peaks,
        },
    )
}

/// Builds the pointer crosshair: a vertical and a horizontal line plus one
/// peak marker per cell, all viewport-pinned.
///
/// Positions are placeholders until the first pointer move.
pub fn prepare_floating_drawings(state: &ProxyState, owner: ClientId) -> DrawingObject {
    let top = state.container.top;
    let bottom = state.container.bottom();
    let container = Rectangle::floating(0.0, top, 0.0, state.container.height);

    let lines = vec![
        Line::floating(Point::new(0.0, top), Point::new(0.0, bottom)),
        Line::floating(Point::new(0.0, top), Point::new(0.0, top)),
    ];
    let peaks = (0..state.cells.len())
        .filter_map(|cell| peak_marker(state, cell, 0.0, ""))
        .map(Peak::into_floating)
        .collect();

    DrawingObject::new(
        None,
        owner,
        container,
        None,
        DrawingGeometry::Object { lines, peaks },
    )
}

/// Builds a caliper between two world columns, captioned with its duration.
pub fn prepare_measure(
    owner: ClientId,
    from: f64,
    to: f64,
    state: &ProxyState,
    band_offset: f64,
) -> DrawingObject {
    let left = from.min(to);
    let width = (to - from).abs();
    let container = column_container(state, left, width);
    let band = state.container.top + band_offset;

    let line = Line::new(Point::new(left, band), Point::new(left + width, band));
    let millis = width / state.sample_rate * 1000.0;
    let label = Label::new(line.center(), container, format!("{:.0} ms", millis));

    DrawingObject::new(
        None,
        owner,
        container,
        None,
        DrawingGeometry::Measure {
            lines: vec![line],
            labels: vec![label],
        },
    )
}

/// Builds one grid object per cell: frame, baseline and lead caption across
/// `content_width` columns.
pub fn prepare_grid(owner: ClientId, state: &ProxyState, content_width: f64) -> Vec<DrawingObject> {
    state
        .cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let frame = Rectangle::new(
                0.0,
                cell.container.top,
                content_width,
                cell.container.height,
            );
            let baseline = Line::new(
                Point::new(0.0, cell.baseline()),
                Point::new(content_width, cell.baseline()),
            );
            let caption = Label::new(
                Point::new(0.0, cell.container.top),
                frame,
                cell.label.clone(),
            );
            DrawingObject::new(
                None,
                owner,
                frame,
                Some(i),
                DrawingGeometry::Grid {
                    rectangles: vec![frame],
                    lines: vec![baseline],
                    labels: vec![caption],
                },
            )
        })
        .collect()
}

//! Batch ingestion: one `build_*` operation per object category.
//!
//! Every build lays its records out from column 0, so a full rebuild must
//! start with [`DrawingProxy::reset`]. Repeated calls append duplicates.

use ecgdraw_core::{EcgRecord, PrepareError};

use super::DrawingProxy;
use crate::client::DrawingClient;
use crate::prepare::{
    prepare_annotation, prepare_beats, prepare_floating_drawings, prepare_grid, prepare_measure,
    prepare_pqrst_complex, prepare_signal, BeatMarkers, Placement,
};

impl DrawingProxy {
    /// Appends one signal object per usable record, laid out back to back.
    ///
    /// The first usable record fixes the sample rate. Returns the number of
    /// objects added.
    pub fn build_signal(&mut self, records: &[EcgRecord], client: &DrawingClient) -> usize {
        let Some(state) = self.state.as_mut() else {
            tracing::debug!("build_signal ignored: {}", PrepareError::NotInitialized);
            return 0;
        };

        if let Some(signal) = records.iter().find_map(|r| r.checked_signal().ok()) {
            state.set_sample_rate(signal.sample_rate);
        }

        let mut skip = 0.0;
        let mut added = 0;
        for (index, record) in records.iter().enumerate() {
            match prepare_signal(Placement::new(index, client.id(), skip), record, state) {
                Ok((object, next)) => {
                    self.objects.push(object);
                    skip = next;
                    added += 1;
                }
                Err(err) => tracing::debug!("Signal skipped: {}", err),
            }
        }

        state.declare_samples(skip as usize);
        tracing::debug!("Built {} signal objects over {} columns", added, skip);
        added
    }

    /// Appends one beat object per record carrying beats.
    ///
    /// With `pin`, markers snap to signal objects already in the collection,
    /// so [`DrawingProxy::build_signal`] should run first.
    pub fn build_beats(
        &mut self,
        records: &[EcgRecord],
        client: &DrawingClient,
        pin: bool,
    ) -> usize {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("build_beats ignored: {}", PrepareError::NotInitialized);
            return 0;
        };
        let markers = BeatMarkers {
            pin,
            float_offset: self.config.markers.beat_float_offset,
        };

        let mut built = Vec::new();
        let mut skip = 0.0;
        for (index, record) in records.iter().enumerate() {
            let limit = record.sample_count();
            match record.checked_beats() {
                Ok(beats) => built.push(prepare_beats(
                    Placement::new(index, client.id(), skip),
                    &self.objects,
                    beats,
                    state,
                    limit,
                    markers,
                )),
                Err(err) => tracing::debug!("Beats skipped: {}", err),
            }
            skip += limit as f64;
        }

        let added = built.len();
        self.objects.extend(built);
        added
    }

    /// Appends one object per annotation of every record.
    pub fn build_annotations(&mut self, records: &[EcgRecord], client: &DrawingClient) -> usize {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("build_annotations ignored: {}", PrepareError::NotInitialized);
            return 0;
        };

        let mut added = 0;
        let mut skip = 0.0;
        for (index, record) in records.iter().enumerate() {
            match record.checked_annotations() {
                Ok(annotations) => {
                    let placement = Placement::new(index, client.id(), skip);
                    for annotation in annotations {
                        self.objects
                            .push(prepare_annotation(placement, record, annotation, state));
                        added += 1;
                    }
                }
                Err(err) => tracing::debug!("Annotations skipped: {}", err),
            }
            skip += record.sample_count() as f64;
        }
        added
    }

    /// Appends one PQRST object per pair of adjacent wave-points.
    ///
    /// Wave-points are ordered by sample first; the last pair of each record
    /// also marks its closing point.
    pub fn build_wavepoints(&mut self, records: &[EcgRecord], client: &DrawingClient) -> usize {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("build_wavepoints ignored: {}", PrepareError::NotInitialized);
            return 0;
        };
        let band_offset = self.config.markers.pqrst_band_offset;

        let mut added = 0;
        let mut skip = 0.0;
        for (index, record) in records.iter().enumerate() {
            match record.checked_wave_points() {
                Ok(points) => {
                    let mut points = points.to_vec();
                    points.sort_by_key(|p| p.sample);
                    let placement = Placement::new(index, client.id(), skip);
                    let pairs = points.len().saturating_sub(1);
                    for (i, pair) in points.windows(2).enumerate() {
                        let close = i + 1 == pairs;
                        self.objects.push(prepare_pqrst_complex(
                            placement,
                            &pair[0],
                            &pair[1],
                            state,
                            band_offset,
                            close,
                        ));
                        added += 1;
                    }
                }
                Err(err) => tracing::debug!("Wave-points skipped: {}", err),
            }
            skip += record.sample_count() as f64;
        }
        added
    }

    /// Adds the pointer crosshair to the overlay.
    pub fn build_floating_objects(&mut self, client: &DrawingClient) -> usize {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("build_floating_objects ignored: {}", PrepareError::NotInitialized);
            return 0;
        };
        self.overlay
            .push(prepare_floating_drawings(state, client.id()));
        1
    }

    /// Adds a caliper between world columns `from` and `to`.
    pub fn build_measure(&mut self, from: f64, to: f64, client: &DrawingClient) -> usize {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("build_measure ignored: {}", PrepareError::NotInitialized);
            return 0;
        };
        if !from.is_finite() || !to.is_finite() {
            tracing::debug!("Measure skipped: non-finite bounds {} .. {}", from, to);
            return 0;
        }
        let measure = prepare_measure(
            client.id(),
            from,
            to,
            state,
            self.config.markers.pqrst_band_offset,
        );
        self.objects.push(measure);
        1
    }

    /// Adds one grid object per cell, spanning the declared content or the
    /// visible window, whichever is wider.
    pub fn build_grid(&mut self, client: &DrawingClient) -> usize {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("build_grid ignored: {}", PrepareError::NotInitialized);
            return 0;
        };
        let width = (state.max_sample as f64).max(state.visible_columns());
        let grid = prepare_grid(client.id(), state, width);
        let added = grid.len();
        self.objects.extend(grid);
        added
    }
}

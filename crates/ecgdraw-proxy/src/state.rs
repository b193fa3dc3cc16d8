//! Viewport and layout state shared by every build and interaction call.
//!
//! Three coordinate frames are in play:
//! - world columns: X counts samples from the start of the first record
//! - viewport pixels: X relative to the surface left edge,
//!   `viewport_x = world_x * scale + scroll`
//! - cell pixels: Y inside one lead's cell, derived from microvolts with the
//!   cell's coefficient around its baseline
//!
//! Y for world objects is already a surface pixel (cells and containers share
//! the surface's vertical frame), except for signal traces which keep raw
//! microvolts until paint time.

use std::fmt;

use chrono::{DateTime, Utc};
use ecgdraw_core::constants::UV_PER_MV;
use ecgdraw_core::{GridMode, Lead, Rectangle};
use ecgdraw_settings::ProxyConfig;
use serde::{Deserialize, Serialize};

/// Sample rate assumed until a signal declares its own.
const DEFAULT_SAMPLE_RATE: f64 = 500.0;

/// One lead's sub-rectangle of the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingCell {
    pub container: Rectangle,
    pub lead: Lead,
    pub label: String,
    pub inverted: bool,
    /// Viewport pixels per sample column.
    pub sample_to_px: f64,
    /// Cell pixels per microvolt.
    pub uv_to_px: f64,
}

impl DrawingCell {
    /// Isoelectric line of the cell.
    pub fn baseline(&self) -> f64 {
        self.container.mid_oy()
    }

    /// Converts a microvolt value to a surface Y inside this cell.
    pub fn microvolts_to_y(&self, microvolts: f64) -> f64 {
        let direction = if self.inverted { 1.0 } else { -1.0 };
        self.baseline() + direction * microvolts * self.uv_to_px
    }
}

/// Scroll, scale and layout of one drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyState {
    pub grid_mode: GridMode,
    pub cells: Vec<DrawingCell>,
    /// Surface rectangle in host screen coordinates.
    pub container: Rectangle,
    /// Viewport offset in pixels; content moves opposite to the scroll input.
    pub scroll: f64,
    /// Viewport pixels per sample column.
    pub scale: f64,
    pub px_per_mm: f64,
    pub paper_speed_mm_s: f64,
    pub gain_mm_mv: f64,
    pub sample_rate: f64,
    /// Largest column declared by built records.
    pub max_sample: usize,
    /// Microvolt clip applied to traces; 0 disables clipping.
    pub clip_uv: f64,
    /// Microvolt clip expressed in cell pixels.
    pub clip_sample: f64,
    pub created_at: DateTime<Utc>,
}

impl ProxyState {
    /// Lays out the grid cells for `container` from the configuration.
    pub fn new(config: &ProxyConfig, container: Rectangle) -> Self {
        let mut state = Self {
            grid_mode: config.layout.grid_mode,
            cells: Vec::new(),
            container,
            scroll: 0.0,
            scale: 1.0,
            px_per_mm: config.layout.px_per_mm,
            paper_speed_mm_s: config.layout.paper_speed_mm_s,
            gain_mm_mv: config.layout.gain_mm_mv,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_sample: 0,
            clip_uv: config.clip.clip_uv,
            clip_sample: 0.0,
            created_at: Utc::now(),
        };
        state.set_sample_rate(DEFAULT_SAMPLE_RATE);
        state
    }

    /// Cell pixels per microvolt for the configured gain.
    pub fn uv_to_px(&self) -> f64 {
        self.px_per_mm * self.gain_mm_mv / UV_PER_MV
    }

    /// Recomputes the horizontal scale and the cells for a new sample rate.
    /// Non-positive rates are ignored.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        if !(sample_rate > 0.0) {
            return;
        }
        self.sample_rate = sample_rate;
        self.scale = self.px_per_mm * self.paper_speed_mm_s / sample_rate;
        self.clip_sample = self.clip_uv * self.uv_to_px();
        self.layout_cells();
    }

    fn layout_cells(&mut self) {
        let leads = self.grid_mode.leads();
        let height = self.container.height / leads.len() as f64;
        let uv_to_px = self.uv_to_px();

        self.cells = leads
            .iter()
            .enumerate()
            .map(|(i, lead)| DrawingCell {
                container: Rectangle::new(
                    self.container.left,
                    self.container.top + i as f64 * height,
                    self.container.width,
                    height,
                ),
                lead: *lead,
                label: lead.label().to_string(),
                inverted: lead.is_inverted_by_default(),
                sample_to_px: self.scale,
                uv_to_px,
            })
            .collect();
    }

    /// First visible world column.
    pub fn min_px(&self) -> f64 {
        -self.scroll / self.scale
    }

    /// Last visible world column.
    pub fn max_px(&self) -> f64 {
        self.min_px() + self.visible_columns()
    }

    pub fn visible_columns(&self) -> f64 {
        self.container.width / self.scale
    }

    /// Visible window in world columns, sharing the surface's vertical frame.
    pub fn window(&self) -> Rectangle {
        Rectangle::new(
            self.min_px(),
            self.container.top,
            self.visible_columns(),
            self.container.height,
        )
    }

    /// Converts a viewport-relative X to a world column.
    pub fn viewport_to_world(&self, viewport_x: f64) -> f64 {
        (viewport_x - self.scroll) / self.scale
    }

    /// Converts a world column to a viewport-relative X.
    pub fn world_to_viewport(&self, world_x: f64) -> f64 {
        world_x * self.scale + self.scroll
    }

    /// Converts a host screen X to a world column.
    pub fn screen_to_world(&self, screen_x: f64) -> f64 {
        self.viewport_to_world(screen_x - self.container.left)
    }

    /// Extends the declared content extent.
    pub fn declare_samples(&mut self, columns: usize) {
        self.max_sample = self.max_sample.max(columns);
    }
}

impl fmt::Display for ProxyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Scale: {:.3}px/sample | Window: [{:.1}, {:.1}]",
            self.grid_mode,
            self.scale,
            self.min_px(),
            self.max_px()
        )
    }
}

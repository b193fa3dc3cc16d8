//! Interaction entry points. Each call emits exactly one change event.

use ecgdraw_core::constants::PEAK_HALF_WIDTH;
use ecgdraw_core::{Point, PrepareError, PrimitiveState, Rectangle};

use super::DrawingProxy;
use crate::event_bus::{ChangeCause, DragEvent, PointerEvent};
use crate::object::{DrawingGeometry, DrawingObject, DrawingObjectType};
use crate::state::ProxyState;

impl DrawingProxy {
    /// Scrolls to `delta`; content moves opposite to the input.
    pub fn scroll(&mut self, delta: f64) {
        let Some(state) = self.state.as_mut() else {
            tracing::debug!("scroll ignored: {}", PrepareError::NotInitialized);
            return;
        };
        if !delta.is_finite() {
            tracing::debug!("scroll ignored: non-finite delta {}", delta);
            return;
        }
        state.scroll = -delta;

        if let Some(pointer) = self.last_pointer {
            self.relocate_pointer(pointer);
        }
        self.emit(ChangeCause::Scroll, None);
    }

    /// Moves the crosshair to a pointer inside the screen rectangle.
    pub fn perform_mouse_move(&mut self, event: PointerEvent) {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("mousemove ignored: {}", PrepareError::NotInitialized);
            return;
        };
        if !event.is_finite() {
            tracing::debug!("mousemove ignored: non-finite pointer {:?}", event);
            return;
        }
        if !state.container.contains_point(event.x, event.y) {
            tracing::debug!(
                "mousemove ignored: {}",
                PrepareError::PointerOutside {
                    x: event.x,
                    y: event.y
                }
            );
            return;
        }

        self.last_pointer = Some(event);
        self.relocate_pointer(event);
        self.emit(ChangeCause::MouseMove, Some(event));
    }

    /// Selects the annotation, PQRST or measure objects under the pointer.
    pub fn perform_click(&mut self, event: PointerEvent) {
        if self.mark_hits(event, PrimitiveState::Selected) {
            self.emit(ChangeCause::Click, Some(event));
        }
    }

    /// Activates the annotation, PQRST or measure objects under the pointer.
    pub fn perform_double_click(&mut self, event: PointerEvent) {
        if self.mark_hits(event, PrimitiveState::Activated) {
            self.emit(ChangeCause::DoubleClick, Some(event));
        }
    }

    /// Pans by the drag movement, clamped to the declared content.
    pub fn perform_drag(&mut self, event: DragEvent) {
        let Some(state) = self.state.as_mut() else {
            tracing::debug!("drag ignored: {}", PrepareError::NotInitialized);
            return;
        };
        if !event.is_finite() {
            tracing::debug!("drag ignored: non-finite movement {:?}", event);
            return;
        }

        let window = state.window();
        let extent = (state.max_sample as f64).max(state.visible_columns());
        let content = Rectangle::new(0.0, window.top, extent + 1.0, window.height);
        let proposed = Point::new(-event.dx / state.scale, event.dy);
        let movement = window.limit_action_point(&content, proposed);
        state.scroll = -(window.left + movement.left) * state.scale;

        self.emit(ChangeCause::Drag, Some(event.pointer()));
    }

    /// Repositions every floating object for a viewport-relative pointer.
    ///
    /// `left` and `top` are relative to the screen rectangle. Lines follow
    /// the pointer; each cell's peak marker reads the trace value from the
    /// signal object covering the pointer column and keeps its previous
    /// value when no signal does.
    pub fn prepare_floating_objects(&mut self, left: f64, top: f64) {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("Floating objects not prepared: {}", PrepareError::NotInitialized);
            return;
        };

        let column = (left - state.scroll) / state.scale;
        let signal = self
            .objects
            .iter()
            .filter(|o| o.object_type() == DrawingObjectType::Signal)
            .find(|o| !o.container.check_horizontal_overflow(column));

        for floating in &mut self.overlay {
            place_floating(floating, state, signal, left, top, column);
        }
    }

    fn relocate_pointer(&mut self, pointer: PointerEvent) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let left = pointer.x - state.container.left;
        let top = pointer.y - state.container.top;
        self.prepare_floating_objects(left, top);
    }

    /// Applies `target` to selectable objects under the pointer and resets
    /// the rest. Returns false when the proxy is not initialised or the
    /// pointer is not finite.
    fn mark_hits(&mut self, event: PointerEvent, target: PrimitiveState) -> bool {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("{:?} ignored: {}", target, PrepareError::NotInitialized);
            return false;
        };
        if !event.is_finite() {
            tracing::debug!("{:?} ignored: non-finite pointer {:?}", target, event);
            return false;
        }

        let column = state.screen_to_world(event.x);
        let mut hits = 0;
        for object in self.objects.iter_mut().filter(|o| o.is_selectable()) {
            if object.container.contains_point(column, event.y) {
                object.set_state(target);
                hits += 1;
            } else {
                object.set_state(PrimitiveState::Default);
            }
        }
        tracing::debug!("{:?} {} objects at column {:.1}", target, hits, column);
        true
    }
}

/// Lines, peak lines and peak containers are in surface pixels. A peak's
/// `label.position.top` is the trace value in microvolts, the polyline frame.
fn place_floating(
    floating: &mut DrawingObject,
    state: &ProxyState,
    signal: Option<&DrawingObject>,
    left: f64,
    top: f64,
    column: f64,
) {
    let y = state.container.top + top;
    let surface_top = state.container.top;
    let surface_bottom = state.container.bottom();

    floating.container.left = left;

    let DrawingGeometry::Object { lines, peaks } = &mut floating.geometry else {
        return;
    };

    if let Some(vertical) = lines.first_mut() {
        vertical.set((left, surface_top), (left, surface_bottom));
    }
    if let Some(horizontal) = lines.get_mut(1) {
        horizontal.set((0.0, y), (state.container.width, y));
    }

    for peak in peaks.iter_mut() {
        let Some(cell) = state.cells.get(peak.cell_index) else {
            continue;
        };
        peak.container.left = left - PEAK_HALF_WIDTH;
        peak.line
            .set((left, cell.container.top), (left, cell.container.bottom()));

        match signal.and_then(|s| s.trace_top_at(peak.cell_index, column)) {
            Some(value) => {
                peak.label.position.move_to(left, value);
                peak.label.text = format!("{:.0} µV", value);
            }
            None => {
                let kept = peak.label.position.top;
                peak.label.position.move_to(left, kept);
            }
        }
    }
}

//! Interactive editor geometry and drag handling for one channel curve.

use crate::curve::{CurveModel, quantize};
use crate::error::CoreResult;

/// Inset from the surface edges to the frame, in pixels.
pub const FRAME_MARGIN: f32 = 30.0;
/// The frame never collapses below this, even on tiny surfaces.
pub const MIN_FRAME_SIZE: f32 = 50.0;
/// Visual radius of a control point handle.
pub const HANDLE_RADIUS: f32 = 5.0;
/// Extra grab distance beyond the handle's visual radius.
pub const HIT_SLACK: f32 = 3.0;
/// Surface size editors are laid out at before the first resize.
pub const DEFAULT_SURFACE: f32 = 300.0;

/// The square value-to-pixel mapping region, inset by [`FRAME_MARGIN`].
///
/// Value space is `[0, 255]` on both axes with 255 at the top; pixel
/// space is the editor surface with y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorFrame {
    pub left: f32,
    pub top: f32,
    pub size: f32,
}

impl EditorFrame {
    /// Fit a frame into a surface of the given size.
    pub fn fit(width: f32, height: f32) -> Self {
        let size = (width.min(height) - 2.0 * FRAME_MARGIN).max(MIN_FRAME_SIZE);
        Self {
            left: FRAME_MARGIN,
            top: FRAME_MARGIN,
            size,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.size
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.size
    }

    /// Horizontal pixel position of a value-space x.
    pub fn pixel_x(&self, x: u8) -> f32 {
        self.left + f32::from(x) / 255.0 * self.size
    }

    /// Vertical pixel position of a value-space y. Value 255 maps to
    /// the frame's top edge.
    pub fn pixel_y(&self, y: u8) -> f32 {
        self.top + (1.0 - f32::from(y) / 255.0) * self.size
    }

    /// Value-space y for a vertical pixel position, clamped to `[0, 255]`.
    pub fn value_from_pixel_y(&self, py: f32) -> u8 {
        let t = (py - self.top) / self.size;
        ((1.0 - t) * 255.0).round().clamp(0.0, 255.0) as u8
    }
}

/// Drag interaction state: at most one handle is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(usize),
}

/// Controller for one channel's curve editor surface.
///
/// Owns the channel's [`CurveModel`] for its whole lifetime and turns
/// pointer input into control point edits.
#[derive(Debug)]
pub struct CurveEditor {
    model: CurveModel,
    frame: EditorFrame,
    drag: DragState,
}

impl CurveEditor {
    pub fn new(points: usize) -> CoreResult<Self> {
        Ok(Self {
            model: CurveModel::new(points)?,
            frame: EditorFrame::fit(DEFAULT_SURFACE, DEFAULT_SURFACE),
            drag: DragState::Idle,
        })
    }

    pub fn model(&self) -> &CurveModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut CurveModel {
        &mut self.model
    }

    pub fn frame(&self) -> EditorFrame {
        self.frame
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Adopt a new surface size. Only the mapping geometry changes; an
    /// active drag keeps its grabbed handle.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.frame = EditorFrame::fit(width, height);
    }

    /// Index of the first handle within grab distance of `(px, py)`.
    ///
    /// When grab circles overlap, the lowest index wins. That tie-break
    /// is deliberate and kept stable.
    pub fn hit_test(&self, px: f32, py: f32) -> Option<usize> {
        let reach = HANDLE_RADIUS + HIT_SLACK;
        self.model.points().enumerate().find_map(|(i, (x, y))| {
            let dx = px - self.frame.pixel_x(x);
            let dy = py - self.frame.pixel_y(y);
            (dx * dx + dy * dy <= reach * reach).then_some(i)
        })
    }

    /// Pointer pressed at `(px, py)`. Returns true when a handle was
    /// grabbed; a miss leaves the editor idle.
    pub fn press(&mut self, px: f32, py: f32) -> bool {
        match self.hit_test(px, py) {
            Some(index) => {
                self.drag = DragState::Dragging(index);
                true
            }
            None => false,
        }
    }

    /// Pointer moved to vertical position `py` while dragging. Updates
    /// the grabbed point's value and returns true; moves while idle are
    /// no-ops.
    pub fn drag_to(&mut self, py: f32) -> bool {
        let DragState::Dragging(index) = self.drag else {
            return false;
        };
        let value = self.frame.value_from_pixel_y(py);
        self.model
            .set_y(index, i32::from(value))
            .expect("dragged index stays within the fixed point count");
        true
    }

    /// Pointer released. A release without an active drag is a no-op.
    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Pixel positions of the control point handles, in index order.
    pub fn handle_positions(&self) -> Vec<(f32, f32)> {
        self.model
            .points()
            .map(|(x, y)| (self.frame.pixel_x(x), self.frame.pixel_y(y)))
            .collect()
    }

    /// Sampled curve in pixel space, one point per integer level.
    pub fn curve_polyline(&self) -> Vec<(f32, f32)> {
        (0u16..=255)
            .map(|x| {
                let y = quantize(self.model.evaluate(f64::from(x)));
                (self.frame.pixel_x(x as u8), self.frame.pixel_y(y))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_fits_with_margin() {
        let frame = EditorFrame::fit(300.0, 300.0);
        assert_eq!(frame.left, 30.0);
        assert_eq!(frame.top, 30.0);
        assert_eq!(frame.size, 240.0);
        assert_eq!(frame.right(), 270.0);
        assert_eq!(frame.bottom(), 270.0);
    }

    #[test]
    fn frame_uses_shorter_side_and_floors_at_minimum() {
        let frame = EditorFrame::fit(400.0, 300.0);
        assert_eq!(frame.size, 240.0);

        let tiny = EditorFrame::fit(100.0, 80.0);
        assert_eq!(tiny.size, MIN_FRAME_SIZE);
    }

    #[test]
    fn value_pixel_mapping_endpoints() {
        let frame = EditorFrame::fit(300.0, 300.0);
        assert_eq!(frame.pixel_x(0), frame.left);
        assert_eq!(frame.pixel_x(255), frame.right());
        assert_eq!(frame.pixel_y(255), frame.top);
        assert_eq!(frame.pixel_y(0), frame.bottom());
    }

    #[test]
    fn pixel_to_value_round_trips() {
        let frame = EditorFrame::fit(300.0, 300.0);
        for v in [0u8, 1, 85, 128, 200, 254, 255] {
            let py = frame.pixel_y(v);
            assert_eq!(
                frame.value_from_pixel_y(py),
                v,
                "round trip failed for value {v}"
            );
        }
    }

    #[test]
    fn pixel_to_value_clamps_outside_frame() {
        let frame = EditorFrame::fit(300.0, 300.0);
        assert_eq!(frame.value_from_pixel_y(frame.top - 100.0), 255);
        assert_eq!(frame.value_from_pixel_y(frame.bottom() + 100.0), 0);
    }

    #[test]
    fn hit_test_respects_grab_radius() {
        let editor = CurveEditor::new(4).unwrap();
        let (hx, hy) = editor.handle_positions()[1];
        let reach = HANDLE_RADIUS + HIT_SLACK;

        assert_eq!(editor.hit_test(hx, hy), Some(1));
        assert_eq!(editor.hit_test(hx + reach - 0.1, hy), Some(1));
        assert_eq!(editor.hit_test(hx + reach + 0.5, hy), None);
    }

    #[test]
    fn overlapping_handles_pick_lowest_index() {
        // At the minimum frame size, adjacent handles of an 8-point
        // curve sit closer than the grab radius; a press between them
        // reaches both, and the lower index must win.
        let mut editor = CurveEditor::new(8).unwrap();
        editor.resize(10.0, 10.0);
        assert_eq!(editor.frame().size, MIN_FRAME_SIZE);

        let handles = editor.handle_positions();
        let mid = (
            (handles[0].0 + handles[1].0) / 2.0,
            (handles[0].1 + handles[1].1) / 2.0,
        );

        let reach = HANDLE_RADIUS + HIT_SLACK;
        for &(hx, hy) in &handles[0..2] {
            let d2 = (mid.0 - hx).powi(2) + (mid.1 - hy).powi(2);
            assert!(d2 <= reach * reach, "midpoint must reach both handles");
        }

        assert_eq!(editor.hit_test(mid.0, mid.1), Some(0));
    }

    #[test]
    fn press_miss_stays_idle() {
        let mut editor = CurveEditor::new(4).unwrap();
        assert!(!editor.press(5.0, 5.0));
        assert_eq!(editor.drag_state(), DragState::Idle);
    }

    #[test]
    fn drag_updates_grabbed_point() {
        let mut editor = CurveEditor::new(4).unwrap();
        let (hx, hy) = editor.handle_positions()[1];
        assert!(editor.press(hx, hy));
        assert_eq!(editor.drag_state(), DragState::Dragging(1));

        let target_py = editor.frame().pixel_y(200);
        assert!(editor.drag_to(target_py));
        assert_eq!(editor.model().y(1).unwrap(), 200);
        assert_eq!(editor.drag_state(), DragState::Dragging(1));

        editor.release();
        assert_eq!(editor.drag_state(), DragState::Idle);
    }

    #[test]
    fn drag_clamps_beyond_frame_edges() {
        let mut editor = CurveEditor::new(4).unwrap();
        let (hx, hy) = editor.handle_positions()[2];
        assert!(editor.press(hx, hy));

        editor.drag_to(editor.frame().top - 500.0);
        assert_eq!(editor.model().y(2).unwrap(), 255);

        editor.drag_to(editor.frame().bottom() + 500.0);
        assert_eq!(editor.model().y(2).unwrap(), 0);
    }

    #[test]
    fn idle_moves_and_releases_are_no_ops() {
        let mut editor = CurveEditor::new(4).unwrap();
        let before: Vec<(u8, u8)> = editor.model().points().collect();

        assert!(!editor.drag_to(100.0));
        editor.release();

        let after: Vec<(u8, u8)> = editor.model().points().collect();
        assert_eq!(before, after);
        assert_eq!(editor.drag_state(), DragState::Idle);
    }

    #[test]
    fn resize_keeps_drag_state() {
        let mut editor = CurveEditor::new(4).unwrap();
        let (hx, hy) = editor.handle_positions()[0];
        assert!(editor.press(hx, hy));

        editor.resize(500.0, 500.0);
        assert_eq!(editor.drag_state(), DragState::Dragging(0));
        assert_eq!(editor.frame().size, 440.0);
    }

    #[test]
    fn polyline_spans_the_frame() {
        let editor = CurveEditor::new(4).unwrap();
        let line = editor.curve_polyline();
        assert_eq!(line.len(), 256);
        let frame = editor.frame();
        assert_eq!(line[0], (frame.left, frame.bottom()));
        assert_eq!(line[255], (frame.right(), frame.top));
    }
}

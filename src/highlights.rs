use egui::{Color32, Stroke};

use crate::geometry::PlotFrame;
use crate::scale::ScaledAxes;
use crate::transition::{Transition, Tween};

struct MarkLine {
    x: Tween,
}

/// Overlay of highlighted time points drawn as vertical lines over the
/// data.
///
/// Rendering reconciles the displayed lines against the new mark set by
/// pixel-position identity: retained values keep their element and
/// animate in place, genuinely new values slide in from the right plot
/// edge, and dropped values disappear immediately. Replacing the set with
/// mostly-overlapping values (a sliding window of recent selections, say)
/// therefore does not flicker.
pub struct MarkOverlay {
    width: f32,
    marks: Vec<f32>,
    lines: Vec<MarkLine>,
}

impl MarkOverlay {
    pub fn new(frame: &PlotFrame) -> Self {
        Self {
            width: frame.width,
            marks: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Project the given time points through the current time scale.
    /// Duplicates are kept and render as overlapping lines.
    pub fn set_marks(&mut self, marks: &[f32], axes: &ScaledAxes) -> &mut Self {
        let scale_x = axes.scale_x();
        self.marks = marks.iter().map(|&t| scale_x.apply(t)).collect();
        self
    }

    /// Reconcile the displayed lines against the current mark set and
    /// start their animations. Returns immediately.
    pub fn render(&mut self, transition: &Transition, now: f64) {
        let mut pool = std::mem::take(&mut self.lines);
        let mut next = Vec::with_capacity(self.marks.len());

        for &x in &self.marks {
            let existing = pool
                .iter()
                .position(|line| line.x.target().to_bits() == x.to_bits());
            let mut line = match existing {
                Some(i) => pool.swap_remove(i),
                None => MarkLine {
                    // New marks enter from the right edge.
                    x: Tween::fixed(self.width),
                },
            };
            line.x.retarget(x, transition, now);
            next.push(line);
        }

        // Whatever is left in the pool has no counterpart in the new set
        // and is removed without animation.
        self.lines = next;
    }

    /// Pixel positions of the displayed lines at `now`, in mark order.
    pub fn line_positions_at(&self, now: f64) -> Vec<f32> {
        self.lines.iter().map(|line| line.x.value_at(now)).collect()
    }

    pub fn is_settled(&self, now: f64) -> bool {
        self.lines.iter().all(|line| line.x.is_settled(now))
    }

    pub fn paint(&self, painter: &egui::Painter, plot: egui::Rect, now: f64) {
        let stroke = Stroke::new(0.5, Color32::from_gray(128).gamma_multiply(0.5));
        for line in &self.lines {
            let x = plot.left() + line.x.value_at(now);
            painter.line_segment(
                [egui::pos2(x, plot.top()), egui::pos2(x, plot.bottom())],
                stroke,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Margin, Size};
    use crate::samples::SampleBuffer;

    fn axes_100x50() -> ScaledAxes {
        let frame = PlotFrame::new(
            Size {
                width: 100.0,
                height: 50.0,
            },
            Margin {
                top: 0.0,
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            },
        );
        let mut axes = ScaledAxes::new(frame);
        // duration 2s over 100px
        axes.rescale(&SampleBuffer::new(vec![0.0, 10.0, 0.0, -10.0], 2.0).unwrap());
        axes
    }

    fn overlay() -> MarkOverlay {
        let frame = PlotFrame::new(
            Size {
                width: 100.0,
                height: 50.0,
            },
            Margin {
                top: 0.0,
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            },
        );
        MarkOverlay::new(&frame)
    }

    #[test]
    fn marks_project_through_time_scale() {
        let axes = axes_100x50();
        let mut marks = overlay();
        marks.set_marks(&[0.5, 1.0], &axes);
        marks.render(&Transition::immediate(), 0.0);
        assert_eq!(marks.line_positions_at(0.0), vec![25.0, 50.0]);
    }

    #[test]
    fn new_marks_enter_from_the_right_edge() {
        let axes = axes_100x50();
        let mut marks = overlay();
        marks.set_marks(&[1.0], &axes);
        marks.render(&Transition::new(1000.0), 0.0);

        // At the start of the transition the line still sits at the edge.
        assert_eq!(marks.line_positions_at(0.0), vec![100.0]);
        assert_eq!(marks.line_positions_at(2.0), vec![50.0]);
    }

    #[test]
    fn overlapping_update_keeps_elements_in_place() {
        let axes = axes_100x50();
        let mut marks = overlay();

        marks.set_marks(&[0.5, 1.0], &axes);
        marks.render(&Transition::immediate(), 0.0);

        // [0.5, 1.0] -> [1.0, 1.5]: 1.0 is retained and stays put, 0.5 is
        // removed immediately, 1.5 slides in from the right.
        marks.set_marks(&[1.0, 1.5], &axes);
        marks.render(&Transition::new(1000.0), 1.0);

        let at_start = marks.line_positions_at(1.0);
        assert_eq!(at_start.len(), 2);
        assert_eq!(at_start[0], 50.0); // retained, already in place
        assert_eq!(at_start[1], 100.0); // entering from the edge

        let settled = marks.line_positions_at(3.0);
        assert_eq!(settled, vec![50.0, 75.0]);
    }

    #[test]
    fn dropped_marks_disappear_without_animation() {
        let axes = axes_100x50();
        let mut marks = overlay();

        marks.set_marks(&[0.5, 1.0, 1.5], &axes);
        marks.render(&Transition::immediate(), 0.0);
        assert_eq!(marks.line_positions_at(0.0).len(), 3);

        marks.set_marks(&[1.0], &axes);
        marks.render(&Transition::new(1000.0), 0.0);
        assert_eq!(marks.line_positions_at(0.0), vec![50.0]);
    }

    #[test]
    fn duplicate_marks_each_get_a_line() {
        let axes = axes_100x50();
        let mut marks = overlay();
        marks.set_marks(&[1.0, 1.0], &axes);
        marks.render(&Transition::immediate(), 0.0);
        assert_eq!(marks.line_positions_at(0.0), vec![50.0, 50.0]);
    }
}

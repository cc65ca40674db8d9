use std::sync::Arc;

use egui::{Color32, Stroke};

use crate::samples::SampleBuffer;
use crate::scale::ScaledAxes;
use crate::transition::{Transition, Tween};

/// Connected line through the sample sequence, one vertex per sample in
/// index order. Straight segments only, no smoothing.
pub struct WaveformPath {
    /// Buffer backing the current geometry, retained for the render
    /// passes that use it.
    _sound: Option<Arc<SampleBuffer>>,
    /// Geometry as displayed before the current transition started.
    shape_from: Vec<(f32, f32)>,
    /// Geometry the current transition is heading toward.
    shape_to: Vec<(f32, f32)>,
    /// Pending geometry from `set_sound`, picked up on the next render.
    pending: Option<Vec<(f32, f32)>>,
    morph: Tween,
}

impl WaveformPath {
    pub fn new() -> Self {
        Self {
            _sound: None,
            shape_from: Vec::new(),
            shape_to: Vec::new(),
            pending: None,
            morph: Tween::fixed(1.0),
        }
    }

    /// Replace the displayed sound. The old reference is fully consumed
    /// (its projected geometry is captured) before the new one is stored.
    pub fn set_sound(&mut self, sound: &Arc<SampleBuffer>, axes: &ScaledAxes) -> &mut Self {
        let scale_x = axes.scale_x();
        let scale_y = axes.scale_y();
        let rate = sound.rate();

        let points = sound
            .samples()
            .iter()
            .enumerate()
            .map(|(i, &s)| (scale_x.apply(i as f32 / rate), scale_y.apply(s)))
            .collect();

        self.pending = Some(points);
        self._sound = Some(sound.clone());
        self
    }

    /// Start morphing the drawn path from its current geometry to the
    /// most recently set one. Returns immediately.
    pub fn render(&mut self, transition: &Transition, now: f64) {
        let Some(target) = self.pending.take() else {
            return;
        };
        self.shape_from = self.shape_at(now);
        self.shape_to = target;
        self.morph = Tween::fixed(0.0);
        self.morph.retarget(1.0, transition, now);
    }

    pub fn is_settled(&self, now: f64) -> bool {
        self.morph.is_settled(now)
    }

    /// The path geometry as displayed at `now`, mid-morph. Vertices of the
    /// two shapes are matched up by normalized index, so buffers of
    /// different lengths still interpolate pairwise.
    pub fn shape_at(&self, now: f64) -> Vec<(f32, f32)> {
        let progress = self.morph.value_at(now);
        if progress >= 1.0 || self.shape_from.is_empty() {
            return self.shape_to.clone();
        }

        let n = self.shape_from.len().max(self.shape_to.len());
        (0..n)
            .map(|i| {
                let u = if n > 1 {
                    i as f32 / (n - 1) as f32
                } else {
                    0.0
                };
                let (fx, fy) = point_along(&self.shape_from, u);
                let (tx, ty) = point_along(&self.shape_to, u);
                (
                    egui::lerp(fx..=tx, progress),
                    egui::lerp(fy..=ty, progress),
                )
            })
            .collect()
    }

    pub fn paint(&self, painter: &egui::Painter, plot: egui::Rect, now: f64) {
        let shape = self.shape_at(now);
        if shape.len() < 2 {
            return;
        }
        let points: Vec<egui::Pos2> = shape
            .iter()
            .map(|&(x, y)| egui::pos2(plot.left() + x, plot.top() + y))
            .collect();
        painter.add(egui::Shape::line(
            points,
            Stroke::new(1.5, Color32::from_rgb(70, 130, 180)),
        ));
    }
}

impl Default for WaveformPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Point at normalized position `u` in [0,1] along the vertex list,
/// interpolating linearly between neighbors.
fn point_along(shape: &[(f32, f32)], u: f32) -> (f32, f32) {
    match shape.len() {
        0 => (0.0, 0.0),
        1 => shape[0],
        len => {
            let pos = u.clamp(0.0, 1.0) * (len - 1) as f32;
            let i = (pos.floor() as usize).min(len - 2);
            let frac = pos - i as f32;
            let (ax, ay) = shape[i];
            let (bx, by) = shape[i + 1];
            (
                egui::lerp(ax..=bx, frac),
                egui::lerp(ay..=by, frac),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Margin, PlotFrame, Size};

    fn axes_for(sound: &SampleBuffer) -> ScaledAxes {
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
        axes.rescale(sound);
        axes
    }

    #[test]
    fn projects_samples_in_index_order() {
        let sound = Arc::new(SampleBuffer::new(vec![0.0, 10.0, 0.0, -10.0], 2.0).unwrap());
        let axes = axes_for(&sound);

        let mut path = WaveformPath::new();
        path.set_sound(&sound, &axes);
        path.render(&Transition::immediate(), 0.0);

        let shape = path.shape_at(0.0);
        assert_eq!(shape.len(), 4);
        // x positions: i / rate scaled over [0, duration] -> [0, 100]
        assert_eq!(shape[0], (0.0, 25.0));
        assert_eq!(shape[1], (25.0, 0.0));
        assert_eq!(shape[2], (50.0, 25.0));
        assert_eq!(shape[3], (75.0, 50.0));
    }

    #[test]
    fn morph_interpolates_between_old_and_new_geometry() {
        let first = Arc::new(SampleBuffer::new(vec![-1.0, 1.0], 1.0).unwrap());
        let second = Arc::new(SampleBuffer::new(vec![1.0, -1.0], 1.0).unwrap());

        let mut axes = axes_for(&first);
        let mut path = WaveformPath::new();
        path.set_sound(&first, &axes);
        path.render(&Transition::immediate(), 0.0);

        axes.rescale(&second);
        path.set_sound(&second, &axes);
        path.render(&Transition::new(1000.0), 0.0);

        // Halfway through, each vertex sits midway between shapes.
        let shape = path.shape_at(0.5);
        assert_eq!(shape[0].1, 25.0);
        assert_eq!(shape[1].1, 25.0);

        // After the transition, the new geometry is shown exactly.
        let done = path.shape_at(2.0);
        assert_eq!(done[0], (0.0, 0.0));
        assert_eq!(done[1], (50.0, 50.0));
    }

    #[test]
    fn render_without_new_sound_keeps_geometry() {
        let sound = Arc::new(SampleBuffer::new(vec![0.0, 1.0], 1.0).unwrap());
        let axes = axes_for(&sound);
        let mut path = WaveformPath::new();
        path.set_sound(&sound, &axes);
        path.render(&Transition::immediate(), 0.0);
        let before = path.shape_at(1.0);

        path.render(&Transition::new(500.0), 1.0);
        assert_eq!(path.shape_at(1.0), before);
    }
}

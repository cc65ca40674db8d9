use egui::{Align2, Color32, FontId, Stroke};

use crate::geometry::PlotFrame;
use crate::samples::SampleBuffer;
use crate::transition::{Transition, Tween};

/// Linear mapping from a data domain to a pixel range. Pure: applying it
/// never mutates anything, so other components can keep using it between
/// rescales.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f32, f32) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn apply(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            // Degenerate domain (constant-value buffer): map everything to
            // the middle of the range instead of dividing by zero.
            return (r0 + r1) / 2.0;
        }
        let t = (value - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }

    /// Round tick positions covering the domain, roughly `count` of them.
    /// Steps are 1/2/5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let span = hi - lo;
        if span <= 0.0 || count == 0 {
            return vec![lo];
        }

        let raw_step = span / count as f32;
        let magnitude = 10.0_f32.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let step = if residual >= 5.0 {
            10.0 * magnitude
        } else if residual >= 2.0 {
            5.0 * magnitude
        } else if residual >= 1.0 {
            2.0 * magnitude
        } else {
            magnitude
        };

        let first = (lo / step).ceil();
        let last = (hi / step).floor();
        (first as i64..=last as i64)
            .map(|i| i as f32 * step)
            .collect()
    }
}

/// Time axis along the bottom, amplitude axis on the left. Keeps track of
/// how to scale data values to rendering positions; rebuilt per sample
/// buffer, never mutated in place.
pub struct ScaledAxes {
    frame: PlotFrame,
    scale_x: LinearScale,
    scale_y: LinearScale,
    // Animated copies of the domain endpoints, sampled when painting so
    // the tick displays glide from the old scale to the new one.
    anim_duration: Tween,
    anim_y_min: Tween,
    anim_y_max: Tween,
}

impl ScaledAxes {
    pub fn new(frame: PlotFrame) -> Self {
        Self {
            frame,
            scale_x: LinearScale::new((0.0, 0.0), (0.0, frame.width)),
            scale_y: LinearScale::new((0.0, 0.0), (frame.height, 0.0)),
            anim_duration: Tween::fixed(0.0),
            anim_y_min: Tween::fixed(0.0),
            anim_y_max: Tween::fixed(0.0),
        }
    }

    /// Adjust both scales to match the given sound data.
    pub fn rescale(&mut self, sound: &SampleBuffer) -> &mut Self {
        let (min, max) = sound.min_max();
        self.scale_x = LinearScale::new((0.0, sound.duration()), (0.0, self.frame.width));
        self.scale_y = LinearScale::new((min, max), (self.frame.height, 0.0));
        self
    }

    /// Start animating the tick displays toward the current scales.
    /// Returns immediately; painting samples the animation over time.
    pub fn render(&mut self, transition: &Transition, now: f64) {
        self.anim_duration
            .retarget(self.scale_x.domain().1, transition, now);
        let (min, max) = self.scale_y.domain();
        self.anim_y_min.retarget(min, transition, now);
        self.anim_y_max.retarget(max, transition, now);
    }

    /// Target time scale: `[0, duration]` to `[0, plot width]`.
    pub fn scale_x(&self) -> LinearScale {
        self.scale_x
    }

    /// Target amplitude scale, inverted so larger values render higher.
    pub fn scale_y(&self) -> LinearScale {
        self.scale_y
    }

    pub fn is_settled(&self, now: f64) -> bool {
        self.anim_duration.is_settled(now)
            && self.anim_y_min.is_settled(now)
            && self.anim_y_max.is_settled(now)
    }

    pub fn paint(&self, painter: &egui::Painter, plot: egui::Rect, now: f64) {
        let axis_color = Color32::from_gray(140);
        let stroke = Stroke::new(1.0, axis_color);
        let font = FontId::monospace(9.0);
        let tick_len = 5.0;

        // Scales as currently displayed, mid-animation.
        let shown_x = LinearScale::new(
            (0.0, self.anim_duration.value_at(now)),
            (0.0, self.frame.width),
        );
        let shown_y = LinearScale::new(
            (self.anim_y_min.value_at(now), self.anim_y_max.value_at(now)),
            (self.frame.height, 0.0),
        );

        // Time axis along the bottom edge.
        painter.line_segment(
            [plot.left_bottom(), plot.right_bottom()],
            stroke,
        );
        for tick in shown_x.ticks(6) {
            let x = plot.left() + shown_x.apply(tick);
            painter.line_segment(
                [
                    egui::pos2(x, plot.bottom()),
                    egui::pos2(x, plot.bottom() + tick_len),
                ],
                stroke,
            );
            painter.text(
                egui::pos2(x, plot.bottom() + tick_len + 2.0),
                Align2::CENTER_TOP,
                format_tick(tick),
                font.clone(),
                axis_color,
            );
        }

        // Amplitude axis along the left edge.
        painter.line_segment([plot.left_top(), plot.left_bottom()], stroke);
        for tick in shown_y.ticks(4) {
            let y = plot.top() + shown_y.apply(tick);
            painter.line_segment(
                [
                    egui::pos2(plot.left() - tick_len, y),
                    egui::pos2(plot.left(), y),
                ],
                stroke,
            );
            painter.text(
                egui::pos2(plot.left() - tick_len - 2.0, y),
                Align2::RIGHT_CENTER,
                format_tick(tick),
                font.clone(),
                axis_color,
            );
        }
    }
}

fn format_tick(value: f32) -> String {
    if value == 0.0 {
        "0".to_owned()
    } else if value.abs() >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

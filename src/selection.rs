use egui::{Color32, Stroke};
use log::debug;

use crate::geometry::PlotFrame;
use crate::samples::SampleBuffer;

pub type SelectionCallback = Box<dyn FnMut(f32)>;

/// Transparent interactive surface over the plot: tracks a transient
/// cursor line while the pointer hovers, keeps a persisted marker at the
/// last clicked position, and reports each selection as a clamped time
/// offset to every registered callback.
///
/// The cursor (Idle/Hovering) and the marker (NoSelection/Selected) are
/// independent: the cursor can hover while an earlier marker stays
/// visible. Both are presentational only and are reset whenever the
/// underlying buffer changes, since pixel positions computed against the
/// old duration are meaningless for new data.
pub struct SelectionOverlay {
    duration: f32,
    width: f32,
    cursor_x: f32,
    cursor_opacity: f32,
    marker_x: f32,
    marker_opacity: f32,
    callbacks: Vec<SelectionCallback>,
}

impl SelectionOverlay {
    pub fn new(frame: &PlotFrame, sound: &SampleBuffer) -> Self {
        Self {
            duration: sound.duration(),
            width: frame.width,
            cursor_x: 0.0,
            cursor_opacity: 0.0,
            marker_x: 0.0,
            marker_opacity: 0.0,
            callbacks: Vec::new(),
        }
    }

    /// Register a callback invoked on every selection, in registration
    /// order. There is no de-registration.
    pub fn add_callback(&mut self, callback: SelectionCallback) {
        self.callbacks.push(callback);
    }

    pub fn pointer_enter(&mut self, x: f32) {
        self.cursor_x = x;
        self.cursor_opacity = 1.0;
    }

    pub fn pointer_move(&mut self, x: f32) {
        if self.cursor_opacity > 0.0 {
            self.cursor_x = x;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.cursor_opacity = 0.0;
    }

    /// Handle a selection at pixel offset `x`. The reported time is
    /// clamped to `[0, duration]`, but the marker keeps the exact pixel
    /// the user clicked, even past the axis edge. Overlay state is
    /// committed before callbacks run, so a panicking callback cannot
    /// leave the marker behind.
    pub fn click(&mut self, x: f32) {
        let unbounded = if self.width > 0.0 {
            (x / self.width) * self.duration
        } else {
            0.0
        };
        let selected = unbounded.clamp(0.0, self.duration.max(0.0));

        self.marker_x = x;
        self.marker_opacity = 0.5;

        debug!("Selected time {selected:.3}s at pixel x={x:.1}");
        for callback in &mut self.callbacks {
            callback(selected);
        }
    }

    /// Clear the selection for a new buffer. Expected to be called
    /// whenever the displayed data changes such that the last selection
    /// becomes invalid.
    pub fn reset(&mut self, sound: &SampleBuffer) {
        self.duration = sound.duration();
        self.cursor_opacity = 0.0;
        self.marker_opacity = 0.0;
    }

    pub fn cursor_opacity(&self) -> f32 {
        self.cursor_opacity
    }

    pub fn marker_opacity(&self) -> f32 {
        self.marker_opacity
    }

    pub fn marker_x(&self) -> f32 {
        self.marker_x
    }

    pub fn paint(&self, painter: &egui::Painter, plot: egui::Rect) {
        if self.cursor_opacity > 0.0 {
            let x = plot.left() + self.cursor_x;
            painter.line_segment(
                [egui::pos2(x, plot.top()), egui::pos2(x, plot.bottom())],
                Stroke::new(0.5, red_with_opacity(self.cursor_opacity)),
            );
        }
        if self.marker_opacity > 0.0 {
            let x = plot.left() + self.marker_x;
            painter.line_segment(
                [egui::pos2(x, plot.top()), egui::pos2(x, plot.bottom())],
                Stroke::new(0.5, red_with_opacity(self.marker_opacity)),
            );
        }
    }
}

fn red_with_opacity(opacity: f32) -> Color32 {
    Color32::RED.gamma_multiply(opacity)
}

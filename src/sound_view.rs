use std::sync::Arc;

use log::debug;

use crate::geometry::PlotFrame;
use crate::highlights::MarkOverlay;
use crate::samples::SampleBuffer;
use crate::scale::ScaledAxes;
use crate::selection::{SelectionCallback, SelectionOverlay};
use crate::transition::Transition;
use crate::waveform::WaveformPath;

/// Composite view drawing sound samples with axes and highlight marks,
/// and letting the user select a time point.
///
/// Owns one instance of every part; none of them holds a reference back.
/// External updates (new samples, new marks, new transition time) flow in
/// through the setters here; selections flow out through the callbacks
/// registered on the selection overlay.
pub struct SoundView {
    frame: PlotFrame,
    transition_ms: f32,
    axes: ScaledAxes,
    path: WaveformPath,
    selection: SelectionOverlay,
    highlights: MarkOverlay,
}

impl SoundView {
    /// Build the view and perform one immediate render pass of axes,
    /// waveform, selection overlay and highlights, in that order.
    pub fn new(
        frame: PlotFrame,
        transition_ms: f32,
        sound: Arc<SampleBuffer>,
        marks: &[f32],
        now: f64,
    ) -> Self {
        let mut axes = ScaledAxes::new(frame);
        axes.rescale(&sound);

        let mut path = WaveformPath::new();
        path.set_sound(&sound, &axes);

        let selection = SelectionOverlay::new(&frame, &sound);

        let mut highlights = MarkOverlay::new(&frame);
        highlights.set_marks(marks, &axes);

        let immediate = Transition::immediate();
        axes.render(&immediate, now);
        path.render(&immediate, now);
        highlights.render(&immediate, now);

        Self {
            frame,
            transition_ms,
            axes,
            path,
            selection,
            highlights,
        }
    }

    /// Register a callback for when the user makes a selection.
    pub fn add_callback(&mut self, callback: SelectionCallback) -> &mut Self {
        self.selection.add_callback(callback);
        self
    }

    /// Highlight a new set of time points, projected against the current
    /// axes and animated.
    pub fn set_marks(&mut self, marks: &[f32], now: f64) {
        let transition = self.transition();
        self.highlights.set_marks(marks, &self.axes);
        self.highlights.render(&transition, now);
    }

    /// Display a new set of sound samples: rescale the axes, clear any
    /// existing selection, and morph the rendered line, all animated.
    pub fn set_sound(&mut self, sound: Arc<SampleBuffer>, now: f64) {
        debug!(
            "Displaying new buffer: {} samples at {} Hz",
            sound.samples().len(),
            sound.rate()
        );
        let transition = self.transition();

        self.axes.rescale(&sound);
        self.axes.render(&transition, now);

        self.selection.reset(&sound);

        self.path.set_sound(&sound, &self.axes);
        self.path.render(&transition, now);
    }

    /// Set how long future animated transitions take. Does not retarget
    /// an in-flight animation.
    pub fn set_transition_time(&mut self, millis: f32) {
        self.transition_ms = millis.max(0.0);
    }

    pub fn pointer_enter(&mut self, x: f32) {
        self.selection.pointer_enter(x);
    }

    pub fn pointer_move(&mut self, x: f32) {
        self.selection.pointer_move(x);
    }

    pub fn pointer_leave(&mut self) {
        self.selection.pointer_leave();
    }

    pub fn click(&mut self, x: f32) {
        self.selection.click(x);
    }

    pub fn frame(&self) -> PlotFrame {
        self.frame
    }

    pub fn selection(&self) -> &SelectionOverlay {
        &self.selection
    }

    pub fn highlights(&self) -> &MarkOverlay {
        &self.highlights
    }

    pub fn axes(&self) -> &ScaledAxes {
        &self.axes
    }

    /// Whether any animation is still running at `now`; callers keep
    /// repainting until everything has settled.
    pub fn is_animating(&self, now: f64) -> bool {
        !(self.axes.is_settled(now)
            && self.path.is_settled(now)
            && self.highlights.is_settled(now))
    }

    pub fn paint(&self, painter: &egui::Painter, outer: egui::Rect, now: f64) {
        let plot = self.frame.rect_in(outer);
        self.axes.paint(painter, plot, now);
        self.path.paint(&painter.with_clip_rect(plot.expand(1.0)), plot, now);
        self.highlights.paint(painter, plot, now);
        self.selection.paint(painter, plot);
    }

    fn transition(&self) -> Transition {
        Transition::new(self.transition_ms)
    }
}

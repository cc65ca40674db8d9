use std::sync::Arc;

use log::debug;

use crate::geometry::{Margin, Size};
use crate::samples::SampleBuffer;

/// Names of the model values the view reacts to when they change.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModelChange {
    Data,
    Marks,
    TransitionTime,
}

/// Narrow interface to the host's reactive key-value model. The widget
/// reads every value once at construction, re-reads the named value on
/// each drained change notification, and pushes selections back out
/// through `set_selection` + `save_changes` (fire-and-forget).
pub trait HostModel {
    fn size(&self) -> Size;
    fn margin(&self) -> Margin;
    /// Transition time for animated updates, in milliseconds.
    fn transition_time(&self) -> f32;
    fn data(&self) -> Arc<SampleBuffer>;
    fn marks(&self) -> Vec<f32>;

    /// Record a selected time offset, in seconds.
    fn set_selection(&mut self, time: f32);
    /// Ask the host to synchronize pending values to the remote side.
    fn save_changes(&mut self);

    /// Drain change notifications accumulated since the last call, in
    /// the order they were raised.
    fn take_changes(&mut self) -> Vec<ModelChange>;
}

/// In-process model used by the demo application and tests.
pub struct InMemoryModel {
    size: Size,
    margin: Margin,
    transition_time: f32,
    data: Arc<SampleBuffer>,
    marks: Vec<f32>,
    selection: Option<f32>,
    synced_selection: Option<f32>,
    pending: Vec<ModelChange>,
}

impl InMemoryModel {
    pub fn new(data: Arc<SampleBuffer>) -> Self {
        Self {
            size: Size::default(),
            margin: Margin::default(),
            transition_time: 500.0,
            data,
            marks: Vec::new(),
            selection: None,
            synced_selection: None,
            pending: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_transition_time(mut self, millis: f32) -> Self {
        self.transition_time = millis;
        self
    }

    pub fn with_marks(mut self, marks: Vec<f32>) -> Self {
        self.marks = marks;
        self
    }

    /// Replace the sample data and raise a change notification.
    pub fn replace_data(&mut self, data: Arc<SampleBuffer>) {
        self.data = data;
        self.pending.push(ModelChange::Data);
    }

    pub fn replace_marks(&mut self, marks: Vec<f32>) {
        self.marks = marks;
        self.pending.push(ModelChange::Marks);
    }

    pub fn replace_transition_time(&mut self, millis: f32) {
        self.transition_time = millis;
        self.pending.push(ModelChange::TransitionTime);
    }

    /// Last selection that was saved with `save_changes`.
    pub fn selection(&self) -> Option<f32> {
        self.synced_selection
    }
}

impl HostModel for InMemoryModel {
    fn size(&self) -> Size {
        self.size
    }

    fn margin(&self) -> Margin {
        self.margin
    }

    fn transition_time(&self) -> f32 {
        self.transition_time
    }

    fn data(&self) -> Arc<SampleBuffer> {
        self.data.clone()
    }

    fn marks(&self) -> Vec<f32> {
        self.marks.clone()
    }

    fn set_selection(&mut self, time: f32) {
        self.selection = Some(time);
    }

    fn save_changes(&mut self) {
        if let Some(time) = self.selection {
            debug!("Syncing selection {time:.3}s");
        }
        self.synced_selection = self.selection;
    }

    fn take_changes(&mut self) -> Vec<ModelChange> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> InMemoryModel {
        let data = Arc::new(SampleBuffer::new(vec![0.0, 1.0], 1.0).unwrap());
        InMemoryModel::new(data)
    }

    #[test]
    fn changes_drain_in_order() {
        let mut model = model();
        model.replace_marks(vec![0.5]);
        model.replace_transition_time(250.0);

        assert_eq!(
            model.take_changes(),
            vec![ModelChange::Marks, ModelChange::TransitionTime]
        );
        assert!(model.take_changes().is_empty());
    }

    #[test]
    fn selection_is_visible_only_after_save() {
        let mut model = model();
        model.set_selection(1.25);
        assert_eq!(model.selection(), None);

        model.save_changes();
        assert_eq!(model.selection(), Some(1.25));
    }

    #[test]
    fn defaults_match_the_widget_contract() {
        let model = model();
        assert_eq!(model.size(), Size::default());
        assert_eq!(model.margin(), Margin::default());
        assert_eq!(model.transition_time(), 500.0);
    }
}

use std::sync::{Arc, Mutex};

use egui::Sense;
use log::debug;

use crate::geometry::PlotFrame;
use crate::model::{HostModel, ModelChange};
use crate::sound_view::SoundView;

/// Binds a [`SoundView`] to a host model inside an egui UI: drains model
/// change notifications into the view, translates pointer state over the
/// plot rectangle into the view's pointer events, and forwards each
/// selection back to the model.
pub struct SoundViewWidget<M: HostModel> {
    model: M,
    view: SoundView,
    pending_selections: Arc<Mutex<Vec<f32>>>,
    hovering: bool,
}

impl<M: HostModel> SoundViewWidget<M> {
    pub fn new(model: M) -> Self {
        let frame = PlotFrame::new(model.size(), model.margin());
        let mut view = SoundView::new(
            frame,
            model.transition_time(),
            model.data(),
            &model.marks(),
            0.0,
        );

        // Selections land in a queue during event dispatch and are
        // flushed to the model afterwards, keeping the model borrowable
        // while the view's callbacks run.
        let pending_selections = Arc::new(Mutex::new(Vec::new()));
        let queue = pending_selections.clone();
        view.add_callback(Box::new(move |time| {
            queue.lock().unwrap().push(time);
        }));

        Self {
            model,
            view,
            pending_selections,
            hovering: false,
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let now = ui.input(|i| i.time);
        self.apply_model_changes(now);

        let size = self.model.size();
        let (outer, response) =
            ui.allocate_exact_size(egui::vec2(size.width, size.height), Sense::hover());
        let plot = self.view.frame().rect_in(outer);

        // Transparent overlay tracking pointer events over the data area.
        let overlay = ui.interact(plot, response.id.with("selection_overlay"), Sense::click());
        if let Some(pos) = overlay.hover_pos() {
            let x = pos.x - plot.left();
            if self.hovering {
                self.view.pointer_move(x);
            } else {
                self.view.pointer_enter(x);
                self.hovering = true;
            }
        } else if self.hovering {
            self.view.pointer_leave();
            self.hovering = false;
        }
        if overlay.clicked()
            && let Some(pos) = overlay.interact_pointer_pos()
        {
            self.view.click(pos.x - plot.left());
        }

        if ui.is_rect_visible(outer) {
            self.view.paint(ui.painter(), outer, now);
        }

        self.flush_selections();

        if self.view.is_animating(now) {
            ui.ctx().request_repaint();
        }

        response.union(overlay)
    }

    /// Re-read every model value a drained change notification names.
    fn apply_model_changes(&mut self, now: f64) {
        for change in self.model.take_changes() {
            debug!("Applying model change: {change:?}");
            match change {
                ModelChange::Data => self.view.set_sound(self.model.data(), now),
                ModelChange::Marks => self.view.set_marks(&self.model.marks(), now),
                ModelChange::TransitionTime => {
                    self.view.set_transition_time(self.model.transition_time())
                }
            }
        }
    }

    fn flush_selections(&mut self) {
        let selections: Vec<f32> = self.pending_selections.lock().unwrap().drain(..).collect();
        for time in selections {
            self.model.set_selection(time);
            self.model.save_changes();
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn view(&self) -> &SoundView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut SoundView {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::geometry::{Margin, Size};
    use crate::model::InMemoryModel;
    use crate::samples::SampleBuffer;

    fn widget() -> SoundViewWidget<InMemoryModel> {
        let data = Arc::new(SampleBuffer::new(vec![0.0, 10.0, 0.0, -10.0], 2.0).unwrap());
        let model = InMemoryModel::new(data)
            .with_size(Size {
                width: 100.0,
                height: 50.0,
            })
            .with_margin(Margin {
                top: 0.0,
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            })
            .with_transition_time(0.0);
        SoundViewWidget::new(model)
    }

    #[test]
    fn selection_flows_back_to_the_model() {
        let mut widget = widget();
        widget.view_mut().click(50.0);
        assert_eq!(widget.model().selection(), None);

        widget.flush_selections();
        assert_eq!(widget.model().selection(), Some(1.0));
    }

    #[test]
    fn data_change_rescales_the_view() {
        let mut widget = widget();
        assert_eq!(widget.view().axes().scale_x().apply(2.0), 100.0);

        let next = Arc::new(SampleBuffer::new(vec![0.0; 8], 2.0).unwrap());
        widget.model_mut().replace_data(next);
        widget.apply_model_changes(0.0);

        // Duration is 4 seconds now.
        assert_eq!(widget.view().axes().scale_x().apply(4.0), 100.0);
        assert_eq!(widget.view().selection().marker_opacity(), 0.0);
    }

    #[test]
    fn marks_change_reprojects_highlights() {
        let mut widget = widget();
        widget.model_mut().replace_marks(vec![1.0, 1.5]);
        widget.apply_model_changes(0.0);

        assert_eq!(
            widget.view().highlights().line_positions_at(0.0),
            vec![50.0, 75.0]
        );
    }

    #[test]
    fn transition_time_change_affects_future_updates() {
        let mut widget = widget();
        widget.model_mut().replace_transition_time(1000.0);
        widget.apply_model_changes(0.0);

        widget.model_mut().replace_marks(vec![1.0]);
        widget.apply_model_changes(1.0);
        assert!(widget.view().is_animating(1.5));
    }
}

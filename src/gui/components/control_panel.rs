use eframe::egui;

use crate::gui::app_state::Preset;

/// Pending demo settings edited by the control panel; applied to the
/// widget's model when the user hits Apply.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DemoControls {
    pub preset: Preset,
    pub transition_ms: f32,
    pub track_selections: bool,
}

pub fn render_control_panel(ui: &mut egui::Ui, controls: &mut DemoControls) {
    ui.label(egui::RichText::new("Configuration").size(16.0));
    ui.add_space(8.0);

    egui::CollapsingHeader::new("Chart Settings")
        .default_open(true)
        .show(ui, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("chart_settings_grid")
                .num_columns(2)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Sound:")
                        .on_hover_text("Synthetic sample buffer to display");
                    egui::ComboBox::from_id_salt("preset_selector")
                        .selected_text(controls.preset.label())
                        .show_ui(ui, |ui| {
                            for preset in Preset::ALL {
                                ui.selectable_value(&mut controls.preset, preset, preset.label());
                            }
                        });
                    ui.end_row();

                    ui.label("Transition Time:")
                        .on_hover_text("How long animated updates take to complete");
                    ui.add(
                        egui::Slider::new(&mut controls.transition_ms, 0.0..=2000.0).suffix(" ms"),
                    );
                    ui.end_row();

                    ui.label("Highlight Selections:")
                        .on_hover_text("Show recent selections as marks on the chart");
                    ui.checkbox(&mut controls.track_selections, "");
                    ui.end_row();
                });
        });

    ui.add_space(20.0);
}

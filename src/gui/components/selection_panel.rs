use eframe::egui;

pub fn render_selection_panel(ui: &mut egui::Ui, selection: Option<f32>, recent: &[f32]) {
    ui.label(egui::RichText::new("Selection").size(16.0));
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label("Last selection:");
            match selection {
                Some(time) => {
                    ui.strong(format!("{time:.3} s"));
                }
                None => {
                    ui.colored_label(egui::Color32::GRAY, "none");
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Recent:");
            if recent.is_empty() {
                ui.colored_label(egui::Color32::GRAY, "-");
            } else {
                let formatted: Vec<String> =
                    recent.iter().map(|t| format!("{t:.2}")).collect();
                ui.strong(formatted.join(", "));
            }
        });
    });
}

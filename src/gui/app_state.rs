use std::collections::VecDeque;
use std::f32::consts::TAU;
use std::sync::Arc;

use anyhow::Context;
use eframe::egui;
use log::{debug, info};
use wavesel::{InMemoryModel, SampleBuffer, SampleDataError, SoundViewWidget};

use super::components::{DemoControls, render_control_panel, render_selection_panel};

pub const APP_VERSION: &str = "v0.1.0";

const DEMO_RATE: f32 = 256.0;
const DEMO_SAMPLES: usize = 512;
const RECENT_SELECTION_LIMIT: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Preset {
    SineSweep,
    TwoTones,
    Square,
    PluckDecay,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::SineSweep,
        Preset::TwoTones,
        Preset::Square,
        Preset::PluckDecay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::SineSweep => "Sine sweep",
            Preset::TwoTones => "Two tones",
            Preset::Square => "Square",
            Preset::PluckDecay => "Pluck decay",
        }
    }
}

fn preset_buffer(preset: Preset) -> Result<SampleBuffer, SampleDataError> {
    let samples = (0..DEMO_SAMPLES)
        .map(|i| {
            let t = i as f32 / DEMO_RATE;
            match preset {
                Preset::SineSweep => (TAU * t * (1.0 + 1.5 * t)).sin(),
                Preset::TwoTones => 0.6 * (TAU * 3.0 * t).sin() + 0.4 * (TAU * 11.0 * t).sin(),
                Preset::Square => {
                    if (TAU * 2.0 * t).sin() >= 0.0 {
                        0.8
                    } else {
                        -0.8
                    }
                }
                Preset::PluckDecay => (TAU * 6.0 * t).sin() * (-1.5 * t).exp(),
            }
        })
        .collect();
    SampleBuffer::new(samples, DEMO_RATE)
}

pub struct AppState {
    widget: SoundViewWidget<InMemoryModel>,
    active_controls: DemoControls,
    pending_controls: DemoControls, // Local copy for the control panel
    recent_selections: VecDeque<f32>,
    last_synced_selection: Option<f32>,
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_panel(ctx);
        self.render_bottom_panel(ctx);
        self.render_central_panel(ctx);

        ctx.request_repaint();
    }
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        debug!("Initializing GUI state...");

        let controls = DemoControls {
            preset: Preset::SineSweep,
            transition_ms: 500.0,
            track_selections: true,
        };

        let data = Arc::new(preset_buffer(controls.preset).context("building demo sound")?);
        info!(
            "Loaded preset '{}': {} samples at {} Hz",
            controls.preset.label(),
            DEMO_SAMPLES,
            DEMO_RATE
        );

        let model = InMemoryModel::new(data).with_transition_time(controls.transition_ms);
        let widget = SoundViewWidget::new(model);

        Ok(Self {
            widget,
            active_controls: controls,
            pending_controls: controls,
            recent_selections: VecDeque::new(),
            last_synced_selection: None,
        })
    }

    fn apply_settings(&mut self) {
        debug!("Applying settings: {:?}", self.pending_controls);

        if self.pending_controls.preset != self.active_controls.preset {
            match preset_buffer(self.pending_controls.preset) {
                Ok(buffer) => {
                    self.widget.model_mut().replace_data(Arc::new(buffer));
                    self.recent_selections.clear();
                    self.widget.model_mut().replace_marks(Vec::new());
                    info!(
                        "Switched to preset '{}'",
                        self.pending_controls.preset.label()
                    );
                }
                Err(err) => {
                    log::error!("Could not build preset sound: {err}");
                    self.pending_controls.preset = self.active_controls.preset;
                }
            }
        }

        if self.pending_controls.transition_ms != self.active_controls.transition_ms {
            self.widget
                .model_mut()
                .replace_transition_time(self.pending_controls.transition_ms);
        }

        self.active_controls = self.pending_controls;
        info!("Settings applied successfully");
    }

    fn disable_apply_button(&self) -> bool {
        self.pending_controls == self.active_controls
    }

    /// Push every newly synced selection into the sliding window of
    /// recent selections and highlight them as marks.
    fn track_selection(&mut self) {
        let selection = self.widget.model().selection();
        if selection == self.last_synced_selection {
            return;
        }

        if let Some(time) = selection {
            self.recent_selections.push_back(time);
            while self.recent_selections.len() > RECENT_SELECTION_LIMIT {
                self.recent_selections.pop_front();
            }
            if self.active_controls.track_selections {
                let marks: Vec<f32> = self.recent_selections.iter().copied().collect();
                self.widget.model_mut().replace_marks(marks);
            }
        }
        self.last_synced_selection = selection;
    }

    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(format!("wavesel {APP_VERSION}"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match self.widget.model().selection() {
                        Some(time) => {
                            ui.colored_label(egui::Color32::GREEN, format!("{time:.3} s"));
                            ui.label("Selection:");
                        }
                        None => {
                            ui.colored_label(egui::Color32::GRAY, "click the chart to select");
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn render_bottom_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.add_space(4.0);
                let apply_enabled = !self.disable_apply_button();

                if apply_enabled {
                    if ui.button("Apply Settings").clicked() {
                        self.apply_settings();
                    }
                } else {
                    ui.add_enabled(false, egui::Button::new("Apply Settings"));
                }

                if ui.button("Clear Marks").clicked() {
                    self.recent_selections.clear();
                    self.widget.model_mut().replace_marks(Vec::new());
                }
            });
            ui.add_space(8.0);
        });
    }

    fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.add_space(8.0);

                    self.widget.ui(ui);
                    self.track_selection();

                    ui.add_space(12.0);

                    let recent: Vec<f32> = self.recent_selections.iter().copied().collect();
                    render_selection_panel(ui, self.widget.model().selection(), &recent);

                    ui.add_space(12.0);

                    render_control_panel(ui, &mut self.pending_controls);
                });
        });
    }
}

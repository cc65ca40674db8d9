mod gui;

use log::{debug, info};

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting up...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 460.0])
            .with_title("wavesel demo"),
        ..Default::default()
    };

    debug!("Launching GUI...");
    let result = eframe::run_native(
        "wavesel demo",
        options,
        Box::new(|_cc| Ok(Box::new(gui::AppState::new()?))),
    );

    info!("Clean shutdown complete");

    result
}

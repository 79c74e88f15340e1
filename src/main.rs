use anyhow::Result;
use eframe::egui;
use fret_trainer::app::TrainerApp;

fn main() -> Result<()> {
    // RUST_LOG=debug shows every tick
    env_logger::init();
    log::info!("Starting Fret Trainer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 640.0])
            .with_title("Fret Trainer"),
        ..Default::default()
    };

    eframe::run_native(
        "Fret Trainer",
        options,
        Box::new(|cc| {
            log::debug!("Creating TrainerApp instance");
            Ok(Box::new(TrainerApp::new(cc)))
        }),
    ).map_err(|e| anyhow::anyhow!("Application error: {}", e))
}

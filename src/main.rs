use std::{
    path::PathBuf,
    sync::Arc,
};

use eframe::egui;
use mishu::{
    gui::MishuApp,
    logging,
    settings::Settings,
};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();

    let settings = Settings::load();
    let table = Arc::new(settings.reference_table()?);
    info!("Reference table ready ({} kanji)", table.len());

    // A CSV path may be passed to open it straight away
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("未習漢字チェッカー")
            .with_inner_size([1024.0, 720.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "mishu",
        options,
        Box::new(move |cc| Ok(Box::new(MishuApp::new(cc, settings, table, initial_file)))),
    )?;

    Ok(())
}

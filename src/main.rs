//! Globe Plot Demo.
//!
//! Spielt eine Polygon-Session auf einem In-Memory-Viewer durch und gibt
//! den übernommenen Plot als JSON aus.

use std::rc::Rc;

use anyhow::{bail, Context, Result};
use glam::DVec2;
use globe_plot::{
    write_plot_json, Key, MemoryViewer, PlotController, PlotFeatureOptions, PlotIntent,
    PlotOptions, PointerButton,
};

/// Klick-Positionen des Demo-Polygons (Screen-Pixel).
const DEMO_CLICKS: [[f64; 2]; 4] = [
    [540.0, 260.0],
    [740.0, 260.0],
    [780.0, 460.0],
    [500.0, 460.0],
];

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Globe Plot Demo v{} startet...", env!("CARGO_PKG_VERSION"));

    // Optionen aus TOML laden (oder Standardwerte)
    let options = PlotOptions::load_from_file(&PlotOptions::config_path());
    let viewer = Rc::new(MemoryViewer::new());
    let mut controller = PlotController::new(viewer, options);

    controller.on_current_changed(|change| {
        log::info!("Aktueller Plot: {:?} → {:?}", change.previous, change.current);
    });

    let session = controller
        .operate(PlotFeatureOptions::new("polygon"))
        .context("Polygon-Session konnte nicht gestartet werden")?;

    for [x, y] in DEMO_CLICKS {
        let position = DVec2::new(x, y);
        controller.handle_intent(PlotIntent::PointerMove { position })?;
        controller.handle_intent(PlotIntent::Click {
            button: PointerButton::Left,
            position,
        })?;
    }
    controller.handle_intent(PlotIntent::KeyPressed { key: Key::Enter })?;

    match session.completion.outcome() {
        Some(outcome) if outcome.is_committed() => log::info!("Session beendet: {:?}", outcome),
        other => bail!("Session nicht übernommen: {:?}", other),
    }

    let feature = controller
        .plot(session.plot)
        .context("übernommener Plot fehlt im Plot-Set")?;
    println!("{}", write_plot_json(feature)?);

    log::info!("{} Command(s) ausgeführt", controller.command_log().len());
    Ok(())
}

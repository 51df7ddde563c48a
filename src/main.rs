use anyhow::{Context, Result};
use log::{info, warn};
use std::env;

use hero_fx::scene::{HeroScene, SceneConfig};
use hero_fx::utils::show_rust_core_dependencies;
use hero_fx::{HeadlessRenderer, Simulator};

const DEFAULT_VIEWPORT_WIDTH: f32 = 1024.0;
const DEFAULT_FRAMES: u64 = 900;
const FRAME_RATE: f32 = 60.0;

/// Largeur du viewport : argument CLI, puis `HERO_VIEWPORT_WIDTH`, sinon 1024.
fn viewport_width() -> Result<f32> {
    match env::args()
        .nth(1)
        .or_else(|| env::var("HERO_VIEWPORT_WIDTH").ok())
    {
        Some(raw) => raw
            .parse::<f32>()
            .with_context(|| format!("Invalid viewport width: {raw:?}")),
        None => Ok(DEFAULT_VIEWPORT_WIDTH),
    }
}

fn frames() -> Result<u64> {
    match env::var("HERO_FRAMES") {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("Invalid HERO_FRAMES: {raw:?}")),
        Err(_) => Ok(DEFAULT_FRAMES),
    }
}

/// Pilote sans fenêtre de la scène d'accueil.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting hero scene...");

    show_rust_core_dependencies();

    let scene_config = SceneConfig::from_file("assets/config/scene.toml").unwrap_or_else(|e| {
        warn!("Using default scene config ({e})");
        SceneConfig::default()
    });
    info!("Scene config loaded:\n{:#?}", scene_config);

    let width = viewport_width()?;
    let frames = frames()?;

    let scene = HeroScene::new(&scene_config, width);
    let mut simulator = Simulator::new(HeadlessRenderer::new(), scene);

    let report = simulator.run(frames, 1.0 / FRAME_RATE)?;
    simulator.close();

    info!("Simulation report: {:#?}", report);

    Ok(())
}

//! Prism command line renderer.
//!
//! Loads a JSON scene (or the built-in demo), renders one pass and writes
//! the result as PNG.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use prism_core::{demo_scene, load_scene, RenderSettings};
use prism_renderer::{render, save_png, RenderConfig};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Prism");

    let config = RenderConfig::new(args.width, args.height, RenderSettings::default())
        .with_bucket_size(args.bucket_size);

    let (mut scene, file_settings) = match &args.scene {
        Some(path) => {
            let loaded = load_scene(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            (loaded.scene, loaded.settings)
        }
        None => {
            log::info!("No scene given, rendering the demo scene");
            (demo_scene(config.aspect_ratio()), None)
        }
    };

    scene.camera.set_aspect(config.aspect_ratio());
    let config = RenderConfig {
        settings: args.apply_to(file_settings.unwrap_or_default()),
        ..config
    };
    log::debug!("Render settings: {:?}", config.settings);

    let image = render(&scene, &config);

    save_png(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

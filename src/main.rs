use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use tile_toner::app::demo::DemoScriptPlugin;
use tile_toner::{OverlaySettings, TileMap, TileTonerConfig, TileTonerPlugin};

#[derive(Parser, Debug)]
#[command(about = "Tinted tile overlay demo")]
struct Args {
    /// RON config layers, later files override earlier ones.
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<PathBuf>,
    /// Override the demo RNG seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds (0 keeps running).
    #[arg(long)]
    auto_close: Option<f32>,
    /// Fail instead of falling back to defaults when a config layer cannot be read.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = if args.configs.is_empty() {
        TileTonerConfig::default_layers("assets/config")
    } else {
        args.configs.clone()
    };
    let (mut cfg, used, errors) = TileTonerConfig::load_layered(&paths);
    if args.strict && !errors.is_empty() {
        bail!("config errors:\n{}", errors.join("\n"));
    }
    if let Some(seed) = args.seed {
        cfg.demo.seed = seed;
    }
    if let Some(secs) = args.auto_close {
        cfg.window.auto_close = secs;
    }

    let settings = OverlaySettings::from_config(&cfg.tile_toner);
    let map = TileMap::new(1, cfg.map_geometry());

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.window.title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: false,
            ..default()
        }),
        ..default()
    }));
    // Logging is available only once DefaultPlugins (LogPlugin) is in.
    for p in &used {
        info!("config layer: {p}");
    }
    for e in &errors {
        warn!("config: {e}");
    }
    for w in cfg.validate() {
        warn!("config validation: {w}");
    }
    app.insert_resource(cfg)
        .insert_resource(map)
        .add_plugins((TileTonerPlugin::new(settings), DemoScriptPlugin))
        .run();
    Ok(())
}

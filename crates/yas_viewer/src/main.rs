//! YAS scene viewer
//!
//! Loads a scene document, resolves its component graph and renders frames
//! through a logging backend.
//!
//! Usage: `yas_viewer [scene-file] [config-file] [--frames N] [--log-level LEVEL]`

mod backend;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use yas_scene::foundation::logging;
use yas_scene::prelude::*;

use backend::LoggingRenderer;
use config::ViewerConfig;

#[derive(Error, Debug)]
enum ViewerError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),
}

/// Logs the loader's ready/failed notification
struct ViewerListener;

impl LoadListener for ViewerListener {
    fn on_graph_ready(&mut self, scene: &Scene) {
        log::info!("Scene graph ready ({} components)", scene.graph.len());
    }

    fn on_graph_failed(&mut self, message: &str) {
        log::error!("Scene graph failed: {}", message);
    }
}

/// Load a YAS scene and render it through a logging backend
#[derive(Parser, Debug)]
#[command(name = "yas_viewer", version)]
struct Args {
    /// Scene document (.xml or .ron); overrides the configured path
    scene: Option<PathBuf>,

    /// Viewer configuration file (.toml or .ron)
    config: Option<PathBuf>,

    /// Number of frames to render
    #[arg(short, long, value_name = "N")]
    frames: Option<usize>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Args {
    /// Configuration file settings with command-line overrides applied
    fn resolve_config(&self) -> Result<ViewerConfig, ViewerError> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load_from_file(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(scene) = &self.scene {
            config.scene_path.clone_from(scene);
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(level) = &self.log_level {
            config.log_level.clone_from(level);
        }
        Ok(config)
    }
}

fn run(config: &ViewerConfig) -> Result<(), ViewerError> {
    let loader = SceneLoader::new(config.loader.clone());
    let source = FileSource::new(config.scene_path.clone());
    let scene = loader.load_from(&source, &mut ViewerListener)?;

    if let Some(view) = scene.default_view() {
        let view_projection = view.projection(config.aspect_ratio) * view.view_matrix();
        log::debug!("Default view '{}' view-projection: {:?}", view.id, view_projection);
    }

    let mut backend = LoggingRenderer::new();
    let mut renderer = SceneRenderer::new(config.loader.appearance_mode);
    let mut stats = RenderStats::default();
    for _ in 0..config.frames {
        stats = renderer.render(&scene, &mut backend);
    }

    println!("Scene:       {}", config.scene_path.display());
    println!("Views:       {} (default '{}')", scene.views.len(), scene.default_view);
    println!(
        "Lights:      {} ({} active)",
        scene.lights.len(),
        scene.active_lights().count()
    );
    println!("Primitives:  {}", scene.primitives.len());
    println!("Components:  {}", scene.graph.len());
    println!(
        "Last frame:  {} draw calls, {} components visited, {} skipped references",
        stats.draw_calls, stats.components_visited, stats.skipped_refs
    );
    println!(
        "All frames:  {} draws, {} triangles",
        backend.draws(),
        backend.triangles()
    );
    Ok(())
}

fn main() -> ExitCode {
    let config = match Args::parse().resolve_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("yas_viewer: {}", err);
            return ExitCode::FAILURE;
        }
    };

    logging::init_with_level(config.level_filter());

    log::info!("Starting YAS viewer");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("yas_viewer: {}", err);
            ExitCode::FAILURE
        }
    }
}

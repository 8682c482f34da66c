//! Viewer configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use yas_scene::config::{Config, LoaderConfig};

/// Settings for one viewer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Scene document to load
    pub scene_path: PathBuf,

    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,

    /// Viewport aspect ratio used for the default view's projection
    pub aspect_ratio: f32,

    /// Number of frames to render
    pub frames: usize,

    /// Scene loader settings
    pub loader: LoaderConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scene_path: PathBuf::from("crates/yas_viewer/scenes/demo.xml"),
            log_level: "info".to_string(),
            aspect_ratio: 16.0 / 9.0,
            frames: 1,
            loader: LoaderConfig::default(),
        }
    }
}

impl Config for ViewerConfig {}

impl ViewerConfig {
    /// Parsed log level, falling back to `info`
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_fallback() {
        let mut config = ViewerConfig::default();
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
        config.log_level = "debug".into();
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
        config.log_level = "loud".into();
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_bundled_config_parses() {
        let text = include_str!("../viewer.toml");
        let config: ViewerConfig = toml::from_str(text).unwrap();
        assert_eq!(config.frames, 2);
        assert_eq!(config.loader.max_lights, 8);
    }
}

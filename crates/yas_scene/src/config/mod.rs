//! Configuration system

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// How the renderer obtains each component's appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppearanceMode {
    /// Read the slot written by the inheritance pass; a shared component
    /// keeps whatever its last-visited parent path produced
    #[default]
    SharedSlot,
    /// Recompute appearance from the path actually being traversed
    PerPath,
}

/// Scene loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Expected name of the document's root element
    pub root_tag: String,

    /// Soft limit on active lights; exceeding it is a warning
    pub max_lights: usize,

    /// Appearance lookup strategy used by renderers built from this config
    pub appearance_mode: AppearanceMode,

    /// Treat a section out of canonical order as fatal instead of a warning
    pub strict_section_order: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            root_tag: "yas".to_string(),
            max_lights: 8,
            appearance_mode: AppearanceMode::SharedSlot,
            strict_section_order: false,
        }
    }
}

impl Config for LoaderConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_config_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.root_tag, "yas");
        assert_eq!(config.max_lights, 8);
        assert_eq!(config.appearance_mode, AppearanceMode::SharedSlot);
        assert!(!config.strict_section_order);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: LoaderConfig =
            toml::from_str("max_lights = 4\nappearance_mode = \"PerPath\"\n").unwrap();
        assert_eq!(config.max_lights, 4);
        assert_eq!(config.appearance_mode, AppearanceMode::PerPath);
        assert_eq!(config.root_tag, "yas");
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let path =
            std::env::temp_dir().join(format!("yas_loader_config_{}.ron", std::process::id()));
        let config = LoaderConfig {
            strict_section_order: true,
            ..LoaderConfig::default()
        };
        config.save_to_file(&path).unwrap();
        let loaded = LoaderConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = LoaderConfig::default().save_to_file("config.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}

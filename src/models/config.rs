use nonogram_core::PipelineOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Longest side of the preview image in pixels
    pub preview_max_dimension: u32,

    /// Largest accepted upload after base64 decoding, in bytes
    pub max_image_bytes: usize,

    /// Background dim factor used when a request does not set one
    pub default_dim_factor: f32,

    /// Segmentation model settings
    pub model: ModelConfig,
}

/// Which segmentation model to load at startup
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Precomputed mask image served for every photo.
    /// Relative paths are resolved against the config file's directory.
    pub mask_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_max_dimension: 500,
            max_image_bytes: 10 * 1024 * 1024,
            default_dim_factor: 0.3,
            model: ModelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `CONFIG_FILE`, or defaults when unset.
    pub fn load_from_env() -> Self {
        let path = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
        Self::load_from_path(path.as_deref())
    }

    /// Load configuration from a YAML file.
    ///
    /// Missing or invalid files log a warning and yield the defaults.
    pub fn load_from_path(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(mut config) => {
                    if let Some(dir) = path.parent() {
                        config.resolve_paths(dir);
                    }
                    tracing::info!(
                        path = %path.display(),
                        preview_max_dimension = config.preview_max_dimension,
                        max_image_bytes = config.max_image_bytes,
                        mask_file = ?config.model.mask_file,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(mask) = &self.model.mask_file {
            if mask.is_relative() {
                self.model.mask_file = Some(base.join(mask));
            }
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            preview_max_dimension: self.preview_max_dimension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.preview_max_dimension, 500);
        assert_eq!(config.max_image_bytes, 10_485_760);
        assert_eq!(config.default_dim_factor, 0.3);
        assert!(config.model.mask_file.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml("preview_max_dimension: 320\n").unwrap();
        assert_eq!(
            config,
            AppConfig {
                preview_max_dimension: 320,
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
preview_max_dimension: 800
max_image_bytes: 2048
default_dim_factor: 0.5
model:
  mask_file: /srv/masks/subject.png
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.preview_max_dimension, 800);
        assert_eq!(config.max_image_bytes, 2048);
        assert_eq!(config.default_dim_factor, 0.5);
        assert_eq!(
            config.model.mask_file,
            Some(PathBuf::from("/srv/masks/subject.png"))
        );
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(AppConfig::from_yaml("preview_max_dimension: [1, 2]").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load_from_path(Some(Path::new("/nonexistent/config.yaml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_resolves_relative_mask() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "model:\n  mask_file: masks/cat.png\n").unwrap();

        let config = AppConfig::load_from_path(Some(&path));
        assert_eq!(
            config.model.mask_file,
            Some(dir.path().join("masks/cat.png"))
        );
    }

    #[test]
    fn test_pipeline_options() {
        let config = AppConfig {
            preview_max_dimension: 123,
            ..AppConfig::default()
        };
        assert_eq!(config.pipeline_options().preview_max_dimension, 123);
    }
}

//! Configuration system
//!
//! Kernel tuning lives in plain serde structs so hosts can load it from TOML
//! or RON. Every default matches the constants the demos were tuned with.

pub use serde::{Deserialize, Serialize};

mod settings;

pub use settings::{
    CollisionTuning, CubeConfig, KernelConfig, PlatformerConfig, ProjectionConfig,
};

use std::path::Path;

/// On-disk encodings a configuration can use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format named by the extension of `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Serde-backed settings that can be read from and written to TOML or RON
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, format)
    }

    /// Parse configuration text, picking the format from `path`'s extension
    fn from_str_with_format(contents: &str, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::parse(contents, ConfigFormat::from_path(path)?)
    }

    /// Parse configuration text in a known format
    fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => {
                toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            ConfigFormat::Ron => {
                ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
        }
    }

    /// Encode in `format`
    fn to_text(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            ConfigFormat::Ron => {
                ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                    .map_err(|e| ConfigError::Serialize(e.to_string()))
            }
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.to_text(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents)?;
        log::debug!("saved configuration to {}", path.display());
        Ok(())
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

    /// A value is outside its accepted range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

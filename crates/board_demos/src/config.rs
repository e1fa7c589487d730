//! Host configuration

use board_physics::config::{Config, ConfigError, KernelConfig};
use board_physics::demos::DemoKind;
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

/// What to run and for how long
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Demo to run
    pub demo: DemoKind,
    /// Starting level for the platformer
    pub level: usize,
    /// Frames to simulate before stopping
    pub frames: u32,
    /// Frame on which the script presses exit, if any
    pub exit_at: Option<u32>,
    /// PNG written with the last frame, if set
    pub snapshot: Option<String>,
    /// Kernel tuning
    pub kernel: KernelConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            demo: DemoKind::Cube,
            level: 0,
            frames: 600,
            exit_at: None,
            snapshot: None,
            kernel: KernelConfig::default(),
        }
    }
}

impl HostConfig {
    /// Run the given demo instead
    pub fn with_demo(mut self, demo: DemoKind) -> Self {
        self.demo = demo;
        self
    }

    /// Validate ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frames == 0 {
            return Err(ConfigError::Invalid("frames must be positive".to_string()));
        }
        self.kernel.validate()
    }
}

impl Config for HostConfig {}

/// Parse a demo name from the command line
pub fn parse_demo_kind(name: &str) -> Result<DemoKind, DemoError> {
    match name.to_ascii_lowercase().as_str() {
        "cube" => Ok(DemoKind::Cube),
        "platformer" | "game" => Ok(DemoKind::Platformer),
        other => Err(DemoError::Usage(format!(
            "unknown demo '{other}', expected 'cube' or 'platformer'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(HostConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_frames_rejected() {
        let config = HostConfig {
            frames: 0,
            ..HostConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let text = "demo = \"Platformer\"\nframes = 90\n\n\
                    [kernel.platformer]\njump_velocity = 7.0\n";
        let config = HostConfig::from_str_with_format(text, "host.toml").unwrap();
        assert_eq!(config.demo, DemoKind::Platformer);
        assert_eq!(config.frames, 90);
        assert!((config.kernel.platformer.jump_velocity - 7.0).abs() < f32::EPSILON);
        assert_eq!(config.kernel.cube, KernelConfig::default().cube);
    }

    #[test]
    fn test_parse_demo_kind() {
        assert_eq!(parse_demo_kind("Cube").unwrap(), DemoKind::Cube);
        assert_eq!(parse_demo_kind("platformer").unwrap(), DemoKind::Platformer);
        assert!(matches!(parse_demo_kind("scope"), Err(DemoError::Usage(_))));
    }
}

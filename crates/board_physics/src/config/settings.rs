//! Kernel settings structures

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{ScreenSize, Vec3};

/// # Kernel Configuration
///
/// Top-level settings for both demos and the target display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KernelConfig {
    /// Display dimensions
    pub screen: ScreenSize,
    /// Tilt-cube tuning
    pub cube: CubeConfig,
    /// Platformer tuning
    pub platformer: PlatformerConfig,
}

impl KernelConfig {
    /// Check every nested section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen.width <= 0 || self.screen.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        self.cube.validate()?;
        self.platformer.validate()
    }
}

impl Config for KernelConfig {}

/// Perspective constants for a wireframe projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Focal length numerator
    pub focal_length: f32,
    /// Depth added before the perspective divide
    pub z_offset: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            focal_length: 200.0,
            z_offset: 100.0,
        }
    }
}

/// # Cube Demo Configuration
///
/// Physical constants for the tilt-controlled cube bouncing inside its box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Half edge length of the simulated cube
    pub cube_half_size: f32,
    /// Half edge length of the containing box (x and y)
    pub environment_half_size: f32,
    /// Depth offset of the containing box centre
    pub environment_z_offset: f32,
    /// Acceleration applied along the sensed gravity direction
    pub gravity_strength: f32,
    /// Per-step linear velocity multiplier
    pub linear_damping: f32,
    /// Per-step angular velocity multiplier
    pub angular_damping: f32,
    /// Fraction of normal velocity kept after a bounce
    pub restitution: f32,
    /// Fixed integration step
    pub time_step: f32,
    /// Gain of the face-settling torque
    pub stabilization_strength: f32,
    /// Initial cube centre in screen-anchored world units
    pub start_position: Vec3,
    /// Seed for the bounce jitter generator
    pub rng_seed: u32,
    /// Perspective used for both cube and box
    pub projection: ProjectionConfig,
}

impl CubeConfig {
    /// Set the restitution coefficient
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the fixed time step
    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    /// Set the jitter seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Validate ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("cube.cube_half_size", self.cube_half_size)?;
        check_positive("cube.environment_half_size", self.environment_half_size)?;
        check_positive("cube.time_step", self.time_step)?;
        check_positive("cube.projection.focal_length", self.projection.focal_length)?;
        check_damping("cube.linear_damping", self.linear_damping)?;
        check_damping("cube.angular_damping", self.angular_damping)?;
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::Invalid(format!(
                "cube.restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if self.cube_half_size >= self.environment_half_size {
            return Err(ConfigError::Invalid(
                "cube does not fit inside its environment box".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            cube_half_size: 15.0,
            environment_half_size: 60.0,
            environment_z_offset: 60.0,
            gravity_strength: 1.1,
            linear_damping: 0.98,
            angular_damping: 0.25,
            restitution: 0.5,
            time_step: 0.9,
            stabilization_strength: 0.02,
            start_position: Vec3::new(64.0, 64.0, 40.0),
            rng_seed: 1234,
            projection: ProjectionConfig::default(),
        }
    }
}

/// Tolerance windows used by the bitmap collision scan
///
/// All windows are whole pixels. These encode how the platformer feels;
/// they are tuned values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// How far the feet may hover above a pixel top and still land
    pub landing_above: i32,
    /// How far the feet may have sunk below a pixel top and still land
    pub landing_below: i32,
    /// Window above a pixel bottom in which the head bumps
    pub head_window: i32,
    /// Window past a pixel side in which a wall blocks
    pub side_window: i32,
    /// Walls shorter than `player_height / step_height_divisor` are stepped over
    pub step_height_divisor: i32,
    /// Vertical velocity left after landing
    pub ground_bias: f32,
}

impl CollisionTuning {
    /// Minimum wall height (integer division) that blocks a player of `player_height`
    ///
    /// A divisor of zero makes every wall block.
    pub const fn step_height(&self, player_height: i32) -> i32 {
        match player_height.checked_div(self.step_height_divisor) {
            Some(height) => height,
            None => 0,
        }
    }
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            landing_above: 5,
            landing_below: 8,
            head_window: 5,
            side_window: 5,
            step_height_divisor: 3,
            ground_bias: -0.01,
        }
    }
}

/// # Platformer Configuration
///
/// Player motion, input shaping and animation rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    /// Vertical acceleration while airborne (negative is down)
    pub gravity: f32,
    /// Vertical velocity set by a jump
    pub jump_velocity: f32,
    /// Horizontal acceleration at full stick deflection
    pub horizontal_accel: f32,
    /// Horizontal speed clamp
    pub max_speed: f32,
    /// Per-frame horizontal velocity multiplier
    pub horizontal_damping: f32,
    /// Player box width
    pub player_width: u32,
    /// Player box height
    pub player_height: u32,
    /// Joystick full-scale voltage
    pub joystick_reference: f32,
    /// Stick deflection ignored around centre
    pub dead_zone: f32,
    /// Minimum time between jumps
    pub jump_cooldown_ms: u64,
    /// Simulated time per frame
    pub frame_period_ms: u64,
    /// Animation frames of the jump sequence
    pub jump_frames: u32,
    /// Animation frames of the double-jump sequence
    pub double_jump_frames: u32,
    /// Animation frames of the run cycle
    pub run_frames: u32,
    /// Jump animation advance per frame
    pub jump_animation_rate: f32,
    /// Bitmap collision windows
    pub collision: CollisionTuning,
}

impl PlatformerConfig {
    /// Player box as signed pixel width and height
    pub const fn player_size(&self) -> (i32, i32) {
        (self.player_width as i32, self.player_height as i32)
    }

    /// Set the collision tuning
    pub fn with_collision(mut self, collision: CollisionTuning) -> Self {
        self.collision = collision;
        self
    }

    /// Validate ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_width == 0 || self.player_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "player box must be non-empty, got {}x{}",
                self.player_width, self.player_height
            )));
        }
        check_positive("platformer.max_speed", self.max_speed)?;
        check_positive("platformer.joystick_reference", self.joystick_reference)?;
        if self.collision.step_height_divisor <= 0 {
            return Err(ConfigError::Invalid(
                "platformer.collision.step_height_divisor must be positive".to_string(),
            ));
        }
        check_damping("platformer.horizontal_damping", self.horizontal_damping)?;
        if self.frame_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "platformer.frame_period_ms must be positive".to_string(),
            ));
        }
        if self.jump_frames == 0 || self.double_jump_frames == 0 || self.run_frames == 0 {
            return Err(ConfigError::Invalid(
                "animation frame counts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            gravity: -0.5,
            jump_velocity: 6.0,
            horizontal_accel: 1.0,
            max_speed: 8.0,
            horizontal_damping: 0.92,
            player_width: 13,
            player_height: 17,
            joystick_reference: 1.4,
            dead_zone: 0.1,
            jump_cooldown_ms: 50,
            frame_period_ms: 16,
            jump_frames: 6,
            double_jump_frames: 6,
            run_frames: 4,
            jump_animation_rate: 0.35,
            collision: CollisionTuning::default(),
        }
    }
}

fn check_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

fn check_damping(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be in (0, 1], got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = KernelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.screen, ScreenSize::new(128, 128));
        assert_eq!(config.cube.rng_seed, 1234);
        assert_eq!(config.platformer.player_height, 17);
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let mut config = KernelConfig::default();
        config.cube = config.cube.with_restitution(1.5);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = KernelConfig::default();
        config.cube.angular_damping = 0.0;
        assert!(config.validate().is_err());

        let mut config = KernelConfig::default();
        config.platformer.player_width = 0;
        assert!(config.validate().is_err());

        let mut config = KernelConfig::default();
        config.screen = ScreenSize::new(0, 128);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_keeps_ground_bias() {
        let mut config = KernelConfig::default();
        config.platformer.collision.ground_bias = -0.02;
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = KernelConfig::from_str_with_format(&text, "kernel.toml").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let parsed =
            KernelConfig::from_str_with_format("(cube: (restitution: 0.25))", "k.ron").unwrap();
        assert!((parsed.cube.restitution - 0.25).abs() < f32::EPSILON);
        assert_eq!(parsed.platformer, PlatformerConfig::default());
    }

    #[test]
    fn test_step_height_with_zero_divisor() {
        let mut tuning = CollisionTuning::default();
        assert_eq!(tuning.step_height(17), 5);
        tuning.step_height_divisor = 0;
        assert_eq!(tuning.step_height(17), 0);
    }

    #[test]
    fn test_unknown_extension() {
        let result = KernelConfig::from_str_with_format("", "kernel.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}

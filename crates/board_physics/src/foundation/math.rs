//! Math utilities and types
//!
//! Provides the vector aliases used by the integrators plus the integer
//! screen-space types shared by projection and rendering.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Euler angles in radians, applied X then Y then Z
pub type EulerAngles = Vec3;

/// Integer pixel coordinate on the display (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl ScreenPoint {
    /// Create a new screen point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Dimensions of the target display in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl ScreenSize {
    /// The 128x128 OLED panel the demos were tuned for
    pub const OLED_128: Self = Self::new(128, 128);

    /// Create a new screen size
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Integer centre of the screen
    pub const fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2, self.height / 2)
    }

    /// Centre of the screen as a world-space anchor (z = 0)
    pub fn center_anchor(&self) -> Vec3 {
        let c = self.center();
        Vec3::new(c.x as f32, c.y as f32, 0.0)
    }

    /// Clamp a point into the framebuffer
    pub fn clamp(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            point.x.clamp(0, self.width - 1),
            point.y.clamp(0, self.height - 1),
        )
    }

    /// Whether a point lies inside the framebuffer
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::OLED_128
    }
}

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Convert a float to a pixel coordinate the way a C `(int)` cast does
    /// (truncation toward zero, saturating at the i32 range, NaN to 0)
    pub fn truncate_to_pixel(value: f32) -> i32 {
        value as i32
    }

    /// Normalize a vector, returning `None` when its length is at or below `epsilon`
    pub fn try_normalize(v: Vec3, epsilon: f32) -> Option<Vec3> {
        let length = v.magnitude();
        if length > epsilon {
            Some(v / length)
        } else {
            None
        }
    }
}

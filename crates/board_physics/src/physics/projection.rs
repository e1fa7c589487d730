//! Fixed-focal perspective projection onto the display
//!
//! Screen y grows downward; world y grows upward. All projected
//! coordinates are truncated toward zero the way an integer cast would.

use crate::config::ProjectionConfig;
use crate::foundation::math::{utils::truncate_to_pixel, ScreenPoint, ScreenSize, Vec3};

/// Depth at or below which the perspective divide is skipped
pub const DEPTH_EPSILON: f32 = 0.001;

/// How a point was mapped to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Normal perspective divide
    Perspective,
    /// Point sat at the camera plane, raw x/y were used instead
    Orthographic,
}

/// A projected point and how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projected {
    /// Screen coordinate
    pub point: ScreenPoint,
    /// Perspective or fallback
    pub mode: ProjectionMode,
}

/// Perspective camera looking down +z at the screen centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Focal length numerator
    pub focal_length: f32,
    /// Depth added before the divide
    pub z_offset: f32,
    /// Target display
    pub screen: ScreenSize,
    /// Symmetric clamp applied to world-fixed x/y before the centre offset
    pub intermediate_limit: Option<f32>,
}

impl Projection {
    /// Create a projection with no intermediate clamp
    pub const fn new(focal_length: f32, z_offset: f32, screen: ScreenSize) -> Self {
        Self {
            focal_length,
            z_offset,
            screen,
            intermediate_limit: None,
        }
    }

    /// Tilt-cube camera: f = 200, offset 100, world-fixed values limited to ±200
    pub const fn cube(screen: ScreenSize) -> Self {
        Self::new(200.0, 100.0, screen).with_intermediate_limit(200.0)
    }

    /// Servo-arm camera: f = 100, offset 80
    pub const fn servo_arm(screen: ScreenSize) -> Self {
        Self::new(100.0, 80.0, screen)
    }

    /// Build from configuration, keeping the cube's ±200 limit
    pub const fn from_config(config: &ProjectionConfig, screen: ScreenSize) -> Self {
        Self::new(config.focal_length, config.z_offset, screen).with_intermediate_limit(200.0)
    }

    /// Set the world-fixed intermediate clamp
    pub const fn with_intermediate_limit(mut self, limit: f32) -> Self {
        self.intermediate_limit = Some(limit);
        self
    }

    /// Perspective scale for depth `z`, `None` when the divide would blow up
    pub fn perspective_factor(&self, z: f32) -> Option<f32> {
        let depth = z + self.z_offset;
        (depth.abs() > DEPTH_EPSILON).then(|| self.focal_length / depth)
    }

    /// Project a body-local point of an object whose centre is `object_position`
    ///
    /// The point is moved by the object's offset from the screen centre
    /// before the divide. Results are not clamped.
    pub fn object_relative(&self, local: Vec3, object_position: Vec3) -> Projected {
        let anchor = self.screen.center_anchor();
        let p = local + object_position - anchor;
        self.to_screen(p, None)
    }

    /// Project a point that is fixed relative to the camera
    ///
    /// x/y are limited by `intermediate_limit` when set and the result is
    /// clamped into the framebuffer, so a runaway value can never leave
    /// the screen.
    pub fn world_fixed(&self, point: Vec3) -> Projected {
        let projected = self.to_screen(point, self.intermediate_limit);
        Projected {
            point: self.screen.clamp(projected.point),
            mode: projected.mode,
        }
    }

    fn to_screen(&self, p: Vec3, limit: Option<f32>) -> Projected {
        let center = self.screen.center();
        let (x, y, mode) = match self.perspective_factor(p.z) {
            Some(scale) => {
                let (mut x, mut y) = (p.x * scale, p.y * scale);
                if let Some(limit) = limit {
                    x = x.clamp(-limit, limit);
                    y = y.clamp(-limit, limit);
                }
                (x, y, ProjectionMode::Perspective)
            }
            None => (p.x, p.y, ProjectionMode::Orthographic),
        };
        Projected {
            point: ScreenPoint::new(
                center.x + truncate_to_pixel(x),
                center.y - truncate_to_pixel(y),
            ),
            mode,
        }
    }
}

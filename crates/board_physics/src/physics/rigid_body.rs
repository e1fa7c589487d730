//! Single rigid body driven by a sensed gravity direction
//!
//! One call to [`RigidBody::step`] is one fixed frame: gravity and settling
//! torque, damping, explicit Euler integration, then the boundary pass.

use serde::{Deserialize, Serialize};

use super::boundary::{BoundaryBox, BoundaryOutcome};
use super::orientation::{advance_orientation, stabilizing_torque, Stabilization};
use super::polyhedron::Polyhedron;
use crate::config::CubeConfig;
use crate::foundation::math::{EulerAngles, Vec3};
use crate::foundation::random::RandomSource;

/// Kinematic state of the cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Centre position in screen-anchored world units
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// Euler angles in radians
    pub orientation: EulerAngles,
    /// Angular velocity in radians per unit time
    pub angular_velocity: Vec3,
}

impl RigidBody {
    /// Body at rest at `position`
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            orientation: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the initial orientation
    pub fn with_orientation(mut self, orientation: EulerAngles) -> Self {
        self.orientation = orientation;
        self
    }

    /// Advance one step without collision handling
    ///
    /// `gravity` is the unit direction from the accelerometer; `None` skips
    /// both the gravity impulse and the settling torque. Returns the
    /// settling result when gravity was present.
    pub fn integrate(
        &mut self,
        gravity: Option<Vec3>,
        face_normals: &[Vec3],
        params: &IntegratorParams,
    ) -> Option<Stabilization> {
        let dt = params.time_step;

        let stabilization = gravity.map(|g| {
            self.velocity += g * params.gravity_strength * dt;
            let result = stabilizing_torque(
                face_normals,
                self.orientation,
                g,
                params.stabilization_strength,
            );
            self.angular_velocity += result.torque();
            result
        });

        self.velocity *= params.linear_damping;
        self.position += self.velocity * dt;

        self.angular_velocity *= params.angular_damping;
        self.orientation = advance_orientation(self.orientation, self.angular_velocity, dt);

        stabilization
    }

    /// Advance one full frame, including the boundary pass
    pub fn step<R: RandomSource + ?Sized>(
        &mut self,
        gravity: Option<Vec3>,
        shape: &Polyhedron,
        bounds: &BoundaryBox,
        params: &IntegratorParams,
        rng: &mut R,
    ) -> StepOutcome {
        let stabilization = self.integrate(gravity, shape.face_normals(), params);
        let boundary = bounds.resolve(self, shape.vertices(), params.restitution, rng);
        StepOutcome {
            stabilization,
            boundary,
        }
    }

    /// Translational kinetic energy per unit mass
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.velocity.magnitude_squared()
    }
}

/// What happened during one [`RigidBody::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Settling result, `None` when there was no gravity reading
    pub stabilization: Option<Stabilization>,
    /// Boundary pass result
    pub boundary: BoundaryOutcome,
}

/// Constants used by [`RigidBody::integrate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorParams {
    /// Acceleration along the gravity direction
    pub gravity_strength: f32,
    /// Per-step linear velocity multiplier
    pub linear_damping: f32,
    /// Per-step angular velocity multiplier
    pub angular_damping: f32,
    /// Fixed step
    pub time_step: f32,
    /// Settling torque gain
    pub stabilization_strength: f32,
    /// Bounce coefficient
    pub restitution: f32,
}

impl From<&CubeConfig> for IntegratorParams {
    fn from(config: &CubeConfig) -> Self {
        Self {
            gravity_strength: config.gravity_strength,
            linear_damping: config.linear_damping,
            angular_damping: config.angular_damping,
            time_step: config.time_step,
            stabilization_strength: config.stabilization_strength,
            restitution: config.restitution,
        }
    }
}

impl Default for IntegratorParams {
    fn default() -> Self {
        Self::from(&CubeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::polyhedron::CUBOID_FACE_NORMALS;
    use approx::assert_relative_eq;

    #[test]
    fn test_rest_is_idempotent() {
        let params = IntegratorParams::default();
        let mut body = RigidBody::at_rest(Vec3::new(64.0, 64.0, 40.0));
        let start = body.clone();
        for _ in 0..100 {
            assert!(body.integrate(None, &CUBOID_FACE_NORMALS, &params).is_none());
        }
        assert_eq!(body, start);
    }

    #[test]
    fn test_gravity_step_order() {
        let params = IntegratorParams::default();
        let mut body = RigidBody::at_rest(Vec3::zeros());
        body.integrate(Some(Vec3::new(0.0, -1.0, 0.0)), &CUBOID_FACE_NORMALS, &params);

        // v = -1.1 * 0.9 * 0.98, p = v * 0.9
        let v = -1.1 * 0.9 * 0.98;
        assert_relative_eq!(body.velocity.y, v, epsilon = 1e-6);
        assert_relative_eq!(body.position.y, v * 0.9, epsilon = 1e-6);
        assert_eq!(body.angular_velocity, Vec3::zeros());
    }

    #[test]
    fn test_angular_damping_without_gravity() {
        let params = IntegratorParams::default();
        let mut body = RigidBody::at_rest(Vec3::zeros());
        body.angular_velocity = Vec3::new(1.0, 0.0, 0.0);
        body.integrate(None, &CUBOID_FACE_NORMALS, &params);
        assert_relative_eq!(body.angular_velocity.x, 0.25);
        assert_relative_eq!(body.orientation.x, 0.225, epsilon = 1e-6);
    }

    #[test]
    fn test_settles_from_several_orientations() {
        let params = IntegratorParams::default();
        let gravity = Some(Vec3::new(0.0, -1.0, 0.0));
        let starts = [
            Vec3::new(0.4, 0.0, 0.0),
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.45),
            Vec3::new(0.0, 0.0, -0.3),
        ];

        for start in starts {
            let mut body = RigidBody::at_rest(Vec3::zeros()).with_orientation(start);
            let settled_after = (0..1000).find(|_| {
                body.integrate(gravity, &CUBOID_FACE_NORMALS, &params)
                    .is_some_and(|s| s.is_settled())
            });
            assert!(settled_after.is_some(), "did not settle from {start:?}");
        }
    }
}

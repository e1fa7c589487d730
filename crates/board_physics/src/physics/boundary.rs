//! Cuboid-in-box boundary resolver
//!
//! Every rotated corner is tested against the six planes of an
//! axis-aligned box. Each violation pushes the body centre back by the
//! penetration depth immediately, so corners tested later see the
//! corrected position. This is a per-vertex approximation rather than a
//! constraint solve: several corners crossing different planes each nudge
//! the centre on their own axis.

use super::orientation::rotate_point;
use super::polyhedron::Polyhedron;
use super::rigid_body::RigidBody;
use crate::foundation::math::{utils, Vec3};
use crate::foundation::random::{angular_jitter, RandomSource};

/// Accumulated normals at or below this length are ignored
pub const NORMAL_EPSILON: f32 = 0.001;

/// Result of one boundary pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryOutcome {
    /// No corner crossed a plane
    Clear,
    /// Corners crossed opposite planes and the normals cancelled;
    /// positions were corrected but velocity was left alone
    CancelledNormal {
        /// Number of plane violations
        violations: u32,
    },
    /// Body touched the boundary while already moving away from it
    Resting {
        /// Number of plane violations
        violations: u32,
        /// Unit contact normal (pointing inward)
        normal: Vec3,
    },
    /// Velocity was reflected and random spin added
    Reflected {
        /// Number of plane violations
        violations: u32,
        /// Unit contact normal (pointing inward)
        normal: Vec3,
        /// Spin added to the angular velocity
        spin: Vec3,
    },
}

impl BoundaryOutcome {
    /// Number of plane violations found
    pub const fn violations(&self) -> u32 {
        match self {
            Self::Clear => 0,
            Self::CancelledNormal { violations }
            | Self::Resting { violations, .. }
            | Self::Reflected { violations, .. } => *violations,
        }
    }

    /// Whether velocity was reflected
    pub const fn bounced(&self) -> bool {
        matches!(self, Self::Reflected { .. })
    }
}

/// Axis-aligned box the body must stay inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryBox {
    /// Lower corner
    pub min: Vec3,
    /// Upper corner
    pub max: Vec3,
    /// Subtracted from body positions to get box coordinates
    pub anchor: Vec3,
}

impl BoundaryBox {
    /// Create a box
    pub const fn new(min: Vec3, max: Vec3, anchor: Vec3) -> Self {
        Self { min, max, anchor }
    }

    /// Box spanned by an environment cuboid, with body positions measured from `anchor`
    pub fn from_environment(environment: &Polyhedron, anchor: Vec3) -> Self {
        let (min, max) = environment.bounds();
        Self::new(min, max, anchor)
    }

    /// Push `body` back inside and respond to the contact
    ///
    /// Plane tests are strict, so a corner lying exactly on a plane is not
    /// a violation. The reflection is `v -= (1 + restitution)(v.n)n` and
    /// only happens when the body moves into the surface.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        body: &mut RigidBody,
        local_vertices: &[Vec3],
        restitution: f32,
        rng: &mut R,
    ) -> BoundaryOutcome {
        let mut normal = Vec3::zeros();
        let mut violations = 0u32;

        for vertex in local_vertices {
            let rotated = rotate_point(*vertex, body.orientation);
            for axis in 0..3 {
                let world = body.position[axis] + rotated[axis] - self.anchor[axis];
                if world < self.min[axis] {
                    normal[axis] += 1.0;
                    body.position[axis] += self.min[axis] - world;
                    violations += 1;
                } else if world > self.max[axis] {
                    normal[axis] -= 1.0;
                    body.position[axis] -= world - self.max[axis];
                    violations += 1;
                }
            }
        }

        if violations == 0 {
            return BoundaryOutcome::Clear;
        }

        let Some(normal) = utils::try_normalize(normal, NORMAL_EPSILON) else {
            log::trace!("boundary normals cancelled across {violations} violations");
            return BoundaryOutcome::CancelledNormal { violations };
        };

        let approach = body.velocity.dot(&normal);
        if approach >= 0.0 {
            return BoundaryOutcome::Resting { violations, normal };
        }

        body.velocity -= normal * ((1.0 + restitution) * approach);
        let spin = Vec3::new(
            angular_jitter(rng),
            angular_jitter(rng),
            angular_jitter(rng),
        );
        body.angular_velocity += spin;
        log::debug!(
            "bounce: normal=({:.2}, {:.2}, {:.2}) speed_in={:.3}",
            normal.x,
            normal.y,
            normal.z,
            -approach
        );

        BoundaryOutcome::Reflected {
            violations,
            normal,
            spin,
        }
    }
}

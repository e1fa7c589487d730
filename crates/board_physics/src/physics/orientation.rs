//! Euler-angle orientation and the face-settling torque
//!
//! Orientation is three unbounded Euler angles composed X, then Y, then Z.
//! Gimbal lock is not handled.

use crate::foundation::math::{utils, EulerAngles, Vec3};

/// A face whose normal is at least this anti-parallel to gravity is resting
pub const SETTLED_ALIGNMENT: f32 = -0.99;

/// Cross products shorter than this give no usable axis
pub const AXIS_EPSILON: f32 = 0.001;

/// Rotate a direction by `angles` (X, then Y, then Z)
pub fn rotate_vector(v: Vec3, angles: EulerAngles) -> Vec3 {
    let (sx, cx) = angles.x.sin_cos();
    let (sy, cy) = angles.y.sin_cos();
    let (sz, cz) = angles.z.sin_cos();

    let (x, y, z) = (v.x, v.y * cx - v.z * sx, v.y * sx + v.z * cx);
    let (x, z) = (x * cy + z * sy, -x * sy + z * cy);
    let (x, y) = (x * cz - y * sz, x * sz + y * cz);

    Vec3::new(x, y, z)
}

/// Rotate a body-local position by `angles`
///
/// Identical to [`rotate_vector`]; translation is applied by the caller.
pub fn rotate_point(p: Vec3, angles: EulerAngles) -> Vec3 {
    rotate_vector(p, angles)
}

/// Explicit Euler step of the angles
pub fn advance_orientation(angles: EulerAngles, angular_velocity: Vec3, dt: f32) -> EulerAngles {
    angles + angular_velocity * dt
}

/// Result of the face-settling torque computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stabilization {
    /// The lowest face already rests against gravity
    Settled {
        /// Index of the resting face
        face: usize,
    },
    /// No usable rotation axis (or no faces)
    Degenerate,
    /// Torque that turns `face` toward resting
    Correcting {
        /// Index of the face being settled
        face: usize,
        /// Angular velocity contribution
        torque: Vec3,
    },
}

impl Stabilization {
    /// Torque to add, zero unless correcting
    pub fn torque(&self) -> Vec3 {
        match self {
            Self::Correcting { torque, .. } => *torque,
            Self::Settled { .. } | Self::Degenerate => Vec3::zeros(),
        }
    }

    /// Whether the body is resting on a face
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settled { .. })
    }
}

/// Torque that rolls the body onto the face pointing most against gravity
///
/// Each local normal is rotated into world space and dotted with the unit
/// `gravity`. The face with the smallest dot product is chosen. Once that
/// dot product reaches [`SETTLED_ALIGNMENT`] no torque is produced;
/// otherwise the torque axis is `gravity x normal` scaled by the remaining
/// misalignment angle times `strength`.
pub fn stabilizing_torque(
    face_normals: &[Vec3],
    orientation: EulerAngles,
    gravity: Vec3,
    strength: f32,
) -> Stabilization {
    let best = face_normals
        .iter()
        .enumerate()
        .map(|(face, normal)| {
            let world = rotate_vector(*normal, orientation);
            (face, world, world.dot(&gravity))
        })
        .fold(None, |best: Option<(usize, Vec3, f32)>, candidate| match best {
            Some(current) if current.2 <= candidate.2 => Some(current),
            _ => Some(candidate),
        });

    let Some((face, world_normal, alignment)) = best else {
        return Stabilization::Degenerate;
    };

    if alignment <= SETTLED_ALIGNMENT {
        return Stabilization::Settled { face };
    }

    match utils::try_normalize(gravity.cross(&world_normal), AXIS_EPSILON) {
        Some(axis) => {
            let misalignment = (-alignment).clamp(-1.0, 1.0).acos();
            Stabilization::Correcting {
                face,
                torque: axis * misalignment * strength,
            }
        }
        None => Stabilization::Degenerate,
    }
}

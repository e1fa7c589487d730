//! Physics module for the two demo kernels
//!
//! The cube half covers projection, rotation, integration and the
//! box boundary. The platformer half lives in [`platformer`].

pub mod boundary;
pub mod orientation;
pub mod platformer;
pub mod polyhedron;
pub mod projection;
pub mod rigid_body;

pub use boundary::{BoundaryBox, BoundaryOutcome};
pub use orientation::{
    advance_orientation, rotate_point, rotate_vector, stabilizing_torque, Stabilization,
};
pub use polyhedron::{Polyhedron, CUBOID_EDGES, CUBOID_FACE_NORMALS, CUBOID_VERTEX_COUNT};
pub use projection::{Projected, Projection, ProjectionMode};
pub use rigid_body::{IntegratorParams, RigidBody, StepOutcome};

//! Box-shaped wireframe geometry
//!
//! Both the simulated cube and its containing box share one topology: eight
//! corners, twelve edges, six face normals.

use crate::foundation::math::Vec3;

/// Number of corners of a cuboid
pub const CUBOID_VERTEX_COUNT: usize = 8;

/// Corner index pairs, bottom ring, top ring, then the verticals
pub const CUBOID_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Local-space outward normals: -Z, +Z, -Y, +Y, -X, +X
pub const CUBOID_FACE_NORMALS: [Vec3; 6] = [
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
];

/// Immutable cuboid geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    vertices: [Vec3; CUBOID_VERTEX_COUNT],
}

impl Polyhedron {
    /// Axis-aligned cuboid with the given half extents, centred at `center`
    pub fn cuboid(half_extents: Vec3, center: Vec3) -> Self {
        let h = half_extents;
        let signs: [(f32, f32, f32); CUBOID_VERTEX_COUNT] = [
            (-1.0, -1.0, -1.0),
            (1.0, -1.0, -1.0),
            (1.0, 1.0, -1.0),
            (-1.0, 1.0, -1.0),
            (-1.0, -1.0, 1.0),
            (1.0, -1.0, 1.0),
            (1.0, 1.0, 1.0),
            (-1.0, 1.0, 1.0),
        ];
        let vertices = signs.map(|(sx, sy, sz)| center + Vec3::new(sx * h.x, sy * h.y, sz * h.z));
        Self { vertices }
    }

    /// Cube centred on its own origin
    pub fn cube(half_size: f32) -> Self {
        Self::cuboid(Vec3::repeat(half_size), Vec3::zeros())
    }

    /// The containing box: square in x/y, pushed back by `z_offset`
    pub fn environment(half_size: f32, z_offset: f32) -> Self {
        Self::cuboid(Vec3::repeat(half_size), Vec3::new(0.0, 0.0, z_offset))
    }

    /// Corner positions
    pub const fn vertices(&self) -> &[Vec3; CUBOID_VERTEX_COUNT] {
        &self.vertices
    }

    /// Edge list
    pub const fn edges(&self) -> &'static [(usize, usize)] {
        &CUBOID_EDGES
    }

    /// Local face normals
    pub const fn face_normals(&self) -> &'static [Vec3; 6] {
        &CUBOID_FACE_NORMALS
    }

    /// Smallest and largest corner coordinates
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::repeat(f32::INFINITY), Vec3::repeat(f32::NEG_INFINITY)),
            |(min, max), v| (min.inf(v), max.sup(v)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_corners() {
        let cube = Polyhedron::cube(15.0);
        assert_eq!(cube.vertices()[0], Vec3::new(-15.0, -15.0, -15.0));
        assert_eq!(cube.vertices()[6], Vec3::new(15.0, 15.0, 15.0));
        assert_eq!(cube.edges().len(), 12);
    }

    #[test]
    fn test_every_edge_is_axis_aligned_and_full_length() {
        let cube = Polyhedron::cube(1.0);
        for &(a, b) in cube.edges() {
            let d = cube.vertices()[b] - cube.vertices()[a];
            assert!((d.abs().sum() - 2.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_environment_bounds() {
        let env = Polyhedron::environment(60.0, 60.0);
        let (min, max) = env.bounds();
        assert_eq!(min, Vec3::new(-60.0, -60.0, 0.0));
        assert_eq!(max, Vec3::new(60.0, 60.0, 120.0));
    }

    #[test]
    fn test_face_normals_are_unit_and_opposed() {
        for pair in CUBOID_FACE_NORMALS.chunks(2) {
            assert_eq!(pair[0], -pair[1]);
            assert!((pair[0].magnitude() - 1.0).abs() < f32::EPSILON);
        }
    }
}

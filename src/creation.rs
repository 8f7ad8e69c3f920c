use nalgebra::Point3;

use crate::mesh::Mesh;

/// Create a box mesh centered at the origin with the given extents.
pub fn create_box(extents: &[f64; 3]) -> Mesh {
    let half = [extents[0] / 2.0, extents[1] / 2.0, extents[2] / 2.0];

    let vertices = vec![
        Point3::new(-half[0], -half[1], -half[2]),
        Point3::new(half[0], -half[1], -half[2]),
        Point3::new(half[0], half[1], -half[2]),
        Point3::new(-half[0], half[1], -half[2]),
        Point3::new(-half[0], -half[1], half[2]),
        Point3::new(half[0], -half[1], half[2]),
        Point3::new(half[0], half[1], half[2]),
        Point3::new(-half[0], half[1], half[2]),
    ];

    let faces = vec![
        (0, 1, 2),
        (0, 2, 3),
        (4, 5, 6),
        (4, 6, 7),
        (0, 1, 5),
        (0, 5, 4),
        (2, 3, 7),
        (2, 7, 6),
        (1, 2, 6),
        (1, 6, 5),
        (3, 0, 4),
        (3, 4, 7),
    ];

    Mesh::new(vertices, Some(faces))
}

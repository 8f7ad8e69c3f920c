use anyhow::Result;
use nalgebra::Point3;

use crate::error::PrepError;

/// A triangular mesh: vertex positions plus optional face topology.
///
/// Vertex order is identity. Faces reference vertices by index, so every
/// transformation must keep indices valid against the vertex array it
/// returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,

    // `None` when the source format carried no topology at all,
    // which is distinct from an empty face list.
    pub faces: Option<Vec<(usize, usize, usize)>>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f64>>, faces: Option<Vec<(usize, usize, usize)>>) -> Self {
        Self { vertices, faces }
    }

    pub fn face_count(&self) -> usize {
        self.faces.as_ref().map_or(0, |f| f.len())
    }

    /// Calculate an axis-aligned bounding box (AABB) for the mesh,
    /// or an error if the mesh has no vertices.
    ///
    /// Returns
    /// ------------
    /// bounds
    ///   The lower and upper corners of the bounding box.
    pub fn bounds(&self) -> Result<(Point3<f64>, Point3<f64>)> {
        if self.vertices.is_empty() {
            return Err(PrepError::EmptyInput.into());
        }

        let (mut lower, mut upper) = (self.vertices[0], self.vertices[0]);
        for vertex in self.vertices.iter().skip(1) {
            // use componentwise min/max
            lower = lower.inf(vertex);
            upper = upper.sup(vertex);
        }

        Ok((lower, upper))
    }

    /// Recenter the mesh on its bounding-box midpoint and rescale so the
    /// largest axis extent becomes 1.
    ///
    /// The midpoint is the center of the bounding box, not the vertex
    /// centroid, and the scale is a single scalar so the mesh keeps its
    /// proportions. A mesh where every vertex coincides has no usable
    /// scale and is rejected rather than producing NaN coordinates.
    pub fn normalize_unit_cube(self) -> Result<Self> {
        let (lower, upper) = self.bounds()?;

        let center = nalgebra::center(&lower, &upper);
        let extents = upper - lower;
        let scale = extents.x.max(extents.y).max(extents.z);
        if scale == 0.0 {
            return Err(PrepError::DegenerateMesh.into());
        }

        let vertices = self
            .vertices
            .into_iter()
            .map(|vertex| Point3::from((vertex - center) / scale))
            .collect();

        Ok(Self {
            vertices,
            faces: self.faces,
        })
    }
}

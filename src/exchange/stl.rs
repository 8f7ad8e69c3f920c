use anyhow::{Result, anyhow};
use nalgebra::Point3;
use rayon::prelude::*;

use crate::mesh::Mesh;

pub struct BinaryStl {
    triangles: Vec<StlTriangle>,
}

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StlTriangle {
    pub normal: [f32; 3],
    pub vertices: [f32; 9],
    pub attributes: u16,
}

// The size of each triangle record in bytes
const STL_TRIANGLE_SIZE: usize = std::mem::size_of::<StlTriangle>();

impl BinaryStl {
    /// Parse a binary or ASCII STL file from the raw bytes. Binary STL
    /// files must exactly match the triangle count in the header, or the
    /// bytes will be re-parsed as ASCII.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 84 {
            // too short for the binary layout, may still be a tiny ASCII file
            return Self::from_ascii(bytes);
        }

        // the number of triangles is a little-endian u32 at bytes 80..84
        let triangle_count = u32::from_le_bytes(bytes[80..84].try_into().unwrap());

        if bytes.len() != 84 + (triangle_count as usize) * STL_TRIANGLE_SIZE {
            return Self::from_ascii(bytes);
        }

        let triangles: &[StlTriangle] = bytemuck::try_cast_slice(&bytes[84..])
            .map_err(|_| anyhow!("could not interpret bytes as STL triangles"))?;

        Ok(Self {
            triangles: triangles.to_vec(),
        })
    }

    /// Parse an ASCII STL file: `facet` chunks holding three `vertex` lines.
    fn from_ascii(bytes: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(bytes);

        let triangles = text
            .split("facet")
            .collect::<Vec<_>>()
            .par_iter()
            .filter_map(|chunk| {
                let mut vertices = [0.0f32; 9];
                let mut vertex_count = 0;

                for line in chunk.lines() {
                    let mut parts = line.split_whitespace();
                    if parts.next() != Some("vertex") {
                        continue;
                    }
                    if vertex_count >= 3 {
                        break;
                    }
                    for i in 0..3 {
                        vertices[vertex_count * 3 + i] =
                            parts.next().and_then(|v| v.parse().ok())?;
                    }
                    vertex_count += 1;
                }

                (vertex_count == 3).then_some(StlTriangle {
                    normal: [0.0; 3],
                    vertices,
                    attributes: 0,
                })
            })
            .collect::<Vec<_>>();

        Ok(Self { triangles })
    }

    /// Expand the triangle soup into a Mesh. STL has no shared-vertex
    /// topology, so every triangle contributes three fresh vertices and
    /// the faces are just consecutive index triples.
    pub fn into_mesh(self) -> Mesh {
        let vertices: Vec<Point3<f64>> = self
            .triangles
            .iter()
            .flat_map(|t| {
                let v = t.vertices; // copy out of the packed struct
                (0..3).map(move |i| {
                    Point3::new(v[i * 3] as f64, v[i * 3 + 1] as f64, v[i * 3 + 2] as f64)
                })
            })
            .collect();

        let faces = (0..vertices.len() / 3)
            .map(|i| (i * 3, i * 3 + 1, i * 3 + 2))
            .collect();

        Mesh::new(vertices, Some(faces))
    }
}

use nalgebra::Point3;
use rayon::prelude::*;

use crate::mesh::Mesh;

/// The intermediate representation of a single line from an OBJ file.
///
/// Lines are independent of each other, so they can be evaluated in
/// parallel and assembled in order afterwards.
#[derive(Debug, PartialEq)]
enum ObjLine {
    // A vertex position; some exporters append color values which we drop.
    V(Point3<f64>),
    // A face as raw 1-based (or negative, relative-to-end) vertex references.
    F(Vec<i64>),
    // Everything else: vn/vt/o/g/s/usemtl/mtllib directives, comments,
    // blanks. This tool keeps positions and topology only.
    Ignore,
}

impl ObjLine {
    /// Parse a single raw OBJ line into native types.
    fn from_line(line: &str) -> Self {
        // ignore anything after a comment then cleanly split
        let parts: Vec<&str> = line
            .split('#')
            .next()
            .unwrap_or_default()
            .split_whitespace()
            .collect();

        match parts.as_slice() {
            ["v", x, y, z, _color @ ..] => match (x.parse(), y.parse(), z.parse()) {
                (Ok(x), Ok(y), Ok(z)) => ObjLine::V(Point3::new(x, y, z)),
                _ => ObjLine::Ignore,
            },
            ["f", blob @ ..] => ObjLine::F(
                // this way of parsing supports face references like:
                // 1/2/3, 1//3, 1/2, 1
                // only the leading vertex reference matters here
                blob.iter()
                    .filter_map(|f| f.split('/').next()?.parse::<i64>().ok())
                    .collect(),
            ),
            _ => ObjLine::Ignore,
        }
    }
}

/// Resolve a 1-based (or negative, counting back from the most recently
/// defined vertex) OBJ reference against the vertices parsed so far.
fn resolve_index(raw: i64, count: usize) -> Option<usize> {
    if raw > 0 {
        let index = (raw - 1) as usize;
        (index < count).then_some(index)
    } else if raw < 0 {
        count.checked_sub(raw.unsigned_abs() as usize)
    } else {
        // zero is not a valid OBJ reference
        None
    }
}

/// Split a polygon into triangles with a fan out of the first vertex.
/// Correct for convex polygons, which covers the quads OBJ exporters
/// commonly emit.
fn triangulate_fan(indices: &[usize]) -> Vec<(usize, usize, usize)> {
    if indices.len() < 3 {
        return Vec::new();
    }
    (1..indices.len() - 1)
        .map(|i| (indices[0], indices[i], indices[i + 1]))
        .collect()
}

pub struct ObjMesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<(usize, usize, usize)>,

    // whether any `f` directive appeared at all, so a pure point cloud
    // can be distinguished from a mesh whose faces were unparseable
    saw_face: bool,
}

impl ObjMesh {
    /// Parse OBJ text into vertex positions and triangulated faces.
    pub fn from_string(data: &str) -> Self {
        // parse the lines in parallel
        let lines: Vec<ObjLine> = data
            .lines()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(ObjLine::from_line)
            .collect();

        let mut vertices: Vec<Point3<f64>> = Vec::new();
        let mut faces: Vec<(usize, usize, usize)> = Vec::new();
        let mut saw_face = false;

        for line in lines {
            match line {
                ObjLine::V(point) => vertices.push(point),
                ObjLine::F(raw) => {
                    saw_face = true;
                    let resolved: Vec<usize> = raw
                        .iter()
                        .filter_map(|&reference| resolve_index(reference, vertices.len()))
                        .collect();
                    // drop the whole face if any reference was unresolvable
                    if resolved.len() == raw.len() {
                        faces.extend(triangulate_fan(&resolved));
                    }
                }
                ObjLine::Ignore => (),
            }
        }

        ObjMesh {
            vertices,
            faces,
            saw_face,
        }
    }

    pub fn into_mesh(self) -> Mesh {
        let faces = self.saw_face.then_some(self.faces);
        Mesh::new(self.vertices, faces)
    }
}

use ahash::AHashMap;
use itertools::Itertools;
use nalgebra::Point3;

/// Decimal places used for the merge key. Downstream consumers of the
/// archive depend on this exact quantization, so changing it is a
/// format change, not a tuning knob.
pub const MERGE_DECIMALS: u32 = 6;

// 10^MERGE_DECIMALS
const QUANTUM: f64 = 1e6;

/// One coordinate rounded to six decimals, scaled to an integer microunit
/// so it hashes and orders exactly. Ties round half away from zero.
fn quantize(value: f64) -> i64 {
    (value * QUANTUM).round() as i64
}

fn rounded_key(vertex: &Point3<f64>) -> [i64; 3] {
    [quantize(vertex.x), quantize(vertex.y), quantize(vertex.z)]
}

/// Merge vertices that agree after rounding each coordinate to six
/// decimal places, rewriting faces onto the surviving vertices.
///
/// The survivors are the unique rounded triples in ascending
/// lexicographic (x, y, z) order, and their coordinates are the rounded
/// values rather than the originals: the merge deliberately quantizes
/// its output. Note this is a rounding-equality merge, not an
/// epsilon-ball comparison, so two points 1e-7 apart can still land in
/// different buckets when a rounding boundary falls between them.
///
/// `None` faces stay `None`; the merge never invents topology.
pub fn merge_duplicate_vertices(
    vertices: &[Point3<f64>],
    faces: Option<&[(usize, usize, usize)]>,
) -> (Vec<Point3<f64>>, Option<Vec<(usize, usize, usize)>>) {
    // sort-and-group: each unique key's sorted position is its output index
    let unique: Vec<[i64; 3]> = vertices
        .iter()
        .map(rounded_key)
        .sorted_unstable()
        .dedup()
        .collect();

    let output_index: AHashMap<[i64; 3], usize> = unique
        .iter()
        .enumerate()
        .map(|(index, key)| (*key, index))
        .collect();

    // original vertex index -> surviving vertex index
    let remap: Vec<usize> = vertices
        .iter()
        .map(|vertex| output_index[&rounded_key(vertex)])
        .collect();

    let merged = unique
        .iter()
        .map(|key| {
            Point3::new(
                key[0] as f64 / QUANTUM,
                key[1] as f64 / QUANTUM,
                key[2] as f64 / QUANTUM,
            )
        })
        .collect();

    let faces = faces.map(|faces| {
        faces
            .iter()
            .map(|&(a, b, c)| (remap[a], remap[b], remap[c]))
            .collect()
    });

    (merged, faces)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::creation::create_box;

    #[test]
    fn test_merge_near_coincident() {
        // both of the first two round to (0, 0, 0) at six decimals
        let vertices = vec![
            Point3::new(0.000_000_1, 0.0, 0.0),
            Point3::new(0.000_000_2, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        let faces = vec![(0, 1, 2), (1, 0, 2)];

        let (merged, remapped) = merge_duplicate_vertices(&vertices, Some(&faces));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(merged[1], Point3::new(1.0, 0.0, 0.0));

        // faces referencing either original must point at the one survivor
        let remapped = remapped.unwrap();
        assert_eq!(remapped[0], (0, 0, 1));
        assert_eq!(remapped[1], (0, 0, 1));
    }

    #[test]
    fn test_merge_keeps_distinct_vertices() {
        let mesh = create_box(&[1.0, 1.0, 1.0]);
        let (merged, faces) =
            merge_duplicate_vertices(&mesh.vertices, mesh.faces.as_deref());

        // a box has no duplicates, so only the order may change
        assert_eq!(merged.len(), 8);
        for face in faces.unwrap() {
            assert!(face.0 < 8 && face.1 < 8 && face.2 < 8);
        }
    }

    #[test]
    fn test_merge_output_properties() {
        let vertices = vec![
            Point3::new(0.25, -1.0, 3.5),
            Point3::new(0.250_000_04, -1.0, 3.5),
            Point3::new(-2.0, 0.5, 0.5),
            Point3::new(7.125, 7.125, -7.125),
            Point3::new(-2.0, 0.5, 0.500_000_2),
        ];

        let (merged, faces) = merge_duplicate_vertices(&vertices, None);
        assert!(faces.is_none());
        assert!(merged.len() <= vertices.len());
        assert_eq!(merged.len(), 3);

        for (a, b) in merged.iter().tuple_windows() {
            // ascending lexicographic order and uniqueness of the keys
            assert!(rounded_key(a) < rounded_key(b));
        }
        for vertex in merged.iter() {
            // every survivor is a fixed point of the rounding
            for axis in 0..3 {
                let rounded = (vertex[axis] * QUANTUM).round() / QUANTUM;
                assert_eq!(vertex[axis], rounded);
            }
        }
    }

    #[test]
    fn test_merge_empty() {
        let (merged, faces) = merge_duplicate_vertices(&[], None);
        assert!(merged.is_empty());
        assert!(faces.is_none());
    }

    #[test]
    fn test_quantize_negative() {
        assert_eq!(quantize(-0.000_000_4), 0);
        assert_eq!(quantize(-0.000_000_5), -1);
        assert_eq!(quantize(-1.5), -1_500_000);
    }
}

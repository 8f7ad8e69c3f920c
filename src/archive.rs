use std::fs::File;
use std::path::Path;

use anyhow::Result;
use log::info;
use nalgebra::Point3;
use ndarray::Array2;
use ndarray_npy::{NpzReader, NpzWriter};

/// Write the processed arrays as a compressed `.npz` archive,
/// overwriting any existing file at `path`.
///
/// The container holds exactly two entries: `vertices` as an `(n, 3)`
/// float64 array and `faces` as an `(m, 3)` int32 array, where absent
/// face data is stored as the empty `(0, 3)` array.
pub fn save_processed(
    path: &Path,
    vertices: &[Point3<f64>],
    faces: Option<&[(usize, usize, usize)]>,
) -> Result<()> {
    let mut npz = NpzWriter::new_compressed(File::create(path)?);

    let flat: Vec<f64> = vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect();
    npz.add_array("vertices", &Array2::from_shape_vec((vertices.len(), 3), flat)?)?;

    let faces = faces.unwrap_or_default();
    let flat: Vec<i32> = faces
        .iter()
        .flat_map(|&(a, b, c)| [a as i32, b as i32, c as i32])
        .collect();
    npz.add_array("faces", &Array2::from_shape_vec((faces.len(), 3), flat)?)?;

    npz.finish()?;
    info!("saved processed data to {}", path.display());
    Ok(())
}

/// Read an archive written by [`save_processed`]. An empty faces entry
/// comes back as `None`.
#[allow(clippy::type_complexity)]
pub fn load_processed(path: &Path) -> Result<(Vec<Point3<f64>>, Option<Vec<(usize, usize, usize)>>)> {
    let mut npz = NpzReader::new(File::open(path)?)?;

    let vertices: Array2<f64> = npz.by_name("vertices")?;
    let vertices = vertices
        .rows()
        .into_iter()
        .map(|row| Point3::new(row[0], row[1], row[2]))
        .collect();

    let faces: Array2<i32> = npz.by_name("faces")?;
    let faces = if faces.nrows() == 0 {
        None
    } else {
        Some(
            faces
                .rows()
                .into_iter()
                .map(|row| (row[0] as usize, row[1] as usize, row[2] as usize))
                .collect(),
        )
    };

    Ok((vertices, faces))
}

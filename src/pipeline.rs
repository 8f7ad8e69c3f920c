use std::path::Path;

use anyhow::Result;
use log::info;

use crate::archive::save_processed;
use crate::dedup::merge_duplicate_vertices;
use crate::exchange::load_path;

/// Run the full preprocessing pipeline: load the mesh, normalize it to
/// the unit cube, merge duplicate vertices, write the compressed archive.
///
/// Fails fast at the first stage error. The output file is the only
/// write and it happens last, so a failed run leaves nothing on disk.
pub fn preprocess(input: &Path, output: &Path) -> Result<()> {
    let mesh = load_path(input)?;

    let mesh = mesh.normalize_unit_cube()?;
    info!("vertices normalized: centered at origin, largest extent 1");

    let before = mesh.vertices.len();
    let (vertices, faces) = merge_duplicate_vertices(&mesh.vertices, mesh.faces.as_deref());
    info!("removed {} duplicate vertices", before - vertices.len());

    save_processed(output, &vertices, faces.as_deref())?;
    Ok(())
}

mod obj;
mod stl;

use std::fs;
use std::path::Path;

use anyhow::Result;
use log::info;

use crate::error::PrepError;
use crate::mesh::Mesh;

use crate::exchange::obj::ObjMesh;
use crate::exchange::stl::BinaryStl;

// An enum to represent the supported mesh file formats.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshFormat {
    // the OBJ format, an ASCII format with a lot of extra junk
    OBJ,
    // the STL format is a binary or ASCII format with a pure triangle soup
    STL,
}

impl MeshFormat {
    /// Convert a string to a MeshFormat enum.
    pub fn from_string(s: &str) -> Result<Self> {
        // clean up to match 'obj', '.obj', ' .OBJ ', etc
        let binding = s.to_ascii_lowercase();
        let clean = binding.trim().trim_start_matches('.').trim();
        match clean {
            "obj" => Ok(MeshFormat::OBJ),
            "stl" => Ok(MeshFormat::STL),
            _ => Err(PrepError::UnsupportedFormat(clean.to_string()).into()),
        }
    }
}

/// Parse raw file bytes in the given format into a Mesh.
///
/// The raw parsed geometry is returned as-is: no vertex merging, no
/// normal generation, no topology repair.
pub fn load_mesh(file_data: &[u8], file_type: MeshFormat) -> Result<Mesh> {
    let mesh = match file_type {
        MeshFormat::OBJ => ObjMesh::from_string(&String::from_utf8_lossy(file_data)).into_mesh(),
        MeshFormat::STL => BinaryStl::from_bytes(file_data)?.into_mesh(),
    };

    if mesh.vertices.is_empty() {
        return Err(PrepError::InvalidMesh.into());
    }

    Ok(mesh)
}

/// Load a mesh from a file path, picking the parser from the extension.
pub fn load_path(path: &Path) -> Result<Mesh> {
    if !path.is_file() {
        return Err(PrepError::NotFound(path.to_path_buf()).into());
    }

    let format =
        MeshFormat::from_string(path.extension().and_then(|e| e.to_str()).unwrap_or_default())?;

    let mesh = load_mesh(&fs::read(path)?, format)?;
    info!(
        "loaded {} vertices and {} faces from {}",
        mesh.vertices.len(),
        mesh.face_count(),
        path.display()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_mesh_format_keys() {
        // check our string cleanup logic
        assert_eq!(MeshFormat::from_string("obj").unwrap(), MeshFormat::OBJ);
        assert_eq!(MeshFormat::from_string("OBJ").unwrap(), MeshFormat::OBJ);
        assert_eq!(MeshFormat::from_string(".obj").unwrap(), MeshFormat::OBJ);
        assert_eq!(MeshFormat::from_string("  .ObJ ").unwrap(), MeshFormat::OBJ);
        assert_eq!(MeshFormat::from_string("stl").unwrap(), MeshFormat::STL);
        assert_eq!(MeshFormat::from_string(".STL").unwrap(), MeshFormat::STL);
        assert_eq!(MeshFormat::from_string("  .StL ").unwrap(), MeshFormat::STL);

        let err = MeshFormat::from_string("gltf").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PrepError>(),
            Some(PrepError::UnsupportedFormat(f)) if f == "gltf"
        ));
    }

    #[test]
    fn test_load_path_missing() {
        let err = load_path(Path::new("does/not/exist.obj")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PrepError>(),
            Some(PrepError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_mesh_no_vertices() {
        let err = load_mesh(b"# a comment with no geometry\n", MeshFormat::OBJ).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PrepError>(),
            Some(PrepError::InvalidMesh)
        ));
    }
}

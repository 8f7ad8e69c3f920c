use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for the preprocessing pipeline.
///
/// Stages raise these through `anyhow`, so callers that need to
/// distinguish causes can `downcast_ref::<PrepError>()`.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("loaded object has no vertices")]
    InvalidMesh,

    #[error("no vertices to normalize")]
    EmptyInput,

    #[error("degenerate mesh: bounding box has zero extent")]
    DegenerateMesh,

    #[error("unsupported file type: `{0}`")]
    UnsupportedFormat(String),
}

pub mod archive;
pub mod creation;
pub mod dedup;
pub mod error;
pub mod exchange;
pub mod mesh;
pub mod pipeline;

pub use error::PrepError;
pub use mesh::Mesh;

use thiserror::Error;

use crate::face::CubeFace;

/// Errors that abort a sky bake. Every variant is fatal to the bake that raised it.
#[derive(Debug, Error)]
pub enum BakeError {
    #[error("invalid face resolution {0} (must be > 0)")]
    InvalidResolution(u32),

    #[error("face {face} rendered at {actual_width}x{actual_height}, expected {expected}x{expected}")]
    SizeMismatch {
        face: CubeFace,
        expected: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("cannot stitch faces: {0}")]
    DimensionMismatch(String),

    #[error("no {0} collaborator configured")]
    MissingCollaborator(&'static str),

    #[error("rendering face {face} failed: {reason}")]
    RenderFailed { face: CubeFace, reason: String },

    #[error("invalid bake configuration: {0}")]
    InvalidConfig(String),

    #[error("importer failed: {0}")]
    Importer(String),
}

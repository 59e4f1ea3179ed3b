use std::path::PathBuf;

use cubefog_core::BakeError;

/// Errors that can occur while writing or reading baked artifacts.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("EXR encoding failed: {0}")]
    EncodeError(String),

    #[error("EXR decoding failed: {0}")]
    DecodeError(String),

    #[error("failed to write import settings: {0}")]
    SettingsWriteError(String),

    #[error("failed to parse import settings: {0}")]
    SettingsParseError(String),

    #[error("invalid strip artifact: {0}")]
    InvalidStrip(String),

    #[error("artifact not found: {0}")]
    MissingArtifact(PathBuf),
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return PersistError::MissingArtifact(path);
        }
        PersistError::Io { path, source }
    }
}

impl From<PersistError> for BakeError {
    fn from(e: PersistError) -> Self {
        BakeError::Importer(e.to_string())
    }
}

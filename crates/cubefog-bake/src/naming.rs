//! Artifact names. The importer finds per-face intermediates by these names,
//! so they are fixed: `<name>_CUBE_<FACE>.exr` and `<name>_CUBE.exr`.

use cubefog_core::constants::ARTIFACT_EXTENSION;
use cubefog_core::CubeFace;

pub fn face_artifact_name(name: &str, face: CubeFace) -> String {
    format!("{name}_CUBE_{}.{ARTIFACT_EXTENSION}", face.tag())
}

pub fn strip_artifact_name(name: &str) -> String {
    format!("{name}_CUBE.{ARTIFACT_EXTENSION}")
}

/// Sidecar holding the import settings of a strip artifact.
pub fn import_settings_name(strip_artifact: &str) -> String {
    format!("{strip_artifact}.ron")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubefog_core::ALL_FACES;

    #[test]
    fn test_face_names() {
        assert_eq!(
            face_artifact_name("CubemapFog", CubeFace::PositiveX),
            "CubemapFog_CUBE_X_POS.exr"
        );
        assert_eq!(face_artifact_name("Sky", CubeFace::NegativeZ), "Sky_CUBE_Z_NEG.exr");
        let names: std::collections::HashSet<String> =
            ALL_FACES.iter().map(|&f| face_artifact_name("Sky", f)).collect();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_strip_names() {
        assert_eq!(strip_artifact_name("CubemapFog"), "CubemapFog_CUBE.exr");
        assert_eq!(import_settings_name("Sky_CUBE.exr"), "Sky_CUBE.exr.ron");
    }
}

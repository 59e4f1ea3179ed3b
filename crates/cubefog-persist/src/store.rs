use std::fs;
use std::path::{Path, PathBuf};

use cubefog_bake::naming::{import_settings_name, strip_artifact_name};
use cubefog_bake::{CubemapImporter, ImportSettings};
use cubefog_core::{BakeError, FaceImage, StripImage};

use crate::error::PersistError;
use crate::exr::{decode_exr, encode_exr};

/// A strip artifact read back from disk together with its import settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCubemap {
    pub strip: StripImage,
    pub settings: ImportSettings,
}

/// Importer that keeps baked artifacts as EXR files in one directory.
///
/// The import settings of a strip are stored next to it as a RON sidecar.
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact_path(&self, artifact: &str) -> PathBuf {
        self.root.join(artifact)
    }

    /// Write an EXR artifact, replacing any previous file of the same name.
    pub fn write_image(&self, artifact: &str, pixels: &image::Rgba32FImage) -> Result<PathBuf, PersistError> {
        let bytes = encode_exr(pixels)?;
        let path = self.artifact_path(artifact);
        self.write_replacing(&path, &bytes)?;
        Ok(path)
    }

    /// Write the strip and its sidecar. Both are written to temporary files
    /// first; on any failure the previous strip and sidecar stay in place.
    pub fn write_strip(
        &self,
        artifact: &str,
        strip: &StripImage,
        settings: &ImportSettings,
    ) -> Result<PathBuf, PersistError> {
        let sidecar = ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::default())
            .map_err(|e| PersistError::SettingsWriteError(e.to_string()))?;
        let bytes = encode_exr(strip.pixels())?;

        let path = self.artifact_path(artifact);
        let sidecar_path = self.artifact_path(&import_settings_name(artifact));

        let strip_tmp = self.write_tmp(&path, &bytes)?;
        let sidecar_tmp = match self.write_tmp(&sidecar_path, sidecar.as_bytes()) {
            Ok(tmp) => tmp,
            Err(e) => {
                discard_tmp(&strip_tmp);
                return Err(e);
            }
        };

        // The sidecar is small, keep the old one around until the strip is in place.
        let previous_sidecar = fs::read(&sidecar_path).ok();
        if let Err(e) = commit_tmp(&sidecar_tmp, &sidecar_path) {
            discard_tmp(&strip_tmp);
            return Err(e);
        }
        if let Err(e) = commit_tmp(&strip_tmp, &path) {
            let restored = match previous_sidecar {
                Some(old) => fs::write(&sidecar_path, old),
                None => fs::remove_file(&sidecar_path),
            };
            if let Err(restore) = restored {
                log::warn!("Failed to restore {}: {restore}", sidecar_path.display());
            }
            return Err(e);
        }
        Ok(path)
    }

    /// Delete artifacts by name. Artifacts that are already gone are skipped.
    /// Every artifact is attempted; the first failure is returned.
    pub fn remove_artifacts(&self, artifacts: &[String]) -> Result<(), PersistError> {
        let mut first_error = None;
        for artifact in artifacts {
            let path = self.artifact_path(artifact);
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    log::warn!("Failed to remove {}: {e}", path.display());
                    if first_error.is_none() {
                        first_error = Some(PersistError::io(path, e));
                    }
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Read the strip baked under `name` and its import settings.
    pub fn load_cubemap(&self, name: &str) -> Result<LoadedCubemap, PersistError> {
        let artifact = strip_artifact_name(name);
        let path = self.artifact_path(&artifact);
        let bytes = fs::read(&path).map_err(|e| PersistError::io(&path, e))?;
        let strip = StripImage::from_image(decode_exr(&bytes)?)
            .map_err(|e| PersistError::InvalidStrip(e.to_string()))?;

        let sidecar_path = self.artifact_path(&import_settings_name(&artifact));
        let sidecar = fs::read_to_string(&sidecar_path).map_err(|e| PersistError::io(&sidecar_path, e))?;
        let settings = ron::Options::default()
            .from_str(&sidecar)
            .map_err(|e| PersistError::SettingsParseError(e.to_string()))?;

        Ok(LoadedCubemap { strip, settings })
    }

    /// Write through a temporary file so an existing artifact is never left half-written.
    fn write_replacing(&self, path: &Path, bytes: &[u8]) -> Result<(), PersistError> {
        let tmp = self.write_tmp(path, bytes)?;
        commit_tmp(&tmp, path)
    }

    /// Write `bytes` next to `path` under a `.tmp` name and return that name.
    fn write_tmp(&self, path: &Path, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        fs::create_dir_all(&self.root).map_err(|e| PersistError::io(&self.root, e))?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        if let Err(e) = fs::write(&tmp, bytes) {
            discard_tmp(&tmp);
            return Err(PersistError::io(&tmp, e));
        }
        Ok(tmp)
    }
}

fn commit_tmp(tmp: &Path, path: &Path) -> Result<(), PersistError> {
    fs::rename(tmp, path).map_err(|e| {
        discard_tmp(tmp);
        PersistError::io(path, e)
    })
}

fn discard_tmp(tmp: &Path) {
    match fs::remove_file(tmp) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Failed to remove temporary file {}: {e}", tmp.display()),
    }
}

impl CubemapImporter for DirectoryStore {
    fn stage_face(&mut self, artifact: &str, face: &FaceImage) -> Result<(), BakeError> {
        let path = self.write_image(artifact, face.pixels())?;
        log::debug!("Staged face {} at {}", face.face(), path.display());
        Ok(())
    }

    fn import_strip(
        &mut self,
        artifact: &str,
        strip: &StripImage,
        settings: &ImportSettings,
    ) -> Result<(), BakeError> {
        let path = self.write_strip(artifact, strip, settings)?;
        log::info!("Wrote {}x{} strip to {}", strip.width(), strip.height(), path.display());
        Ok(())
    }

    fn discard_staged(&mut self, artifacts: &[String]) -> Result<(), BakeError> {
        self.remove_artifacts(artifacts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubefog_bake::naming::face_artifact_name;
    use cubefog_bake::{BakeConfig, CubemapConvolution, FaceView, SkyBaker};
    use cubefog_core::{CubeFace, ALL_FACES};
    use image::{Rgba, Rgba32FImage};

    /// Fresh scratch directory under the system temp dir, removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(test: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("cubefog-{test}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            Self(dir)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn gradient(view: &FaceView, resolution: u32) -> Result<Rgba32FImage, BakeError> {
        Ok(Rgba32FImage::from_fn(resolution, resolution, |x, y| {
            let d = view.ray_direction(x, y, resolution);
            Rgba([d.x * 4.0, d.y * 4.0, d.z * 4.0, 1.0])
        }))
    }

    fn config() -> BakeConfig {
        BakeConfig {
            name: "Sky".into(),
            resolution: 4,
            specular_convolution: true,
        }
    }

    #[test]
    fn test_bake_to_directory_roundtrip() {
        let scratch = ScratchDir::new("roundtrip");
        let mut store = DirectoryStore::new(&scratch.0);
        let mut renderer = gradient;

        let summary = SkyBaker::new(config())
            .with_renderer(&mut renderer)
            .with_importer(&mut store)
            .bake()
            .expect("bake should succeed");
        assert_eq!(summary.strip_artifact, "Sky_CUBE.exr");
        assert!(store.artifact_path("Sky_CUBE.exr").is_file());
        assert!(store.artifact_path("Sky_CUBE.exr.ron").is_file());
        for face in ALL_FACES {
            let staged = store.artifact_path(&face_artifact_name("Sky", face));
            assert!(!staged.exists(), "{} should have been discarded", staged.display());
        }

        let loaded = store.load_cubemap("Sky").expect("load should succeed");
        assert_eq!(loaded.strip.width(), 24);
        assert_eq!(loaded.strip.height(), 4);
        assert_eq!(loaded.settings.convolution, CubemapConvolution::Specular);

        let mut again = gradient;
        let up = again(
            &FaceView {
                face: CubeFace::PositiveY,
                orientation: cubefog_core::capture_poses()[4].1,
                fov_y_degrees: cubefog_core::constants::CAPTURE_FOV_DEGREES,
            },
            4,
        )
        .expect("render");
        assert_eq!(loaded.strip.face(CubeFace::PositiveY).pixels(), &up);
    }

    #[test]
    fn test_rebake_replaces_previous_strip() {
        let scratch = ScratchDir::new("rebake");
        let mut store = DirectoryStore::new(&scratch.0);

        let mut first = gradient;
        SkyBaker::new(config())
            .with_renderer(&mut first)
            .with_importer(&mut store)
            .bake()
            .expect("first bake");

        let mut second = |_: &FaceView, resolution: u32| -> Result<Rgba32FImage, BakeError> {
            Ok(Rgba32FImage::from_pixel(resolution, resolution, Rgba([7.0, 7.0, 7.0, 1.0])))
        };
        let mut smaller = config();
        smaller.resolution = 2;
        smaller.specular_convolution = false;
        SkyBaker::new(smaller)
            .with_renderer(&mut second)
            .with_importer(&mut store)
            .bake()
            .expect("second bake");

        let loaded = store.load_cubemap("Sky").expect("load should succeed");
        assert_eq!(loaded.strip.resolution(), 2);
        assert_eq!(loaded.settings.convolution, CubemapConvolution::None);
        assert!(loaded.strip.pixels().pixels().all(|p| *p == Rgba([7.0, 7.0, 7.0, 1.0])));
    }

    #[test]
    fn test_failed_bake_leaves_directory_untouched() {
        let scratch = ScratchDir::new("failed");
        let mut store = DirectoryStore::new(&scratch.0);
        let mut renderer = |view: &FaceView, resolution: u32| -> Result<Rgba32FImage, BakeError> {
            if view.face == CubeFace::PositiveY {
                return Ok(Rgba32FImage::new(resolution, resolution + 1));
            }
            Ok(Rgba32FImage::new(resolution, resolution))
        };
        let result = SkyBaker::new(config())
            .with_renderer(&mut renderer)
            .with_importer(&mut store)
            .bake();
        assert!(matches!(result, Err(BakeError::SizeMismatch { .. })));
        let entries = fs::read_dir(&scratch.0).map(|d| d.count()).unwrap_or(0);
        assert_eq!(entries, 0, "nothing may be written for a failed bake");
    }

    #[test]
    fn test_load_missing_cubemap() {
        let scratch = ScratchDir::new("missing");
        let store = DirectoryStore::new(&scratch.0);
        let result = store.load_cubemap("Nope");
        assert!(matches!(result, Err(PersistError::MissingArtifact(_))));
    }

    #[test]
    fn test_load_rejects_non_strip_image() {
        let scratch = ScratchDir::new("notstrip");
        let store = DirectoryStore::new(&scratch.0);
        store
            .write_image("Odd_CUBE.exr", &Rgba32FImage::new(5, 5))
            .expect("write should succeed");
        let result = store.load_cubemap("Odd");
        assert!(matches!(result, Err(PersistError::InvalidStrip(_))));
    }

    #[test]
    fn test_remove_skips_missing_artifacts() {
        let scratch = ScratchDir::new("remove");
        let store = DirectoryStore::new(&scratch.0);
        store
            .write_image("a.exr", &Rgba32FImage::new(1, 1))
            .expect("write should succeed");
        store
            .remove_artifacts(&["a.exr".to_string(), "b.exr".to_string()])
            .expect("remove should succeed");
        assert!(!store.artifact_path("a.exr").exists());
    }

    #[test]
    fn test_remove_attempts_every_artifact() {
        let scratch = ScratchDir::new("remove-all");
        let store = DirectoryStore::new(&scratch.0);
        fs::create_dir_all(store.artifact_path("a.exr")).expect("create blocker");
        store
            .write_image("b.exr", &Rgba32FImage::new(1, 1))
            .expect("write should succeed");

        let result = store.remove_artifacts(&["a.exr".to_string(), "b.exr".to_string()]);
        assert!(matches!(result, Err(PersistError::Io { .. })));
        assert!(!store.artifact_path("b.exr").exists(), "later artifacts are still removed");
    }

    #[test]
    fn test_failed_sidecar_write_keeps_previous_strip() {
        let scratch = ScratchDir::new("sidecar");
        let store = DirectoryStore::new(&scratch.0);
        let settings = ImportSettings::from_config(&config());
        let old = StripImage::from_image(Rgba32FImage::from_pixel(12, 2, Rgba([1.0, 2.0, 3.0, 1.0])))
            .expect("valid strip");
        let new = StripImage::from_image(Rgba32FImage::from_pixel(12, 2, Rgba([9.0, 9.0, 9.0, 1.0])))
            .expect("valid strip");
        store.write_strip("Sky_CUBE.exr", &old, &settings).expect("first write");

        let sidecar = store.artifact_path("Sky_CUBE.exr.ron");
        fs::remove_file(&sidecar).expect("remove sidecar");
        fs::create_dir_all(&sidecar).expect("block sidecar");

        let result = store.write_strip("Sky_CUBE.exr", &new, &settings);
        assert!(result.is_err());

        let bytes = fs::read(store.artifact_path("Sky_CUBE.exr")).expect("previous strip kept");
        assert_eq!(&decode_exr(&bytes).expect("decode"), old.pixels());
        let leftovers = fs::read_dir(&scratch.0)
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .count();
        assert_eq!(leftovers, 0, "temporary files must be cleaned up");
    }

    #[test]
    fn test_staging_failure_midway_leaves_no_faces() {
        let scratch = ScratchDir::new("stage-fail");
        let mut store = DirectoryStore::new(&scratch.0);
        // Third capture is -X; a directory in its place makes that write fail.
        let blocker = store.artifact_path(&face_artifact_name("Sky", CubeFace::NegativeX));
        fs::create_dir_all(&blocker).expect("create blocker");

        let mut renderer = gradient;
        let result = SkyBaker::new(config())
            .with_renderer(&mut renderer)
            .with_importer(&mut store)
            .bake();
        assert!(matches!(result, Err(BakeError::Importer(_))));

        let entries: Vec<PathBuf> = fs::read_dir(&scratch.0)
            .expect("read dir")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        assert_eq!(entries, vec![blocker], "only the blocking directory may remain");
    }
}

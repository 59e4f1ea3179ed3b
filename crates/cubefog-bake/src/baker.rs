use std::time::Instant;

use cubefog_core::{BakeError, FaceImage, StripImage};
use serde::{Deserialize, Serialize};

use crate::capture::{CubeFaceCapturer, FaceRenderer};
use crate::config::BakeConfig;
use crate::import::ImportSettings;
use crate::naming::{face_artifact_name, strip_artifact_name};
use crate::stitch::CubeStitcher;

/// Receives the bake output and turns it into a cube texture.
///
/// Faces are staged under their artifact names first, then the stitched
/// strip is handed over in memory, then the staged faces are discarded.
pub trait CubemapImporter {
    fn stage_face(&mut self, artifact: &str, face: &FaceImage) -> Result<(), BakeError>;

    /// Import the strip as a cube texture. Must replace any previous artifact of the same name.
    fn import_strip(
        &mut self,
        artifact: &str,
        strip: &StripImage,
        settings: &ImportSettings,
    ) -> Result<(), BakeError>;

    fn discard_staged(&mut self, artifacts: &[String]) -> Result<(), BakeError>;
}

/// What a successful bake produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BakeSummary {
    pub name: String,
    pub resolution: u32,
    pub strip_artifact: String,
    pub specular_convolution: bool,
    pub elapsed_ms: f64,
}

/// One-shot sky bake: capture, stitch, import.
pub struct SkyBaker<'a> {
    config: BakeConfig,
    renderer: Option<&'a mut dyn FaceRenderer>,
    importer: Option<&'a mut dyn CubemapImporter>,
}

impl<'a> SkyBaker<'a> {
    pub fn new(config: BakeConfig) -> Self {
        Self {
            config,
            renderer: None,
            importer: None,
        }
    }

    pub fn with_renderer(mut self, renderer: &'a mut dyn FaceRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_importer(mut self, importer: &'a mut dyn CubemapImporter) -> Self {
        self.importer = Some(importer);
        self
    }

    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    /// Run the bake. Either the strip is imported, or an error is returned and
    /// the importer holds nothing from this bake. Failing to discard staged
    /// faces after a successful import only warns: the strip is complete.
    pub fn bake(self) -> Result<BakeSummary, BakeError> {
        let start = Instant::now();
        let Self {
            config,
            renderer,
            importer,
        } = self;

        config.validate()?;
        let renderer = renderer.ok_or(BakeError::MissingCollaborator("renderer"))?;
        let importer = importer.ok_or(BakeError::MissingCollaborator("importer"))?;

        log::info!(
            "Baking sky cubemap '{}' ({}x{} per face)...",
            config.name,
            config.resolution,
            config.resolution
        );

        let faces = CubeFaceCapturer::new().capture(config.resolution, renderer)?;

        let mut staged = Vec::with_capacity(faces.len());
        let imported = stage_and_import(&config, &faces, importer, &mut staged);

        let discarded = importer.discard_staged(&staged);
        let strip_artifact = match (imported, discarded) {
            (Ok(artifact), Ok(())) => artifact,
            (Ok(artifact), Err(cleanup)) => {
                log::warn!("Imported {artifact} but failed to discard staged faces: {cleanup}");
                artifact
            }
            (Err(e), Ok(())) => return Err(e),
            (Err(e), Err(cleanup)) => {
                log::warn!("Failed to discard staged faces after error: {cleanup}");
                return Err(e);
            }
        };

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::info!("Imported {strip_artifact} (took {elapsed_ms:.1} ms)");

        Ok(BakeSummary {
            name: config.name.clone(),
            resolution: config.resolution,
            strip_artifact,
            specular_convolution: config.specular_convolution,
            elapsed_ms,
        })
    }
}

fn stage_and_import(
    config: &BakeConfig,
    faces: &[FaceImage],
    importer: &mut dyn CubemapImporter,
    staged: &mut Vec<String>,
) -> Result<String, BakeError> {
    for face in faces {
        let artifact = face_artifact_name(&config.name, face.face());
        importer.stage_face(&artifact, face)?;
        staged.push(artifact);
    }

    let strip = CubeStitcher::stitch(faces)?;
    let artifact = strip_artifact_name(&config.name);
    importer.import_strip(&artifact, &strip, &ImportSettings::from_config(config))?;
    Ok(artifact)
}

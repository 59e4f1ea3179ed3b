use cubefog_core::constants::FACE_COUNT;
use cubefog_core::{BakeError, FaceImage, StripImage, FACE_SLOT_ORDER};
use image::{imageops, Rgba32FImage};

/// Lays six tagged faces side by side in [`FACE_SLOT_ORDER`].
pub struct CubeStitcher;

impl CubeStitcher {
    /// Build the `6R × R` strip. The order of `faces` does not matter, only their tags.
    ///
    /// Fails with `DimensionMismatch` if a face is missing or repeated, not
    /// square, or not the same size as the others.
    pub fn stitch(faces: &[FaceImage]) -> Result<StripImage, BakeError> {
        let mut slots: [Option<&FaceImage>; FACE_COUNT] = [None; FACE_COUNT];
        for face in faces {
            let slot = &mut slots[face.face().slot()];
            if slot.is_some() {
                return Err(BakeError::DimensionMismatch(format!(
                    "face {} supplied more than once",
                    face.face()
                )));
            }
            *slot = Some(face);
        }

        let mut resolution = None;
        for (slot, entry) in slots.iter().enumerate() {
            let face = entry.ok_or_else(|| {
                BakeError::DimensionMismatch(format!("face {} is missing", FACE_SLOT_ORDER[slot]))
            })?;
            if !face.is_square() {
                let (w, h) = face.pixels().dimensions();
                return Err(BakeError::DimensionMismatch(format!(
                    "face {} is {w}x{h}, not square",
                    face.face()
                )));
            }
            let r = *resolution.get_or_insert(face.resolution());
            if face.resolution() != r {
                return Err(BakeError::DimensionMismatch(format!(
                    "face {} has resolution {}, expected {r}",
                    face.face(),
                    face.resolution()
                )));
            }
        }

        let r = resolution.unwrap_or(0);
        if r == 0 {
            return Err(BakeError::DimensionMismatch("faces are empty".into()));
        }

        let mut strip = Rgba32FImage::new(r * FACE_COUNT as u32, r);
        for face in slots.iter().flatten() {
            let offset = face.face().slot() as i64 * r as i64;
            imageops::replace(&mut strip, face.pixels(), offset, 0);
        }

        log::debug!("Stitched {FACE_COUNT} faces into {}x{} strip", strip.width(), strip.height());
        StripImage::from_image(strip)
    }
}

//! Linear HDR pixel buffers for cube faces and stitched strips.
//! Pixels are RGBA f32 and are never converted or resampled by this crate.

use ::image::{imageops, Rgba, Rgba32FImage};

use crate::constants::FACE_COUNT;
use crate::error::BakeError;
use crate::face::{CubeFace, FACE_SLOT_ORDER};

/// One linear RGBA pixel.
pub type HdrPixel = Rgba<f32>;

/// A rendered view of one cube face, tagged with the face it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceImage {
    face: CubeFace,
    pixels: Rgba32FImage,
}

impl FaceImage {
    pub fn new(face: CubeFace, pixels: Rgba32FImage) -> Self {
        Self { face, pixels }
    }

    /// A square face of edge `resolution` filled with a single color.
    pub fn filled(face: CubeFace, resolution: u32, color: HdrPixel) -> Self {
        Self::new(face, Rgba32FImage::from_pixel(resolution, resolution, color))
    }

    pub fn face(&self) -> CubeFace {
        self.face
    }

    pub fn pixels(&self) -> &Rgba32FImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> Rgba32FImage {
        self.pixels
    }

    /// Edge length, assuming the face is square.
    pub fn resolution(&self) -> u32 {
        self.pixels.width()
    }

    pub fn is_square(&self) -> bool {
        self.pixels.width() == self.pixels.height()
    }
}

/// Six faces laid out side by side: `6R × R`.
#[derive(Debug, Clone, PartialEq)]
pub struct StripImage {
    pixels: Rgba32FImage,
}

impl StripImage {
    /// Wrap a buffer as a strip. Fails unless `width == 6 * height` and the buffer is not empty.
    pub fn from_image(pixels: Rgba32FImage) -> Result<Self, BakeError> {
        let (width, height) = pixels.dimensions();
        if height == 0 || width != height * FACE_COUNT as u32 {
            return Err(BakeError::DimensionMismatch(format!(
                "strip must be 6R x R, got {width}x{height}"
            )));
        }
        Ok(Self { pixels })
    }

    /// Face edge length R.
    pub fn resolution(&self) -> u32 {
        self.pixels.height()
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &Rgba32FImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> Rgba32FImage {
        self.pixels
    }

    /// Copy the block belonging to `face` back out of the strip.
    pub fn face(&self, face: CubeFace) -> FaceImage {
        let r = self.resolution();
        let x = face.slot() as u32 * r;
        let block = imageops::crop_imm(&self.pixels, x, 0, r, r).to_image();
        FaceImage::new(face, block)
    }

    /// All faces in slot order.
    pub fn split(&self) -> Vec<FaceImage> {
        FACE_SLOT_ORDER.iter().map(|&face| self.face(face)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_face_is_square() {
        let face = FaceImage::filled(CubeFace::PositiveY, 4, Rgba([1.0, 2.0, 3.0, 1.0]));
        assert!(face.is_square());
        assert_eq!(face.resolution(), 4);
        assert_eq!(face.face(), CubeFace::PositiveY);
        assert_eq!(*face.pixels().get_pixel(3, 3), Rgba([1.0, 2.0, 3.0, 1.0]));
    }

    #[test]
    fn test_strip_rejects_wrong_ratio() {
        let result = StripImage::from_image(Rgba32FImage::new(10, 2));
        assert!(matches!(result, Err(BakeError::DimensionMismatch(_))));
        let result = StripImage::from_image(Rgba32FImage::new(0, 0));
        assert!(matches!(result, Err(BakeError::DimensionMismatch(_))));
    }

    #[test]
    fn test_strip_face_extracts_slot_block() {
        let mut pixels = Rgba32FImage::new(12, 2);
        for (x, _, pixel) in pixels.enumerate_pixels_mut() {
            *pixel = Rgba([(x / 2) as f32, 0.0, 0.0, 1.0]);
        }
        let strip = StripImage::from_image(pixels).expect("valid strip");
        assert_eq!(strip.resolution(), 2);

        let down = strip.face(CubeFace::NegativeY);
        assert_eq!(down.resolution(), 2);
        for pixel in down.pixels().pixels() {
            assert_eq!(pixel.0[0], 3.0);
        }

        let faces = strip.split();
        assert_eq!(faces.len(), 6);
        for (slot, face) in faces.iter().enumerate() {
            assert_eq!(face.face().slot(), slot);
            assert_eq!(face.pixels().get_pixel(1, 1).0[0], slot as f32);
        }
    }
}

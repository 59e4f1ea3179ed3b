use cubefog_core::constants::{CAPTURE_FAR, CAPTURE_FOV_DEGREES, CAPTURE_NEAR};
use cubefog_core::{capture_poses, BakeError, CubeFace, FaceImage, Orientation};
use glam::{Mat4, Vec3};
use image::Rgba32FImage;

/// Everything a renderer needs to draw one cube face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceView {
    pub face: CubeFace,
    pub orientation: Orientation,
    pub fov_y_degrees: f32,
}

impl FaceView {
    /// Normalized world-space view ray through the center of pixel (x, y).
    /// Row 0 is the top of the image.
    pub fn ray_direction(&self, x: u32, y: u32, resolution: u32) -> Vec3 {
        let r = resolution as f32;
        let half_extent = (self.fov_y_degrees.to_radians() * 0.5).tan();
        let u = (2.0 * (x as f32 + 0.5) / r - 1.0) * half_extent;
        let v = (1.0 - 2.0 * (y as f32 + 0.5) / r) * half_extent;
        let o = self.orientation;
        (o.forward() + o.right() * u + o.up() * v).normalize()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(Vec3::ZERO, self.orientation.forward(), self.orientation.up())
    }

    /// Square-aspect projection with the capture camera's clip planes.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), 1.0, CAPTURE_NEAR, CAPTURE_FAR)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Produces the pixels of one face. Must return a `resolution × resolution` image.
pub trait FaceRenderer {
    fn render_face(&mut self, view: &FaceView, resolution: u32) -> Result<Rgba32FImage, BakeError>;
}

impl<F> FaceRenderer for F
where
    F: FnMut(&FaceView, u32) -> Result<Rgba32FImage, BakeError>,
{
    fn render_face(&mut self, view: &FaceView, resolution: u32) -> Result<Rgba32FImage, BakeError> {
        self(view, resolution)
    }
}

/// Drives a renderer through the six capture poses, strictly in sequence.
#[derive(Debug, Clone, Copy)]
pub struct CubeFaceCapturer {
    fov_y_degrees: f32,
}

impl Default for CubeFaceCapturer {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeFaceCapturer {
    pub fn new() -> Self {
        Self {
            fov_y_degrees: CAPTURE_FOV_DEGREES,
        }
    }

    /// Render all six faces in capture order (+X, -Z, -X, +Z, +Y, -Y).
    ///
    /// Any renderer error or wrongly sized image aborts the whole capture;
    /// nothing is returned for the faces already rendered.
    pub fn capture(
        &self,
        resolution: u32,
        renderer: &mut dyn FaceRenderer,
    ) -> Result<Vec<FaceImage>, BakeError> {
        if resolution == 0 {
            return Err(BakeError::InvalidResolution(resolution));
        }

        let mut faces = Vec::with_capacity(6);
        for (face, orientation) in capture_poses() {
            let view = FaceView {
                face,
                orientation,
                fov_y_degrees: self.fov_y_degrees,
            };
            log::debug!("Rendering face {face} (forward {:?})", orientation.forward());

            let pixels = renderer.render_face(&view, resolution)?;
            let (width, height) = pixels.dimensions();
            if width != resolution || height != resolution {
                return Err(BakeError::SizeMismatch {
                    face,
                    expected: resolution,
                    actual_width: width,
                    actual_height: height,
                });
            }
            faces.push(FaceImage::new(face, pixels));
        }

        Ok(faces)
    }
}

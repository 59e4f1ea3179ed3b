//! Procedural gradient sky used as the bake renderer.
//! Above the horizon the color blends horizon -> zenith with a squared
//! falloff, t = (dir.y * 0.5 + 0.5)^2. Below it fades into the ground color.
//! An optional sun adds an HDR disc.

use cubefog_bake::{FaceRenderer, FaceView};
use cubefog_core::BakeError;
use glam::Vec3;
use image::{Rgba, Rgba32FImage};

/// Default sky zenith color (deep blue, looking straight up).
pub const DEFAULT_SKY_ZENITH: [f32; 3] = [0.1, 0.15, 0.4];

/// Default sky horizon color (warm haze at the horizon).
pub const DEFAULT_SKY_HORIZON: [f32; 3] = [0.5, 0.45, 0.35];

/// Default ground color seen below the horizon.
pub const DEFAULT_SKY_GROUND: [f32; 3] = [0.12, 0.1, 0.08];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sun {
    pub direction: Vec3,
    /// Linear radiance, typically well above 1.
    pub color: Vec3,
    /// Cosine of the disc's angular radius.
    pub cos_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientSky {
    pub zenith: Vec3,
    pub horizon: Vec3,
    pub ground: Vec3,
    pub sun: Option<Sun>,
}

impl Default for GradientSky {
    fn default() -> Self {
        Self {
            zenith: Vec3::from(DEFAULT_SKY_ZENITH),
            horizon: Vec3::from(DEFAULT_SKY_HORIZON),
            ground: Vec3::from(DEFAULT_SKY_GROUND),
            sun: None,
        }
    }
}

impl GradientSky {
    /// Radiance seen along a normalized direction.
    pub fn radiance(&self, dir: Vec3) -> Vec3 {
        let sky = if dir.y >= 0.0 {
            let t = (dir.y * 0.5 + 0.5).powi(2);
            // t is 0.25 at the horizon, remap so the horizon color is exact there
            self.horizon.lerp(self.zenith, (t - 0.25) / 0.75)
        } else {
            self.horizon.lerp(self.ground, (-dir.y).sqrt())
        };

        match self.sun {
            Some(sun) if dir.dot(sun.direction.normalize()) >= sun.cos_radius => sky + sun.color,
            _ => sky,
        }
    }
}

impl FaceRenderer for GradientSky {
    fn render_face(&mut self, view: &FaceView, resolution: u32) -> Result<Rgba32FImage, BakeError> {
        Ok(Rgba32FImage::from_fn(resolution, resolution, |x, y| {
            let c = self.radiance(view.ray_direction(x, y, resolution));
            Rgba([c.x, c.y, c.z, 1.0])
        }))
    }
}

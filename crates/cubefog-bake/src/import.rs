//! Settings the importer applies when it turns a strip into a cube texture.

use cubefog_core::{CubeFace, FACE_SLOT_ORDER};
use serde::{Deserialize, Serialize};

use crate::config::BakeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureShape {
    Flat,
    Cube,
}

/// How faces are arranged in the imported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StripLayout {
    /// One row of faces, left to right in the given slot order.
    Horizontal([CubeFace; 6]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    Point,
    Bilinear,
    Trilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    Repeat,
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CubemapConvolution {
    None,
    Specular,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    pub shape: TextureShape,
    pub layout: StripLayout,
    /// Filter across face edges when sampling.
    pub seamless: bool,
    pub generate_mipmaps: bool,
    pub filter: FilterMode,
    pub wrap: WrapMode,
    pub aniso_level: u32,
    pub convolution: CubemapConvolution,
}

impl ImportSettings {
    pub fn from_config(config: &BakeConfig) -> Self {
        Self {
            shape: TextureShape::Cube,
            layout: StripLayout::Horizontal(FACE_SLOT_ORDER),
            seamless: true,
            generate_mipmaps: true,
            filter: FilterMode::Trilinear,
            wrap: WrapMode::Clamp,
            aniso_level: 0,
            convolution: if config.specular_convolution {
                CubemapConvolution::Specular
            } else {
                CubemapConvolution::None
            },
        }
    }
}

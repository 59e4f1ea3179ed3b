//! Parameters of the cubemap fog post-process.
//! Distance fog and optional height fog are tinted by sampling the baked sky
//! cube map, with the mip level picked from a constant or from view distance.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FogError {
    #[error("Failed to parse fog settings RON: {0}")]
    ParseError(String),
}

bitflags! {
    /// Shader variants toggled by the settings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FogKeywords: u32 {
        const OCCLUDE_SKY = 1 << 0;
        const USE_CONSTANT_MIP = 1 << 1;
        const DO_HEIGHT_FOG = 1 << 2;
    }
}

impl FogKeywords {
    /// Shader keyword names of the enabled variants.
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

/// Which texture the fog samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CubemapBinding {
    /// No cube map assigned: fog samples black.
    Black,
    /// Strip artifact to import as the fog cube map.
    Strip(String),
}

impl CubemapBinding {
    pub fn resolve(settings: &FogSettings) -> Self {
        match &settings.cubemap {
            Some(path) if !path.is_empty() => CubemapBinding::Strip(path.clone()),
            _ => CubemapBinding::Black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogSettings {
    // Cubemap
    pub cubemap: Option<String>,
    pub cubemap_exposure: f32,

    // Mip selection
    pub use_constant_mip: bool,
    pub mip_level: f32,
    pub mip_distance: f32,
    pub mip_multiplier: f32,

    // Main fog
    /// Blend factor of the fog over the frame, 0..=1.
    pub intensity: f32,
    pub occlude_sky: bool,
    pub start_distance: f32,
    pub density: f32,

    // Height fog
    pub height_enabled: bool,
    pub height_start_distance: f32,
    pub height_density: f32,
    pub height: f32,
    pub height_falloff: f32,

    // Debug views
    pub view_fog: bool,
    pub view_mip_distance: bool,
    pub view_cubemap: bool,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            cubemap: None,
            cubemap_exposure: 1.0,
            use_constant_mip: false,
            mip_level: 0.0,
            mip_distance: 0.0,
            mip_multiplier: 1.0,
            intensity: 1.0,
            occlude_sky: false,
            start_distance: 0.0,
            density: 1.0,
            height_enabled: false,
            height_start_distance: 0.0,
            height_density: 1.0,
            height: 0.0,
            height_falloff: 1.0,
            view_fog: false,
            view_mip_distance: false,
            view_cubemap: false,
        }
    }
}

impl FogSettings {
    /// Copy with `intensity` clamped to 0..=1.
    pub fn sanitized(&self) -> Self {
        let intensity = self.intensity.clamp(0.0, 1.0);
        if intensity != self.intensity {
            log::warn!("Fog intensity {} out of range, clamped to {intensity}", self.intensity);
        }
        Self {
            intensity,
            ..self.clone()
        }
    }

    pub fn keywords(&self) -> FogKeywords {
        let mut keywords = FogKeywords::empty();
        keywords.set(FogKeywords::OCCLUDE_SKY, self.occlude_sky);
        keywords.set(FogKeywords::USE_CONSTANT_MIP, self.use_constant_mip);
        keywords.set(FogKeywords::DO_HEIGHT_FOG, self.height_enabled);
        keywords
    }

    /// Debug view toggles as the shader reads them: (fog, unused, mip distance, cubemap).
    pub fn debug_modes(&self) -> [f32; 4] {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        [
            flag(self.view_fog),
            0.0,
            flag(self.view_mip_distance),
            flag(self.view_cubemap),
        ]
    }
}

/// Parse fog settings from a RON string. Missing fields keep their defaults.
pub fn load_fog_settings_from_str(ron_str: &str) -> Result<FogSettings, FogError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| FogError::ParseError(e.to_string()))
}

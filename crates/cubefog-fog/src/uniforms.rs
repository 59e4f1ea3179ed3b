use crate::camera::FogCamera;
use crate::settings::FogSettings;

/// Fog pass uniform block (192 bytes, matches the fog shader's FogParams).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FogUniforms {
    pub clip_to_view: [[f32; 4]; 4],
    pub view_proj_inverse: [[f32; 4]; 4],
    pub debug_modes: [f32; 4],
    pub cubemap_exposure: f32,
    pub intensity: f32,
    pub start_distance: f32,
    pub density: f32,
    pub mip_min_level: f32,
    pub mip_distance: f32,
    pub mip_multiplier: f32,
    /// [`crate::FogKeywords`] bits.
    pub keywords: u32,
    pub height_start_distance: f32,
    pub height_density: f32,
    pub height: f32,
    pub height_falloff: f32,
}

impl FogUniforms {
    pub fn new(settings: &FogSettings, camera: &FogCamera) -> Self {
        let s = settings.sanitized();
        Self {
            clip_to_view: camera.clip_to_view().to_cols_array_2d(),
            view_proj_inverse: camera.view_proj_inverse().to_cols_array_2d(),
            debug_modes: s.debug_modes(),
            cubemap_exposure: s.cubemap_exposure,
            intensity: s.intensity,
            start_distance: s.start_distance,
            density: s.density,
            mip_min_level: s.mip_level,
            mip_distance: s.mip_distance,
            mip_multiplier: s.mip_multiplier,
            keywords: s.keywords().bits(),
            height_start_distance: s.height_start_distance,
            height_density: s.height_density,
            height: s.height,
            height_falloff: s.height_falloff,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

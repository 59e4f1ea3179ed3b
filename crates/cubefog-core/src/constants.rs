//! Shared constants for the sky bake and the fog pass.

/// Number of faces in a cube map.
pub const FACE_COUNT: usize = 6;

/// Default base name for baked artifacts.
pub const DEFAULT_BAKE_NAME: &str = "CubemapFog";

/// Default face edge length in pixels.
pub const DEFAULT_RESOLUTION: u32 = 128;

/// Vertical field of view of the capture camera. 90° makes each view cover exactly one face.
pub const CAPTURE_FOV_DEGREES: f32 = 90.0;

/// Near clip plane of the capture camera.
pub const CAPTURE_NEAR: f32 = 0.03;

/// Far clip plane of the capture camera. Only the sky is captured, so this stays tiny.
pub const CAPTURE_FAR: f32 = 1.0;

/// File extension of every baked image artifact.
pub const ARTIFACT_EXTENSION: &str = "exr";

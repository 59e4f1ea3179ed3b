pub mod camera;
pub mod settings;
pub mod uniforms;

pub use camera::FogCamera;
pub use settings::{load_fog_settings_from_str, CubemapBinding, FogError, FogKeywords, FogSettings};
pub use uniforms::FogUniforms;

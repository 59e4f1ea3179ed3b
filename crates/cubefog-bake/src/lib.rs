pub mod baker;
pub mod capture;
pub mod config;
pub mod import;
pub mod naming;
pub mod stitch;

pub use baker::{BakeSummary, CubemapImporter, SkyBaker};
pub use capture::{CubeFaceCapturer, FaceRenderer, FaceView};
pub use config::{load_bake_config_from_str, BakeConfig, ConfigError};
pub use import::{CubemapConvolution, FilterMode, ImportSettings, StripLayout, TextureShape, WrapMode};
pub use stitch::CubeStitcher;

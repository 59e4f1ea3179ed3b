use cubefog_core::constants::{DEFAULT_BAKE_NAME, DEFAULT_RESOLUTION};
use cubefog_core::BakeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse bake config RON: {0}")]
    ParseError(String),
}

/// User-facing settings of one sky bake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Base name of every artifact the bake produces.
    pub name: String,
    /// Face edge length in pixels.
    pub resolution: u32,
    /// Ask the importer to pre-convolve the cube map for specular lookups.
    pub specular_convolution: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_BAKE_NAME.to_string(),
            resolution: DEFAULT_RESOLUTION,
            specular_convolution: true,
        }
    }
}

impl BakeConfig {
    /// Reject settings that cannot produce a usable artifact.
    pub fn validate(&self) -> Result<(), BakeError> {
        if self.resolution == 0 {
            return Err(BakeError::InvalidResolution(self.resolution));
        }
        if self.name.trim().is_empty() {
            return Err(BakeError::InvalidConfig("name must not be empty".into()));
        }
        if self.name.contains(&['/', '\\'][..]) {
            return Err(BakeError::InvalidConfig(format!(
                "name '{}' must not contain path separators",
                self.name
            )));
        }
        Ok(())
    }
}

/// Parse a bake config from a RON string. Missing fields keep their defaults.
pub fn load_bake_config_from_str(ron_str: &str) -> Result<BakeConfig, ConfigError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

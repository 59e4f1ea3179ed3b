use std::path::PathBuf;

use cubefog_bake::{load_bake_config_from_str, BakeConfig};
use glam::Vec3;

pub const USAGE: &str = "\
Usage: bake-sky [OPTIONS]
  --config <path>              Load bake settings from a RON file
  --name <name>                Artifact base name (default: CubemapFog)
  --resolution <n>             Face edge length in pixels (default: 128)
  --no-specular-convolution    Import without specular pre-convolution
  --out <dir>                  Output directory (default: .)
  --report <path>              Write a JSON bake report
  --zenith <r,g,b>             Sky color straight up
  --horizon <r,g,b>            Sky color at the horizon
  --ground <r,g,b>             Color below the horizon
  --sun <x,y,z>                Add an HDR sun disc in this direction
  --fog-settings <path>        Fog settings RON to bind to the baked cubemap";

/// Parsed command line. `None` fields fall back to the config file or defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub name: Option<String>,
    pub resolution: Option<u32>,
    pub no_specular_convolution: bool,
    pub out_dir: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub zenith: Option<Vec3>,
    pub horizon: Option<Vec3>,
    pub ground: Option<Vec3>,
    pub sun: Option<Vec3>,
    pub fog_settings_path: Option<PathBuf>,
}

impl CliArgs {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply_overrides(&self, mut config: BakeConfig) -> BakeConfig {
        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if self.no_specular_convolution {
            config.specular_convolution = false;
        }
        config
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Bake(CliArgs),
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {arg}"))
        };
        match arg.as_str() {
            "--config" => parsed.config_path = Some(PathBuf::from(value()?)),
            "--name" => parsed.name = Some(value()?),
            "--resolution" => {
                let raw = value()?;
                parsed.resolution = Some(
                    raw.parse()
                        .map_err(|_| format!("invalid --resolution value '{raw}'"))?,
                );
            }
            "--no-specular-convolution" => parsed.no_specular_convolution = true,
            "--out" => parsed.out_dir = Some(PathBuf::from(value()?)),
            "--report" => parsed.report_path = Some(PathBuf::from(value()?)),
            "--zenith" => parsed.zenith = Some(parse_vec3(&value()?)?),
            "--horizon" => parsed.horizon = Some(parse_vec3(&value()?)?),
            "--ground" => parsed.ground = Some(parse_vec3(&value()?)?),
            "--sun" => parsed.sun = Some(parse_direction(&value()?)?),
            "--fog-settings" => parsed.fog_settings_path = Some(PathBuf::from(value()?)),
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(Command::Bake(parsed))
}

/// Parse `"x,y,z"` into a vector.
pub fn parse_vec3(raw: &str) -> Result<Vec3, String> {
    let parts: Vec<f32> = raw
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|_| format!("invalid vector '{raw}' (expected x,y,z)"))?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("invalid vector '{raw}' (expected 3 components)")),
    }
}

/// Parse `"x,y,z"` into a unit direction. Zero-length vectors are rejected.
pub fn parse_direction(raw: &str) -> Result<Vec3, String> {
    parse_vec3(raw)?
        .try_normalize()
        .ok_or_else(|| format!("invalid direction '{raw}' (must be non-zero and finite)"))
}

/// Config file first, then command line overrides.
pub fn resolve_config(cli: &CliArgs) -> Result<BakeConfig, String> {
    let config = match &cli.config_path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            load_bake_config_from_str(&contents).map_err(|e| e.to_string())?
        }
        None => BakeConfig::default(),
    };
    Ok(cli.apply_overrides(config))
}

use std::path::PathBuf;
use std::process;

use cubefog_bake::SkyBaker;
use cubefog_cli::args::{parse_args, resolve_config, CliArgs, Command, USAGE};
use cubefog_cli::report::{self, BakeReport};
use cubefog_cli::sky::{GradientSky, Sun};
use cubefog_fog::{load_fog_settings_from_str, FogUniforms};
use cubefog_persist::DirectoryStore;
use glam::Vec3;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(Command::Help) => {
            eprintln!("{USAGE}");
            process::exit(0);
        }
        Ok(Command::Bake(cli)) => cli,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(cli: CliArgs) -> Result<(), String> {
    let config = resolve_config(&cli)?;
    let out_dir = cli.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    let mut sky = GradientSky::default();
    if let Some(c) = cli.zenith {
        sky.zenith = c;
    }
    if let Some(c) = cli.horizon {
        sky.horizon = c;
    }
    if let Some(c) = cli.ground {
        sky.ground = c;
    }
    if let Some(direction) = cli.sun {
        sky.sun = Some(Sun {
            direction,
            color: Vec3::splat(20.0),
            cos_radius: 0.9995,
        });
    }

    let mut store = DirectoryStore::new(&out_dir);
    let summary = SkyBaker::new(config.clone())
        .with_renderer(&mut sky)
        .with_importer(&mut store)
        .bake()
        .map_err(|e| e.to_string())?;

    let loaded = store.load_cubemap(&config.name).map_err(|e| e.to_string())?;
    let fog = match &cli.fog_settings_path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            let settings = load_fog_settings_from_str(&contents).map_err(|e| e.to_string())?;
            let strip_path = store.artifact_path(&summary.strip_artifact);
            let (settings, binding) = report::bind_fog(settings, &strip_path);
            log::info!(
                "Fog bound to {:?} with keywords {:?} ({} byte uniform block)",
                settings.cubemap,
                binding.keywords,
                std::mem::size_of::<FogUniforms>()
            );
            Some(binding)
        }
        None => None,
    };

    let report = BakeReport {
        summary,
        output_dir: out_dir.display().to_string(),
        faces: report::face_stats(&loaded.strip),
        fog,
    };

    println!("\n## Sky Bake '{}'\n", config.name);
    println!("{}", report::format_markdown(&report));

    if let Some(ref path) = cli.report_path {
        report::save_report(path, &report).map_err(|e| format!("failed to save report: {e}"))?;
        log::info!("Saved report to {}", path.display());
    }

    log::info!("Bake complete.");
    Ok(())
}

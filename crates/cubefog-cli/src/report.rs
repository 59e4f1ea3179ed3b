use std::path::Path;

use cubefog_bake::BakeSummary;
use cubefog_core::{StripImage, FACE_SLOT_ORDER};
use cubefog_fog::{CubemapBinding, FogSettings};

/// Mean color of one face of the baked strip.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FaceStats {
    pub face: String,
    pub slot: usize,
    pub mean_rgb: [f32; 3],
    pub max_luminance: f32,
}

/// Everything written to `--report`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BakeReport {
    pub summary: BakeSummary,
    pub output_dir: String,
    pub faces: Vec<FaceStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog: Option<FogBinding>,
}

/// How a fog settings file ends up bound to the bake.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FogBinding {
    pub cubemap: Option<String>,
    pub keywords: Vec<String>,
    pub debug_modes: [f32; 4],
}

/// Point fog settings without a cube map at the freshly baked strip.
pub fn bind_fog(mut settings: FogSettings, strip_path: &Path) -> (FogSettings, FogBinding) {
    if CubemapBinding::resolve(&settings) == CubemapBinding::Black {
        settings.cubemap = Some(strip_path.display().to_string());
    }
    let binding = FogBinding {
        cubemap: match CubemapBinding::resolve(&settings) {
            CubemapBinding::Strip(path) => Some(path),
            CubemapBinding::Black => None,
        },
        keywords: settings
            .keywords()
            .names()
            .into_iter()
            .map(String::from)
            .collect(),
        debug_modes: settings.debug_modes(),
    };
    (settings, binding)
}

fn luminance(rgb: [f32; 3]) -> f32 {
    0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2]
}

/// Per-face statistics of a strip, in slot order.
pub fn face_stats(strip: &StripImage) -> Vec<FaceStats> {
    FACE_SLOT_ORDER
        .iter()
        .map(|&face| {
            let image = strip.face(face);
            let mut sum = [0.0f64; 3];
            let mut max_luminance = 0.0f32;
            for pixel in image.pixels().pixels() {
                let rgb = [pixel.0[0], pixel.0[1], pixel.0[2]];
                for (acc, c) in sum.iter_mut().zip(rgb) {
                    *acc += c as f64;
                }
                max_luminance = max_luminance.max(luminance(rgb));
            }
            let count = (image.resolution() as f64).powi(2).max(1.0);
            FaceStats {
                face: face.tag().to_string(),
                slot: face.slot(),
                mean_rgb: sum.map(|s| (s / count) as f32),
                max_luminance,
            }
        })
        .collect()
}

/// Save a report as pretty JSON.
pub fn save_report(path: &Path, report: &BakeReport) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Format the per-face statistics as a markdown table.
pub fn format_markdown(report: &BakeReport) -> String {
    let mut out = String::new();
    out.push_str("| Slot | Face | Mean R | Mean G | Mean B | Max Luminance |\n");
    out.push_str("|------|------|--------|--------|--------|---------------|\n");
    for f in &report.faces {
        out.push_str(&format!(
            "| {} | {} | {:.3} | {:.3} | {:.3} | {:.3} |\n",
            f.slot, f.face, f.mean_rgb[0], f.mean_rgb[1], f.mean_rgb[2], f.max_luminance,
        ));
    }
    out
}

/// Dataset manifest: per-canvas object labels for the generated samples.
use crate::compositor::{CanvasSize, Placement};
use crate::error::Result;
use crate::object_renderer::ObjectImage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Description of one rendered object, shared by every canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
    pub source: String,
    pub material: String,
    pub width: u32,
    pub height: u32,
}

impl From<&ObjectImage> for ObjectEntry {
    fn from(object: &ObjectImage) -> Self {
        Self {
            name: object.name.clone(),
            source: object.source.display().to_string(),
            material: object.material.clone(),
            width: object.width(),
            height: object.height(),
        }
    }
}

/// Labels for one generated canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasEntry {
    pub file: String,
    pub placements: Vec<Placement>,
    /// Indices of objects too large for the canvas.
    pub skipped: Vec<usize>,
}

/// Run parameters and labels for a generated dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub seed: u64,
    pub canvas: CanvasSize,
    pub voxel_resolution: usize,
    pub blend_alpha: f32,
    pub objects: Vec<ObjectEntry>,
    pub canvases: Vec<CanvasEntry>,
}

impl DatasetManifest {
    /// Write `manifest.json` into the output directory.
    pub fn write(&self, output_dir: &Path) -> Result<()> {
        let manifest_path = output_dir.join("manifest.json");
        let manifest_json = serde_json::to_string_pretty(self)?;
        fs::write(&manifest_path, manifest_json)?;

        log::info!("Generated dataset manifest: {}", manifest_path.display());
        self.log_summary();
        Ok(())
    }

    pub fn total_skips(&self) -> usize {
        self.canvases.iter().map(|c| c.skipped.len()).sum()
    }

    fn log_summary(&self) {
        log::info!("Manifest Summary:");
        log::info!("  Objects: {}", self.objects.len());
        log::info!(
            "  Canvases: {} ({}x{})",
            self.canvases.len(),
            self.canvas.width,
            self.canvas.height
        );
        let placed: usize = self.canvases.iter().map(|c| c.placements.len()).sum();
        log::info!("  Placements: {} ({} skipped)", placed, self.total_skips());
    }
}

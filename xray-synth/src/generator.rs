/// Two-phase dataset generation: render every mesh once, then compose canvases.
use crate::compositor::{CanvasCompositor, CanvasSize};
use crate::config::SynthConfig;
use crate::discovery::{MeshCandidate, discover_mesh_files};
use crate::error::{Result, SynthError};
use crate::image_writer::{sample_path, write_rgb_png};
use crate::manifest::{CanvasEntry, DatasetManifest, ObjectEntry};
use crate::object_renderer::{ObjectImage, ObjectRenderer};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Random stream families, one per generation phase.
const RENDER_PHASE: u64 = 0;
const CANVAS_PHASE: u64 = 1;

/// Run parameters for one dataset generation.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Directory containing `*.stl` mesh files.
    pub input_dir: PathBuf,
    /// Directory receiving `sample_<i>.png` files and `manifest.json`.
    pub output_dir: PathBuf,
    /// Number of canvases to generate.
    pub count: usize,
    pub canvas: CanvasSize,
    /// Voxels along each mesh's longest axis.
    pub voxel_resolution: usize,
    /// Worker threads in each phase's pool.
    pub workers: usize,
    /// Run-level seed every task seed is derived from.
    pub seed: u64,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub seed: u64,
    pub objects: usize,
    pub canvases: usize,
    /// Object placements skipped because the object exceeded the canvas.
    pub skipped_placements: usize,
}

/// Drives mesh rendering and canvas composition over fixed-size worker pools.
pub struct DatasetGenerator {
    settings: GeneratorSettings,
    config: SynthConfig,
}

impl DatasetGenerator {
    pub fn new(settings: GeneratorSettings, config: SynthConfig) -> Result<Self> {
        config.validate()?;
        if settings.workers == 0 || settings.voxel_resolution == 0 {
            return Err(SynthError::Input(
                "Worker count and voxel resolution must be at least 1".to_string(),
            ));
        }
        if settings.canvas.width == 0 || settings.canvas.height == 0 {
            return Err(SynthError::Input(format!(
                "Canvas size must be positive, got {}x{}",
                settings.canvas.width, settings.canvas.height
            )));
        }

        Ok(Self { settings, config })
    }

    /// Executes the complete pipeline and writes `count` canvases plus a manifest.
    pub fn generate(&self) -> Result<GenerationReport> {
        let candidates = discover_mesh_files(&self.settings.input_dir)?;
        if candidates.is_empty() {
            return Err(SynthError::Input(format!(
                "No .STL files found in {}",
                self.settings.input_dir.display()
            )));
        }
        log::info!(
            "Found {} mesh files, run seed {}",
            candidates.len(),
            self.settings.seed
        );

        fs::create_dir_all(&self.settings.output_dir)?;

        log::info!("Converting .stl files...");
        let objects = self.render_objects(&candidates)?;

        log::info!("Generating false-color images...");
        let canvases = self.compose_canvases(&objects)?;

        let manifest = DatasetManifest {
            seed: self.settings.seed,
            canvas: self.settings.canvas,
            voxel_resolution: self.settings.voxel_resolution,
            blend_alpha: self.config.blend_alpha,
            objects: objects.iter().map(ObjectEntry::from).collect(),
            canvases,
        };
        manifest.write(&self.settings.output_dir)?;

        Ok(GenerationReport {
            seed: self.settings.seed,
            objects: objects.len(),
            canvases: manifest.canvases.len(),
            skipped_placements: manifest.total_skips(),
        })
    }

    /// Phase 1: render each mesh exactly once. Returns only after every task
    /// has finished, in discovery order.
    fn render_objects(&self, candidates: &[MeshCandidate]) -> Result<Vec<ObjectImage>> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.settings.workers)
            .build()?;
        let renderer = ObjectRenderer::new(&self.config, self.settings.voxel_resolution);
        let pb = progress_bar(candidates.len(), "meshes", "Rendering objects")?;

        let objects = pool.install(|| {
            candidates
                .par_iter()
                .enumerate()
                .map(|(index, candidate)| -> Result<ObjectImage> {
                    let mut rng = task_rng(self.settings.seed, RENDER_PHASE, index);
                    let object = renderer
                        .render(candidate, &mut rng)
                        .map_err(|e| e.in_task(candidate.path.display().to_string()))?;
                    pb.inc(1);
                    Ok(object)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        pb.finish_with_message("Objects rendered");
        Ok(objects)
    }

    /// Phase 2: compose and write one canvas per index from the shared object set.
    fn compose_canvases(&self, objects: &[ObjectImage]) -> Result<Vec<CanvasEntry>> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.settings.workers)
            .build()?;
        let compositor = CanvasCompositor::new(&self.config, self.settings.canvas);
        let pb = progress_bar(self.settings.count, "canvases", "Composing canvases")?;

        let entries = pool.install(|| {
            (0..self.settings.count)
                .into_par_iter()
                .map(|index| -> Result<CanvasEntry> {
                    let mut rng = task_rng(self.settings.seed, CANVAS_PHASE, index);
                    let canvas = compositor.compose(objects, &mut rng);

                    let path = sample_path(&self.settings.output_dir, index);
                    write_rgb_png(&path, &canvas.image)
                        .map_err(|e| SynthError::from(e).in_task(format!("canvas {}", index)))?;
                    pb.inc(1);

                    Ok(CanvasEntry {
                        file: path
                            .file_name()
                            .unwrap_or_default()
                            .to_string_lossy()
                            .to_string(),
                        placements: canvas.placements,
                        skipped: canvas.skipped,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })?;

        pb.finish_with_message("Canvases written");
        Ok(entries)
    }
}

/// Independent random source for task `index` of `phase`: the run seed with a
/// dedicated ChaCha stream per (phase, index).
pub fn task_rng(seed: u64, phase: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream((phase << 32) | index as u64);
    rng
}

fn progress_bar(len: usize, unit: &str, message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "[{{bar:40.green/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
                unit
            ))?
            .progress_chars("▉▊▋▌▍▎▏ "),
    );
    pb.set_message(message);
    Ok(pb)
}

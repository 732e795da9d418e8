/// Per-mesh rendering: random pose, voxelisation, projection and colouring.
use crate::colorize::DensityColorizer;
use crate::config::SynthConfig;
use crate::discovery::{MeshCandidate, resolve_material};
use crate::error::{Result, SynthError};
use crate::mesh::{Mesh, read_mesh};
use crate::voxelizer::voxelize;
use constants::ROTATION_ANGLE_RANGE;
use image::Rgb32FImage;
use nalgebra::Vector3;
use rand::Rng;
use std::path::PathBuf;

/// False-colour silhouette of one object, shared read-only by every canvas.
#[derive(Debug, Clone)]
pub struct ObjectImage {
    /// Object name derived from the mesh filename.
    pub name: String,
    /// Mesh file the image was rendered from.
    pub source: PathBuf,
    pub material: String,
    /// RGB in [0, 1].
    pub pixels: Rgb32FImage,
}

impl ObjectImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Renders mesh files into object images at a fixed voxel resolution.
pub struct ObjectRenderer<'a> {
    config: &'a SynthConfig,
    voxel_resolution: usize,
}

impl<'a> ObjectRenderer<'a> {
    pub fn new(config: &'a SynthConfig, voxel_resolution: usize) -> Self {
        Self {
            config,
            voxel_resolution,
        }
    }

    /// Load, randomly rotate, voxelise and colourise one mesh.
    pub fn render<R: Rng>(&self, candidate: &MeshCandidate, rng: &mut R) -> Result<ObjectImage> {
        let material = resolve_material(&candidate.path, self.config).ok_or_else(|| {
            self.config.configuration_error(format!(
                "No material could be resolved for {}",
                candidate.path.display()
            ))
        })?;

        let mut mesh = read_mesh(&candidate.path)?;
        let (axis, angle) = apply_random_pose(&mut mesh, rng);
        log::debug!(
            "Rotated {} by {:.1} degrees about {:?}",
            candidate.name,
            angle,
            axis
        );

        let (grid, _) = voxelize(&mesh, self.voxel_resolution).map_err(|e| match e {
            SynthError::Mesh { reason, .. } => SynthError::mesh(&candidate.path, reason),
            other => other,
        })?;
        let density = grid.project_z();

        let pixels = DensityColorizer::new(self.config).colorize(&density, &material)?;
        log::debug!(
            "Rendered {} ({}) as {}x{} object image",
            candidate.name,
            material,
            pixels.width(),
            pixels.height()
        );

        Ok(ObjectImage {
            name: candidate.name.clone(),
            source: candidate.path.clone(),
            material,
            pixels,
        })
    }
}

/// Rotate the mesh about a random axis by a random angle.
///
/// The axis components are independent draws from [0, 1) and are not
/// normalised here, which keeps axes in the positive octant. The angle is
/// uniform over [`ROTATION_ANGLE_RANGE`] degrees.
pub fn apply_random_pose<R: Rng>(mesh: &mut Mesh, rng: &mut R) -> (Vector3<f32>, f32) {
    let axis = Vector3::new(
        rng.gen_range(0.0..1.0),
        rng.gen_range(0.0..1.0),
        rng.gen_range(0.0..1.0),
    );
    let (min_angle, max_angle) = ROTATION_ANGLE_RANGE;
    let angle = rng.gen_range(min_angle..max_angle) as f32;

    mesh.rotate(axis, angle);
    (axis, angle)
}

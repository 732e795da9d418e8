/// Mesh to occupancy grid conversion by z-ray parity, plus axis projection.
use crate::error::{Result, SynthError};
use crate::mesh::Mesh;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Hits closer than this along a column (in voxel units) are one surface crossing.
const HIT_MERGE_EPSILON: f32 = 1e-4;

/// Slack on barycentric coordinates so rays through shared edges are not lost.
const BARYCENTRIC_TOLERANCE: f32 = 1e-6;

/// Occupancy grid with z varying fastest: index = (y * nx + x) * nz + z.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    pub dims: [usize; 3],
    pub data: Vec<f32>,
}

/// Placement of the grid in mesh space.
#[derive(Debug, Clone)]
pub struct VoxelMetadata {
    /// Voxels per mesh unit.
    pub scale: f32,
    /// Mesh-space position of the grid's minimum corner.
    pub origin: Vector3<f32>,
}

/// 2D density obtained by summing a voxel grid along one axis, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityField {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f64>,
}

impl DensityField {
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            values,
        }
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl VoxelGrid {
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        let [nx, _, nz] = self.dims;
        self.data[(y * nx + x) * nz + z]
    }

    /// Sum along z. Rows of the field follow y, columns follow x.
    pub fn project_z(&self) -> DensityField {
        let [nx, ny, nz] = self.dims;
        let values = self
            .data
            .chunks_exact(nz)
            .map(|column| column.iter().map(|&v| v as f64).sum())
            .collect();
        DensityField::new(nx, ny, values)
    }

    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0.0).count()
    }
}

/// Triangle in grid space with its xy bounding box for column culling.
struct GridTriangle {
    vertices: [Vector3<f32>; 3],
    min_xy: (f32, f32),
    max_xy: (f32, f32),
}

impl GridTriangle {
    fn new(vertices: [Vector3<f32>; 3]) -> Self {
        let xs = vertices.map(|v| v.x);
        let ys = vertices.map(|v| v.y);
        Self {
            vertices,
            min_xy: (xs[0].min(xs[1]).min(xs[2]), ys[0].min(ys[1]).min(ys[2])),
            max_xy: (xs[0].max(xs[1]).max(xs[2]), ys[0].max(ys[1]).max(ys[2])),
        }
    }

    /// Height at which a vertical ray through (x, y) crosses the triangle.
    fn intersect_z(&self, x: f32, y: f32) -> Option<f32> {
        if x < self.min_xy.0 || x > self.max_xy.0 || y < self.min_xy.1 || y > self.max_xy.1 {
            return None;
        }

        let [a, b, c] = self.vertices;
        let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
        if det.abs() < f32::EPSILON {
            // Edge-on to the ray.
            return None;
        }

        let l1 = ((b.y - c.y) * (x - c.x) + (c.x - b.x) * (y - c.y)) / det;
        let l2 = ((c.y - a.y) * (x - c.x) + (a.x - c.x) * (y - c.y)) / det;
        let l3 = 1.0 - l1 - l2;
        if l1 < -BARYCENTRIC_TOLERANCE || l2 < -BARYCENTRIC_TOLERANCE || l3 < -BARYCENTRIC_TOLERANCE {
            return None;
        }

        Some(l1 * a.z + l2 * b.z + l3 * c.z)
    }
}

/// Voxelise a closed mesh so that its longest axis spans `resolution` voxels.
pub fn voxelize(mesh: &Mesh, resolution: usize) -> Result<(VoxelGrid, VoxelMetadata)> {
    if mesh.is_empty() {
        return Err(SynthError::mesh("<in-memory>", "cannot voxelise an empty mesh"));
    }
    if resolution == 0 {
        return Err(SynthError::Input(
            "Voxel resolution must be at least 1".to_string(),
        ));
    }

    let bounds = mesh.bounds();
    let longest = bounds.longest_extent();
    if !bounds.is_valid() || !longest.is_finite() || longest <= 0.0 {
        return Err(SynthError::mesh(
            "<in-memory>",
            format!("degenerate mesh extent {:?}", bounds.dimensions()),
        ));
    }

    let scale = resolution as f32 / longest;
    let extent = bounds.dimensions() * scale;
    let axis_len = |e: f32| (e.ceil() as usize).clamp(1, resolution);
    let dims = [axis_len(extent.x), axis_len(extent.y), axis_len(extent.z)];
    let origin = bounds.min();

    let triangles: Vec<GridTriangle> = mesh
        .triangles
        .iter()
        .map(|t| GridTriangle::new(t.map(|v| (v - origin) * scale)))
        .collect();

    let [nx, ny, nz] = dims;
    let mut data = vec![0.0f32; nx * ny * nz];

    // Each y-row of columns is filled independently.
    data.par_chunks_mut(nx * nz)
        .enumerate()
        .for_each(|(y, row)| {
            let mut hits = Vec::new();
            for (x, column) in row.chunks_exact_mut(nz).enumerate() {
                column_hits(&triangles, x as f32 + 0.5, y as f32 + 0.5, &mut hits);
                fill_column(column, &hits);
            }
        });

    let grid = VoxelGrid { dims, data };
    log::debug!(
        "Voxelised {} triangles into {:?} grid ({} occupied)",
        mesh.triangles.len(),
        dims,
        grid.occupied_count()
    );

    Ok((grid, VoxelMetadata { scale, origin }))
}

/// Sorted, de-duplicated surface crossings along the column at (x, y).
fn column_hits(triangles: &[GridTriangle], x: f32, y: f32, hits: &mut Vec<f32>) {
    hits.clear();
    hits.extend(triangles.iter().filter_map(|t| t.intersect_z(x, y)));
    hits.sort_by(f32::total_cmp);
    // Rays through a shared edge report the same crossing once per triangle.
    hits.dedup_by(|a, b| (*a - *b).abs() < HIT_MERGE_EPSILON);
}

/// Mark voxels whose centres fall between entry/exit pairs.
fn fill_column(column: &mut [f32], hits: &[f32]) {
    let nz = column.len() as f32;
    for pair in hits.chunks_exact(2) {
        let start = (pair[0] - 0.5).ceil().clamp(0.0, nz) as usize;
        let end = (pair[1] - 0.5).ceil().clamp(0.0, nz) as usize;
        for voxel in &mut column[start..end.max(start)] {
            *voxel = 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Axis-aligned box from (0,0,0) to `size`, two triangles per face.
    fn box_mesh(size: Vector3<f32>) -> Mesh {
        let v = |x: f32, y: f32, z: f32| Vector3::new(x * size.x, y * size.y, z * size.z);
        let quads = [
            [v(0., 0., 0.), v(1., 0., 0.), v(1., 1., 0.), v(0., 1., 0.)],
            [v(0., 0., 1.), v(1., 0., 1.), v(1., 1., 1.), v(0., 1., 1.)],
            [v(0., 0., 0.), v(1., 0., 0.), v(1., 0., 1.), v(0., 0., 1.)],
            [v(0., 1., 0.), v(1., 1., 0.), v(1., 1., 1.), v(0., 1., 1.)],
            [v(0., 0., 0.), v(0., 1., 0.), v(0., 1., 1.), v(0., 0., 1.)],
            [v(1., 0., 0.), v(1., 1., 0.), v(1., 1., 1.), v(1., 0., 1.)],
        ];
        let triangles = quads
            .iter()
            .flat_map(|q| [[q[0], q[1], q[2]], [q[0], q[2], q[3]]])
            .collect();
        Mesh::new(triangles)
    }

    #[test]
    fn test_cube_fills_grid() {
        let mesh = box_mesh(Vector3::new(2.0, 2.0, 2.0));
        let (grid, meta) = voxelize(&mesh, 8).unwrap();

        assert_eq!(grid.dims, [8, 8, 8]);
        assert_eq!(meta.scale, 4.0);
        assert_eq!(grid.occupied_count(), 8 * 8 * 8);
    }

    #[test]
    fn test_longest_axis_spans_resolution() {
        let mesh = box_mesh(Vector3::new(4.0, 2.0, 1.0));
        let (grid, _) = voxelize(&mesh, 10).unwrap();

        assert_eq!(grid.dims, [10, 5, 3]);
        assert_eq!(grid.get(9, 4, 1), 1.0);
    }

    #[test]
    fn test_projection_sums_along_z() {
        let mesh = box_mesh(Vector3::new(2.0, 2.0, 1.0));
        let (grid, _) = voxelize(&mesh, 4).unwrap();
        let field = grid.project_z();

        assert_eq!((field.width, field.height), (4, 4));
        assert!(field.values.iter().all(|&d| d == 2.0));
        assert_eq!(field.min(), 2.0);
        assert_eq!(field.max(), 2.0);
    }

    #[test]
    fn test_rejects_empty_and_flat_meshes() {
        assert!(voxelize(&Mesh::default(), 10).is_err());

        let point = Vector3::new(1.0, 1.0, 1.0);
        let flat = Mesh::new(vec![[point, point, point]]);
        assert!(voxelize(&flat, 10).is_err());
    }

    #[test]
    fn test_rejects_mesh_without_finite_vertices() {
        let nan = Vector3::new(f32::NAN, f32::NAN, f32::NAN);
        let mesh = Mesh::new(vec![[nan, nan, nan]]);
        assert!(!mesh.bounds().is_valid());
        assert!(matches!(voxelize(&mesh, 10), Err(SynthError::Mesh { .. })));
    }
}

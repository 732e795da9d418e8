/// Default canvas width in pixels
pub const CANVAS_WIDTH: u32 = 512;

/// Default canvas height in pixels
pub const CANVAS_HEIGHT: u32 = 512;

/// Default voxel resolution along the longest mesh axis
pub const VOXEL_RESOLUTION: usize = 100;

/// Default number of generated canvases
pub const CANVAS_COUNT: usize = 100;

/// Default worker pool size for both generation phases
pub const WORKER_COUNT: usize = 12;

/// Default output directory
pub const OUTPUT_DIR: &str = "./output";

/// Accepted mesh file extension (compared case-insensitively)
pub const MESH_EXTENSION: &str = "stl";

/// Output canvas file name prefix, followed by the zero-based canvas index
pub const SAMPLE_PREFIX: &str = "sample_";

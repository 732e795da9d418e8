//! False-colour radiograph synthesis from solid meshes.
//!
//! Meshes are rotated, voxelised and projected into density fields, coloured
//! by material, then alpha-blended at random offsets onto blank canvases.

pub mod bounds;
pub mod colorize;
pub mod compositor;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod image_writer;
pub mod manifest;
pub mod mesh;
pub mod object_renderer;
pub mod voxelizer;

pub use compositor::{Canvas, CanvasCompositor, CanvasSize, Placement};
pub use config::{CalibrationCurve, SynthConfig};
pub use error::{Result, SynthError};
pub use generator::{DatasetGenerator, GenerationReport, GeneratorSettings};
pub use object_renderer::{ObjectImage, ObjectRenderer};

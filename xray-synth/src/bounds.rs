/// Axis-aligned mesh bounds tracking
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl MeshBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            min_y: f32::INFINITY,
            max_y: f32::NEG_INFINITY,
            min_z: f32::INFINITY,
            max_z: f32::NEG_INFINITY,
        }
    }

    /// Update bounds with a new vertex
    pub fn update(&mut self, v: &Vector3<f32>) {
        self.min_x = self.min_x.min(v.x);
        self.max_x = self.max_x.max(v.x);
        self.min_y = self.min_y.min(v.y);
        self.max_y = self.max_y.max(v.y);
        self.min_z = self.min_z.min(v.z);
        self.max_z = self.max_z.max(v.z);
    }

    /// False until at least one vertex has been added
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y && self.min_z <= self.max_z
    }

    pub fn min(&self) -> Vector3<f32> {
        Vector3::new(self.min_x, self.min_y, self.min_z)
    }

    /// World space extent along each axis
    pub fn dimensions(&self) -> Vector3<f32> {
        Vector3::new(
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }

    /// Largest extent over the three axes
    pub fn longest_extent(&self) -> f32 {
        self.dimensions().max()
    }
}

impl Default for MeshBounds {
    fn default() -> Self {
        Self::new()
    }
}

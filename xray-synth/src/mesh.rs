/// Triangle mesh loading (binary and ASCII STL) and rigid rotation.
use crate::bounds::MeshBounds;
use crate::error::{Result, SynthError};
use nalgebra::{Rotation3, Unit, Vector3};
use std::fs;
use std::path::Path;

const BINARY_HEADER_LEN: usize = 80;
const BINARY_TRIANGLE_LEN: usize = 50;

/// Triangle soup loaded from a solid-model file.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<[Vector3<f32>; 3]>,
}

impl Mesh {
    pub fn new(triangles: Vec<[Vector3<f32>; 3]>) -> Self {
        Self { triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Rotate every vertex about the origin. The axis is normalised here, so
    /// callers may pass any non-zero direction. A zero axis is a no-op.
    pub fn rotate(&mut self, axis: Vector3<f32>, angle_degrees: f32) {
        let Some(axis) = Unit::try_new(axis, f32::EPSILON) else {
            log::debug!("Skipping rotation about a zero-length axis");
            return;
        };

        let rotation = Rotation3::from_axis_angle(&axis, angle_degrees.to_radians());
        for triangle in &mut self.triangles {
            for vertex in triangle.iter_mut() {
                *vertex = rotation * *vertex;
            }
        }
    }

    pub fn bounds(&self) -> MeshBounds {
        let mut bounds = MeshBounds::new();
        for vertex in self.triangles.iter().flatten() {
            bounds.update(vertex);
        }
        bounds
    }
}

/// Read an STL file, detecting binary or ASCII encoding.
pub fn read_mesh(path: &Path) -> Result<Mesh> {
    let bytes = fs::read(path)?;
    let mesh = parse_stl(&bytes).map_err(|reason| SynthError::mesh(path, reason))?;

    if mesh.is_empty() {
        return Err(SynthError::mesh(path, "mesh contains no triangles"));
    }

    log::debug!(
        "Loaded {} triangles from {}",
        mesh.triangles.len(),
        path.display()
    );
    Ok(mesh)
}

/// Binary STL is recognised by its exact length; anything else starting with
/// `solid` is treated as ASCII.
pub fn parse_stl(bytes: &[u8]) -> std::result::Result<Mesh, String> {
    if is_binary_stl(bytes) {
        return Ok(parse_binary(bytes));
    }

    if bytes.trim_ascii_start().starts_with(b"solid") {
        let text = std::str::from_utf8(bytes).map_err(|e| format!("invalid ASCII STL: {}", e))?;
        return parse_ascii(text);
    }

    Err("not a binary or ASCII STL file".to_string())
}

fn is_binary_stl(bytes: &[u8]) -> bool {
    if bytes.len() < BINARY_HEADER_LEN + 4 {
        return false;
    }
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    bytes.len() == BINARY_HEADER_LEN + 4 + count * BINARY_TRIANGLE_LEN
}

fn parse_binary(bytes: &[u8]) -> Mesh {
    let triangles = bytes[BINARY_HEADER_LEN + 4..]
        .chunks_exact(BINARY_TRIANGLE_LEN)
        .map(|record| {
            let read_f32 = |o: usize| {
                f32::from_le_bytes([record[o], record[o + 1], record[o + 2], record[o + 3]])
            };
            // Vertices follow the 12-byte facet normal.
            let vertex = |v: usize| {
                let o = 12 + v * 12;
                Vector3::new(read_f32(o), read_f32(o + 4), read_f32(o + 8))
            };
            [vertex(0), vertex(1), vertex(2)]
        })
        .collect();

    Mesh::new(triangles)
}

fn parse_ascii(text: &str) -> std::result::Result<Mesh, String> {
    let mut triangles = Vec::new();
    let mut pending = Vec::with_capacity(3);

    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("vertex") => {
                let coords: Vec<f32> = tokens
                    .map(|t| t.parse::<f32>())
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|e| format!("line {}: bad vertex ({})", line_no + 1, e))?;
                if coords.len() != 3 {
                    return Err(format!(
                        "line {}: vertex needs 3 coordinates, got {}",
                        line_no + 1,
                        coords.len()
                    ));
                }
                pending.push(Vector3::new(coords[0], coords[1], coords[2]));
            }
            Some("endloop") => {
                if pending.len() != 3 {
                    return Err(format!(
                        "line {}: facet has {} vertices",
                        line_no + 1,
                        pending.len()
                    ));
                }
                triangles.push([pending[0], pending[1], pending[2]]);
                pending.clear();
            }
            _ => {}
        }
    }

    Ok(Mesh::new(triangles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut bytes = vec![0u8; BINARY_HEADER_LEN];
        bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for triangle in triangles {
            bytes.extend_from_slice(&[0u8; 12]);
            for vertex in triangle {
                for c in vertex {
                    bytes.extend_from_slice(&c.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&[0u8; 2]);
        }
        bytes
    }

    #[test]
    fn test_parse_binary() {
        let bytes = binary_stl(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 3.0]]]);
        let mesh = parse_stl(&bytes).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(mesh.triangles[0][2], Vector3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_ascii() {
        let text = "solid part\n\
            facet normal 0 0 1\n\
              outer loop\n\
                vertex 0 0 0\n\
                vertex 1 0 0\n\
                vertex 0 1 0\n\
              endloop\n\
            endfacet\n\
            endsolid part\n";
        let mesh = parse_stl(text.as_bytes()).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(mesh.triangles[0][1], Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_stl(b"definitely not a mesh").is_err());
        assert!(parse_stl(b"solid x\nouter loop\nvertex 0 0\nendloop\n").is_err());
    }

    #[test]
    fn test_rotation_about_z() {
        let mut mesh = Mesh::new(vec![[
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ]]);
        mesh.rotate(Vector3::new(0.0, 0.0, 2.0), 90.0);

        let rotated = mesh.triangles[0];
        assert_relative_eq!(rotated[0], Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(rotated[1], Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(rotated[2], Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_axis_leaves_mesh_unchanged() {
        let original = [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
            Vector3::new(7.0, 8.0, 9.0),
        ];
        let mut mesh = Mesh::new(vec![original]);
        mesh.rotate(Vector3::zeros(), 45.0);
        assert_eq!(mesh.triangles[0], original);
    }
}

//! Shared fixtures: scratch directories and STL box meshes.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Fresh, empty directory unique to this test process and name.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("xray-synth-{}-{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a closed axis-aligned box from the origin to `size` as binary STL.
pub fn write_box_stl(path: &Path, size: [f32; 3]) {
    let v = |x: f32, y: f32, z: f32| [x * size[0], y * size[1], z * size[2]];
    let quads = [
        [v(0., 0., 0.), v(0., 1., 0.), v(1., 1., 0.), v(1., 0., 0.)],
        [v(0., 0., 1.), v(1., 0., 1.), v(1., 1., 1.), v(0., 1., 1.)],
        [v(0., 0., 0.), v(1., 0., 0.), v(1., 0., 1.), v(0., 0., 1.)],
        [v(0., 1., 0.), v(0., 1., 1.), v(1., 1., 1.), v(1., 1., 0.)],
        [v(0., 0., 0.), v(0., 0., 1.), v(0., 1., 1.), v(0., 1., 0.)],
        [v(1., 0., 0.), v(1., 1., 0.), v(1., 1., 1.), v(1., 0., 1.)],
    ];

    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&12u32.to_le_bytes());
    for q in &quads {
        for triangle in [[q[0], q[1], q[2]], [q[0], q[2], q[3]]] {
            bytes.extend_from_slice(&[0u8; 12]);
            for vertex in triangle {
                for c in vertex {
                    bytes.extend_from_slice(&c.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&[0u8; 2]);
        }
    }

    fs::write(path, bytes).unwrap();
}

/// PNG files in `dir`, sorted by name.
pub fn png_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "png"))
        .collect();
    files.sort();
    files
}

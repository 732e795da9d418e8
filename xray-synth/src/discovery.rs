/// Mesh library discovery and filename-based material resolution
use crate::config::SynthConfig;
use crate::error::{Result, SynthError};
use constants::MESH_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};

/// Mesh file found in the input directory.
#[derive(Debug, Clone)]
pub struct MeshCandidate {
    /// Full path to the mesh file.
    pub path: PathBuf,
    /// Object name derived from filename.
    pub name: String,
}

/// Lists `*.stl` files in `input_dir`, sorted by name.
pub fn discover_mesh_files(input_dir: &Path) -> Result<Vec<MeshCandidate>> {
    if !input_dir.is_dir() {
        return Err(SynthError::Input(format!(
            "Input directory does not exist: {}",
            input_dir.display()
        )));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let is_mesh = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(MESH_EXTENSION));
        if is_mesh {
            let name = path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            candidates.push(MeshCandidate { path, name });
        }
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name));

    log::debug!("Mesh processing order:");
    for (i, candidate) in candidates.iter().enumerate() {
        log::debug!("  {}: {}", i, candidate.name);
    }

    Ok(candidates)
}

/// First token of the lowercase file stem that names a registered material,
/// e.g. `steel_wrench.stl` or `knife-Steel-01.stl` resolve to `steel`.
pub fn resolve_material(path: &Path, config: &SynthConfig) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy().to_lowercase();
    stem.split(|c: char| !c.is_ascii_alphanumeric())
        .find(|token| config.materials.contains_key(*token))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_material_from_stem_tokens() {
        let config = SynthConfig::default();
        let resolve = |p: &str| resolve_material(Path::new(p), &config);

        assert_eq!(resolve("meshes/steel_wrench.stl").as_deref(), Some("steel"));
        assert_eq!(resolve("knife-Steel-01.STL").as_deref(), Some("steel"));
        assert_eq!(resolve("bottle_glass.stl").as_deref(), Some("glass"));
        assert_eq!(resolve("mystery_object.stl"), None);
        // Registered but uncalibrated names still resolve; colouring rejects them.
        assert_eq!(resolve("composite_panel.stl").as_deref(), Some("composite"));
    }

    #[test]
    fn test_missing_directory_is_input_error() {
        let result = discover_mesh_files(Path::new("/definitely/not/a/real/dir"));
        assert!(matches!(result, Err(SynthError::Input(_))));
    }
}

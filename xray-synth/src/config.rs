/// Synthesis configuration: material calibration table and blending tunables.
use crate::error::{Result, SynthError};
use constants::{ATTENUATION_COEFFICIENT, BLEND_ALPHA, HUE_SAMPLES, MATERIAL_MAP};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Hue band (low, high) a material's densities are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCurve(pub f32, pub f32);

impl CalibrationCurve {
    pub fn hue_low(&self) -> f32 {
        self.0
    }

    pub fn hue_high(&self) -> f32 {
        self.1
    }
}

/// Configuration shared read-only by every rendering and compositing task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Material name to hue band. `None` marks a registered but uncalibrated material.
    pub materials: BTreeMap<String, Option<CalibrationCurve>>,
    /// Opacity of object images blended onto the canvas.
    pub blend_alpha: f32,
    /// Attenuation coefficient k of `1 - exp(-k * density)`.
    pub attenuation: f64,
    /// Interpolation samples spanning the density range and the hue band.
    pub hue_samples: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        let materials = MATERIAL_MAP
            .iter()
            .map(|m| {
                (
                    m.name.to_string(),
                    m.hue_range.map(|(low, high)| CalibrationCurve(low, high)),
                )
            })
            .collect();

        Self {
            materials,
            blend_alpha: BLEND_ALPHA,
            attenuation: ATTENUATION_COEFFICIENT,
            hue_samples: HUE_SAMPLES,
        }
    }
}

impl SynthConfig {
    /// Load an override file. Fields missing from the file keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: SynthConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!(
            "Loaded configuration from {} ({} materials)",
            path.display(),
            config.materials.len()
        );
        Ok(config)
    }

    /// Reject tunables that would produce colours outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.blend_alpha) {
            return Err(self.configuration_error(format!(
                "Blend alpha must lie in [0, 1], got {}",
                self.blend_alpha
            )));
        }
        if !self.attenuation.is_finite() || self.attenuation < 0.0 {
            return Err(self.configuration_error(format!(
                "Attenuation must be finite and non-negative, got {}",
                self.attenuation
            )));
        }
        if self.hue_samples < 2 {
            return Err(self.configuration_error(format!(
                "At least 2 hue samples are required, got {}",
                self.hue_samples
            )));
        }

        for (name, curve) in &self.materials {
            if let Some(curve) = curve {
                let in_range = |h: f32| h.is_finite() && (0.0..=1.0).contains(&h);
                if !in_range(curve.hue_low()) || !in_range(curve.hue_high()) {
                    return Err(self.configuration_error(format!(
                        "Calibration curve for '{}' must lie in [0, 1], got {:?}",
                        name, curve
                    )));
                }
            }
        }

        Ok(())
    }

    /// Look up the calibration curve of a material.
    pub fn calibration(&self, material: &str) -> Result<CalibrationCurve> {
        match self.materials.get(material) {
            Some(Some(curve)) => Ok(*curve),
            Some(None) => Err(self.configuration_error(format!(
                "Material '{}' has no calibration curve",
                material
            ))),
            None => Err(self.configuration_error(format!("Unknown material '{}'", material))),
        }
    }

    pub fn material_names(&self) -> Vec<String> {
        self.materials.keys().cloned().collect()
    }

    pub fn configuration_error(&self, message: impl Into<String>) -> SynthError {
        SynthError::Configuration {
            message: message.into(),
            available: self.material_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_material_table() {
        let config = SynthConfig::default();
        assert_eq!(config.materials.len(), MATERIAL_MAP.len());

        let steel = config.calibration("steel").unwrap();
        let (low, high) = constants::get_hue_range("steel").unwrap();
        assert_eq!(steel, CalibrationCurve(low, high));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_material_lists_available_names() {
        let config = SynthConfig::default();
        match config.calibration("unobtainium") {
            Err(SynthError::Configuration { available, .. }) => {
                assert!(available.contains(&"steel".to_string()));
                assert_eq!(available.len(), config.materials.len());
            }
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_uncalibrated_material_is_rejected() {
        let config = SynthConfig::default();
        assert!(matches!(
            config.calibration("composite"),
            Err(SynthError::Configuration { .. })
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SynthConfig =
            serde_json::from_str(r#"{ "materials": { "bone": [0.1, 0.2], "wax": null } }"#)
                .unwrap();
        assert_eq!(config.blend_alpha, BLEND_ALPHA);
        assert_eq!(config.hue_samples, HUE_SAMPLES);
        assert_eq!(config.calibration("bone").unwrap(), CalibrationCurve(0.1, 0.2));
        assert!(config.calibration("wax").is_err());
        assert!(config.calibration("steel").is_err());
    }

    #[test]
    fn test_validation_rejects_out_of_range_values() {
        let mut config = SynthConfig::default();
        config.blend_alpha = 1.5;
        assert!(config.validate().is_err());

        let mut config = SynthConfig::default();
        config
            .materials
            .insert("bad".to_string(), Some(CalibrationCurve(0.2, 1.4)));
        assert!(config.validate().is_err());

        let mut config = SynthConfig::default();
        config.hue_samples = 1;
        assert!(config.validate().is_err());
    }
}

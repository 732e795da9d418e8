/// Density to false-colour conversion with material calibration and attenuation
use crate::config::{CalibrationCurve, SynthConfig};
use crate::error::Result;
use crate::voxelizer::DensityField;
use image::{Rgb, Rgb32FImage};

pub struct DensityColorizer<'a> {
    config: &'a SynthConfig,
}

impl<'a> DensityColorizer<'a> {
    pub fn new(config: &'a SynthConfig) -> Self {
        Self { config }
    }

    /// Colourise a density field for the given material.
    ///
    /// Hue follows the rank of each density inside the field's own
    /// [min, max] range, mapped onto the material's calibrated hue band.
    /// Brightness follows `1 - exp(-k * density)`. Zero density is forced
    /// to pure white.
    pub fn colorize(&self, field: &DensityField, material: &str) -> Result<Rgb32FImage> {
        let curve = self.config.calibration(material)?;

        if field.values.is_empty() {
            return Ok(Rgb32FImage::new(field.width as u32, field.height as u32));
        }

        let (density_samples, hue_samples) = self.build_hue_map(field, curve);
        let k = self.config.attenuation;

        let image = Rgb32FImage::from_fn(field.width as u32, field.height as u32, |x, y| {
            let density = field.values[y as usize * field.width + x as usize];
            let rgb = if density == 0.0 {
                // Background inside the object's bounding box.
                hsv_to_rgb(0.0, 0.0, 1.0)
            } else {
                let hue = interp(density, &density_samples, &hue_samples);
                let value = 1.0 - (-k * density).exp();
                hsv_to_rgb(hue, 1.0, value)
            };
            Rgb(rgb)
        });

        Ok(image)
    }

    /// Sample tables mapping the field's density range onto the hue band.
    fn build_hue_map(&self, field: &DensityField, curve: CalibrationCurve) -> (Vec<f64>, Vec<f64>) {
        let samples = self.config.hue_samples;
        (
            linspace(field.min(), field.max(), samples),
            linspace(curve.hue_low() as f64, curve.hue_high() as f64, samples),
        )
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        }
    }
}

/// Piecewise-linear interpolation over increasing sample points, clamped to
/// the end values. A query at or past the last sample takes the last value,
/// so a degenerate table (all points equal) never divides by zero.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let last = xp.len() - 1;
    if x >= xp[last] {
        return fp[last];
    }
    if x <= xp[0] {
        return fp[0];
    }

    let idx = xp.partition_point(|&p| p <= x);
    let (x0, x1) = (xp[idx - 1], xp[idx]);
    let (y0, y1) = (fp[idx - 1], fp[idx]);
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// HSV (all components in [0, 1]) to RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f32; 3] {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [r as f32, g as f32, b as f32]
}

/// Opacity of an object image when blended onto the canvas
pub const BLEND_ALPHA: f32 = 0.6;

/// Attenuation coefficient k in `value = 1 - exp(-k * density)`
pub const ATTENUATION_COEFFICIENT: f64 = 1e3;

/// Number of samples spanning the density range and the calibrated hue band
pub const HUE_SAMPLES: usize = 100;

/// Rotation angle range applied to every mesh before voxelisation (degrees)
pub const ROTATION_ANGLE_RANGE: (f64, f64) = (30.0, 60.0);

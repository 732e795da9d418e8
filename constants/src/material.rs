/// Calibrated hue band for one material, as (hue_low, hue_high) in HSV hue units [0, 1].
/// Organic materials sit in the orange band, light inorganics in green, metals in blue.
pub struct MaterialInfo {
    pub name: &'static str,
    pub hue_range: Option<(f32, f32)>,
}

/// Registered materials. An entry without a hue range is known but not yet
/// calibrated and is rejected when an object is colorised.
pub const MATERIAL_MAP: &[MaterialInfo] = &[
    MaterialInfo {
        name: "organic",
        hue_range: Some((0.05, 0.12)),
    },
    MaterialInfo {
        name: "plastic",
        hue_range: Some((0.06, 0.14)),
    },
    MaterialInfo {
        name: "rubber",
        hue_range: Some((0.04, 0.10)),
    },
    MaterialInfo {
        name: "glass",
        hue_range: Some((0.25, 0.35)),
    },
    MaterialInfo {
        name: "aluminium",
        hue_range: Some((0.28, 0.40)),
    },
    MaterialInfo {
        name: "ceramic",
        hue_range: Some((0.30, 0.42)),
    },
    MaterialInfo {
        name: "steel",
        hue_range: Some((0.55, 0.66)),
    },
    MaterialInfo {
        name: "iron",
        hue_range: Some((0.56, 0.68)),
    },
    MaterialInfo {
        name: "copper",
        hue_range: Some((0.60, 0.70)),
    },
    MaterialInfo {
        name: "composite",
        hue_range: None,
    },
];

pub fn get_hue_range(name: &str) -> Option<(f32, f32)> {
    MATERIAL_MAP
        .iter()
        .find(|m| m.name == name)
        .and_then(|m| m.hue_range)
}

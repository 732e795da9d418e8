/// Shared defaults for false-colour radiograph synthesis
pub mod material;
pub mod render_settings;
pub mod texture;

pub use material::{MATERIAL_MAP, MaterialInfo, get_hue_range};
pub use render_settings::*;
pub use texture::*;

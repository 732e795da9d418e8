/// PNG output for composed canvases
use constants::SAMPLE_PREFIX;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Output path for canvas `index`: `<dir>/sample_<index>.png`.
pub fn sample_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!("{}{}.png", SAMPLE_PREFIX, index))
}

/// Write an 8-bit RGB canvas as PNG.
pub fn write_rgb_png(path: &Path, image: &RgbImage) -> Result<(), image::ImageError> {
    image.save_with_format(path, image::ImageFormat::Png)
}

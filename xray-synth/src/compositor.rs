/// Canvas composition: random placement and alpha blending of object images.
use crate::config::SynthConfig;
use crate::object_renderer::ObjectImage;
use image::{Rgb, Rgb32FImage, RgbImage};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Where one object image landed on a canvas, in pixels from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Index into the object image set.
    pub object: usize,
    pub row: u32,
    pub col: u32,
    pub height: u32,
    pub width: u32,
}

/// A finished canvas and the labels describing it.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub image: RgbImage,
    pub placements: Vec<Placement>,
    /// Objects that did not fit on this canvas.
    pub skipped: Vec<usize>,
}

pub struct CanvasCompositor<'a> {
    config: &'a SynthConfig,
    size: CanvasSize,
}

impl<'a> CanvasCompositor<'a> {
    pub fn new(config: &'a SynthConfig, size: CanvasSize) -> Self {
        Self { config, size }
    }

    /// Blend every object onto a white canvas at an independent random offset.
    /// Objects are not checked for overlap; later objects blend over earlier ones.
    pub fn compose<R: Rng>(&self, objects: &[ObjectImage], rng: &mut R) -> Canvas {
        let mut canvas = Rgb32FImage::from_pixel(self.size.width, self.size.height, Rgb([1.0; 3]));
        let mut placements = Vec::with_capacity(objects.len());
        let mut skipped = Vec::new();

        for (index, object) in objects.iter().enumerate() {
            let Some((row, col)) = sample_offset(self.size, object.width(), object.height(), rng)
            else {
                log::warn!(
                    "Object is larger than the canvas. Increase the canvas size. Object {} size: ({}, {})",
                    object.name,
                    object.height(),
                    object.width()
                );
                skipped.push(index);
                continue;
            };

            self.blend(&mut canvas, &object.pixels, row, col);
            placements.push(Placement {
                object: index,
                row,
                col,
                height: object.height(),
                width: object.width(),
            });
        }

        Canvas {
            image: to_rgb8(&canvas),
            placements,
            skipped,
        }
    }

    /// `canvas = object * alpha + canvas * (1 - alpha)` over the object's footprint.
    fn blend(&self, canvas: &mut Rgb32FImage, object: &Rgb32FImage, row: u32, col: u32) {
        let alpha = self.config.blend_alpha;
        for (x, y, src) in object.enumerate_pixels() {
            let dst = canvas.get_pixel_mut(col + x, row + y);
            for c in 0..3 {
                dst.0[c] = src.0[c] * alpha + dst.0[c] * (1.0 - alpha);
            }
        }
    }
}

/// Uniform (row, col) offset keeping the object inside the canvas, or `None`
/// when the object does not leave a positive range on some axis.
pub fn sample_offset<R: Rng>(
    canvas: CanvasSize,
    width: u32,
    height: u32,
    rng: &mut R,
) -> Option<(u32, u32)> {
    let row_range = canvas.height as i64 - height as i64;
    let col_range = canvas.width as i64 - width as i64;
    if row_range <= 0 || col_range <= 0 {
        return None;
    }

    Some((
        rng.gen_range(0..row_range) as u32,
        rng.gen_range(0..col_range) as u32,
    ))
}

/// Float [0, 1] to 8-bit channels by truncation.
pub fn to_rgb8(canvas: &Rgb32FImage) -> RgbImage {
    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let p = canvas.get_pixel(x, y).0;
        Rgb(p.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8))
    })
}

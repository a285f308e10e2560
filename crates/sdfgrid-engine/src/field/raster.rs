//! Software rasterizer for the grid field.
//!
//! Evaluates `shade` once per pixel centre, the same way the GPU runs the fragment
//! stage. Used for headless snapshots and for checking the field without a device.

use crate::coords::{ColorRgba, Vec2};
use crate::error::RenderError;

use super::grid::shade;
use super::uniforms::GridUniforms;

/// Largest frame `rasterize` will allocate.
pub const MAX_RASTER_PIXELS: usize = 1 << 26;

/// Row-major pixel buffer; row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<ColorRgba>,
}

impl Framebuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at column `x`, row `row` (top-down). Panics when out of bounds.
    pub fn pixel(&self, x: u32, row: u32) -> ColorRgba {
        assert!(x < self.width && row < self.height, "pixel ({x}, {row}) out of bounds");
        self.pixels[row as usize * self.width as usize + x as usize]
    }

    pub fn pixels(&self) -> &[ColorRgba] {
        &self.pixels
    }

    /// Packs into 8-bit RGBA, saturating channels the composite pushed past 1.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }
}

/// Bottom-left-origin coordinate of the centre of pixel (`x`, `row`) in an image of
/// `height` rows, matching the flipped fragment position the shader sees.
#[inline]
pub fn fragment_coord(x: u32, row: u32, height: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, height as f32 - (row as f32 + 0.5))
}

/// Renders one frame of the field at `uniforms.resolution` (rounded to whole pixels).
pub fn rasterize(uniforms: &GridUniforms) -> Result<Framebuffer, RenderError> {
    uniforms
        .validate()
        .map_err(|reason| RenderError::InvalidUniformState { reason })?;

    let width = (uniforms.resolution.width.round() as u32).max(1);
    let height = (uniforms.resolution.height.round() as u32).max(1);

    let len = (width as usize)
        .checked_mul(height as usize)
        .filter(|&len| len <= MAX_RASTER_PIXELS)
        .ok_or(RenderError::FramebufferTooLarge { width, height })?;

    let mut pixels = Vec::with_capacity(len);
    for row in 0..height {
        for x in 0..width {
            pixels.push(shade(fragment_coord(x, row, height), uniforms));
        }
    }

    log::debug!("rasterized {width}x{height} grid frame at scale {}", uniforms.scale);

    Ok(Framebuffer { width, height, pixels })
}

//! Per-pixel grid/SDF field.
//!
//! CPU mirror of `render/grid/shaders/grid.frag.wgsl`. Every function here is pure
//! and maps one-to-one onto a WGSL function of the same name, so the GPU path can be
//! reasoned about (and tested) without a device.
//!
//! Spaces:
//! - raw: physical pixels, origin bottom-left
//! - normalized: `[-aspect, aspect] x [-1, 1]`, multiplied by the zoom scale;
//!   grid cells are unit squares in this space

mod grid;
mod raster;
mod sdf;
mod uniforms;

pub use grid::{
    cell, grid_line, in_gap_band, normalize_point, pointer_highlight, same_cell, shade,
    GAP_BAND, GRID_COLOR, HIGHLIGHT_COLOR, HIGHLIGHT_EDGE, HIGHLIGHT_HALF_SIZE,
    HIGHLIGHT_RADII, THICKNESS,
};
pub use raster::{fragment_coord, rasterize, Framebuffer};
pub use sdf::{sd_rounded_box, smoothstep};
pub use uniforms::GridUniforms;

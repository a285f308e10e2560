//! Coordinate and color types shared by the field math, the renderer and the runtime.
//!
//! Canonical CPU space for this crate:
//! - Physical pixels (the same units the surface and fragment shader use)
//! - Origin bottom-left for pointer and fragment coordinates
//! - +X right, +Y up
//!
//! Window-system positions (top-left origin) are flipped by `input` before they
//! reach anything in here.

mod color;
mod corner_radii;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use corner_radii::CornerRadii;
pub use vec2::Vec2;
pub use viewport::Viewport;

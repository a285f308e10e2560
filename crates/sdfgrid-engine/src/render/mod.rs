//! GPU rendering subsystem.
//!
//! Convention:
//! - Geometry is a single clip-space quad; everything visible is procedural.
//! - Uniforms carry physical-pixel resolution and a bottom-left pointer position.
//! - Fragment shaders flip `@builtin(position)` to bottom-left before using it.

mod ctx;
pub mod grid;

pub use ctx::{RenderCtx, RenderTarget};

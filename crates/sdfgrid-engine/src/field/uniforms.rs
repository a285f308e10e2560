use crate::coords::{Vec2, Viewport};
use crate::error::UniformRejection;

use super::grid::normalize_point;

/// Per-frame inputs to the grid field.
///
/// One value is captured at the start of a frame and used for every fragment of that
/// frame, so the grid and the pointer are always normalized against the same viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridUniforms {
    /// Drawable size in physical pixels.
    pub resolution: Viewport,
    /// Pointer position, physical pixels, bottom-left origin.
    pub mouse: Vec2,
    /// Zoom applied in normalized space.
    pub scale: f32,
}

impl GridUniforms {
    #[inline]
    pub const fn new(resolution: Viewport, mouse: Vec2, scale: f32) -> Self {
        Self { resolution, mouse, scale }
    }

    /// Checks the invariants the shader divides by. The pointer is not checked; a
    /// non-finite pointer only disables the highlight.
    pub fn validate(&self) -> Result<(), UniformRejection> {
        if !self.resolution.is_valid() {
            return Err(UniformRejection::Resolution);
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(UniformRejection::Scale);
        }
        Ok(())
    }

    #[inline]
    pub fn normalize(&self, p: Vec2) -> Vec2 {
        normalize_point(p, self.resolution, self.scale)
    }

    #[inline]
    pub fn normalized_mouse(&self) -> Vec2 {
        self.normalize(self.mouse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms(w: f32, h: f32, scale: f32) -> GridUniforms {
        GridUniforms::new(Viewport::new(w, h), Vec2::new(10.0, 10.0), scale)
    }

    #[test]
    fn accepts_positive_resolution_and_scale() {
        assert_eq!(uniforms(800.0, 600.0, 1.0).validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_height() {
        assert_eq!(uniforms(800.0, 0.0, 1.0).validate(), Err(UniformRejection::Resolution));
        assert_eq!(uniforms(800.0, -600.0, 1.0).validate(), Err(UniformRejection::Resolution));
    }

    #[test]
    fn rejects_non_positive_or_nan_scale() {
        assert_eq!(uniforms(800.0, 600.0, 0.0).validate(), Err(UniformRejection::Scale));
        assert_eq!(uniforms(800.0, 600.0, -2.0).validate(), Err(UniformRejection::Scale));
        assert_eq!(uniforms(800.0, 600.0, f32::NAN).validate(), Err(UniformRejection::Scale));
    }

    #[test]
    fn nan_pointer_is_accepted() {
        let mut u = uniforms(800.0, 600.0, 1.0);
        u.mouse = Vec2::new(f32::NAN, 0.0);
        assert_eq!(u.validate(), Ok(()));
    }
}

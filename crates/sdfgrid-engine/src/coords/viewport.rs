use super::Vec2;

/// Drawable size in physical pixels.
///
/// This is the `resolution` the grid shader divides by, so a usable viewport must
/// have a strictly positive, finite width and height.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height. Only meaningful for a valid viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width / self.height
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Centre point in bottom-left-origin pixel space.
    #[inline]
    pub fn center(self) -> Vec2 {
        self.size() * 0.5
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Viewport {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Viewport::new(size.width as f32, size.height as f32)
    }
}

/// Linear RGBA color.
///
/// Channels are not clamped: the grid composite adds grid and highlight
/// contributions and may exceed `1.0` where they overlap. Clamping happens when
/// the color reaches a fixed-point target.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Scales the RGB channels, leaving alpha untouched.
    #[inline]
    pub fn scale_rgb(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a)
    }

    /// Adds the RGB channels of `rhs`, keeping `self.a`.
    #[inline]
    pub fn add_rgb(self, rhs: ColorRgba) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a)
    }

    /// Saturating conversion to 8-bit channels. NaN maps to 0.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(c: f32) -> u8 {
            if c.is_nan() {
                return 0;
            }
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Per-corner radii for a rounded box, in the units of the space it is evaluated in.
///
/// Corners are named in +Y-up space (bottom-left origin). `as_quadrants` packs them
/// in the order the SDF selects them by quadrant: `(+x,+y)`, `(+x,-y)`, `(-x,+y)`, `(-x,-y)`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_right: f32,
    pub bottom_right: f32,
    pub top_left: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_right: f32, bottom_right: f32, top_left: f32, bottom_left: f32) -> Self {
        Self { top_right, bottom_right, top_left, bottom_left }
    }

    /// Uniform radius on all four corners.
    #[inline]
    pub const fn all(r: f32) -> Self {
        Self { top_right: r, bottom_right: r, top_left: r, bottom_left: r }
    }

    #[inline]
    pub const fn as_quadrants(self) -> [f32; 4] {
        [self.top_right, self.bottom_right, self.top_left, self.bottom_left]
    }
}

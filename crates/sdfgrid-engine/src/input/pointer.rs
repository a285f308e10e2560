use crate::coords::Vec2;

/// Pointer snapshot handed to the renderer for one frame.
///
/// `x`/`y` are physical pixels with Y measured up from the bottom of the viewport.
/// Button flags ride along for interaction code; the grid shader ignores them.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl PointerState {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

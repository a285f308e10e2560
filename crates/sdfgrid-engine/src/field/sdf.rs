//! Signed distance functions.
//!
//! Distance functions follow Inigo Quilez, <https://iquilezles.org/articles/distfunctions2d/>.

use crate::coords::{CornerRadii, Vec2};

/// Signed distance from `p` to a box of half-extent `b` centred on the origin with
/// per-corner rounding. Negative inside.
///
/// The radius is picked by the quadrant `p` lies in; points on an axis take the
/// negative-side corner.
pub fn sd_rounded_box(p: Vec2, b: Vec2, radii: CornerRadii) -> f32 {
    let [tr, br, tl, bl] = radii.as_quadrants();
    let (upper, lower) = if p.x > 0.0 { (tr, br) } else { (tl, bl) };
    let r = if p.y > 0.0 { upper } else { lower };

    let q = p.abs() - b + r;
    q.x.max(q.y).min(0.0) + q.max(Vec2::zero()).length() - r
}

/// Hermite interpolation with the GLSL/WGSL formula, evaluated literally.
///
/// `edge0 >= edge1` is allowed and yields the mirrored ramp; `edge0 == edge1` gives
/// `0` or `1` depending on the sign of `x - edge0` (or NaN when both are equal).
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

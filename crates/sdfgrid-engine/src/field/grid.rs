use crate::coords::{ColorRgba, CornerRadii, Vec2, Viewport};

use super::sdf::{sd_rounded_box, smoothstep};
use super::uniforms::GridUniforms;

/// Grid line width in normalized-cell units. Scales with zoom.
pub const THICKNESS: f32 = 0.15;

/// Open interval of in-cell positions (per axis) left undrawn by the highlight.
pub const GAP_BAND: (f32, f32) = (0.4, 0.6);

pub const HIGHLIGHT_HALF_SIZE: f32 = 0.5;
pub const HIGHLIGHT_RADII: CornerRadii = CornerRadii::all(0.1);

/// `(edge1, x)` passed to `smoothstep(d, edge1, x)` when turning the highlight
/// distance into coverage.
pub const HIGHLIGHT_EDGE: (f32, f32) = (-0.2, -0.15);

pub const GRID_COLOR: ColorRgba = ColorRgba::rgb(1.0, 0.5, 1.0);
pub const HIGHLIGHT_COLOR: ColorRgba = ColorRgba::rgb(0.0, 1.0, 0.0);

/// Maps a raw bottom-left pixel position into normalized grid space.
///
/// Fragments and the pointer both go through here; cell comparison relies on it.
#[inline]
pub fn normalize_point(p: Vec2, resolution: Viewport, scale: f32) -> Vec2 {
    let mut n = p.div_elem(resolution.size()) * 2.0 - 1.0;
    n.x *= resolution.aspect();
    n * scale
}

/// `1.0` when `n` lies on a grid line band, `0.0` otherwise.
#[inline]
pub fn grid_line(n: Vec2) -> f32 {
    let f = (n + THICKNESS * 0.5).fract();
    let x = THICKNESS - f.x.min(THICKNESS);
    let y = THICKNESS - f.y.min(THICKNESS);
    if x + y > 0.0 { 1.0 } else { 0.0 }
}

/// Lower-left corner of the unit cell containing `n`.
#[inline]
pub fn cell(n: Vec2) -> Vec2 {
    n - n.fract()
}

#[inline]
pub fn same_cell(a: Vec2, b: Vec2) -> bool {
    cell(a) == cell(b)
}

/// True when the in-cell position of `n` falls inside the crosshair gap on either axis.
#[inline]
pub fn in_gap_band(n: Vec2) -> bool {
    let f = n.fract();
    let (lo, hi) = GAP_BAND;
    (f.x > lo && f.x < hi) || (f.y > lo && f.y < hi)
}

/// Highlight coverage at normalized point `n` for a pointer at normalized `mouse`.
///
/// Zero outside the pointer's cell and inside the gap band. Inside the cell the
/// rounded-box distance `d` is shaped by `1 - smoothstep(d, -0.2, -0.15)`, which
/// yields a soft rim along the cell border and an empty interior.
pub fn pointer_highlight(n: Vec2, mouse: Vec2) -> f32 {
    if !same_cell(n, mouse) {
        return 0.0;
    }
    if in_gap_band(n) {
        return 0.0;
    }

    let center = cell(mouse) + HIGHLIGHT_HALF_SIZE;
    let d = sd_rounded_box(n - center, Vec2::splat(HIGHLIGHT_HALF_SIZE), HIGHLIGHT_RADII);

    let (edge1, x) = HIGHLIGHT_EDGE;
    1.0 - smoothstep(d, edge1, x)
}

/// Full per-fragment evaluation: `frag` is a raw bottom-left pixel position.
///
/// Contributions are summed without clamping.
pub fn shade(frag: Vec2, uniforms: &GridUniforms) -> ColorRgba {
    let n = uniforms.normalize(frag);
    let m = uniforms.normalized_mouse();

    ColorRgba::black()
        .add_rgb(GRID_COLOR.scale_rgb(grid_line(n)))
        .add_rgb(HIGHLIGHT_COLOR.scale_rgb(pointer_highlight(n, m)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(w: f32, h: f32) -> Viewport {
        Viewport::new(w, h)
    }

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    /// Points on a 1/16 lattice; exact in f32 and never within an ulp of a band edge.
    fn lattice(range: i32) -> impl Iterator<Item = Vec2> {
        (-range * 16..range * 16).flat_map(move |i| {
            (-range * 16..range * 16)
                .step_by(3)
                .map(move |j| v(i as f32 / 16.0, j as f32 / 16.0))
        })
    }

    // ── normalize_point ───────────────────────────────────────────────────

    #[test]
    fn centre_maps_to_origin() {
        assert_eq!(normalize_point(v(400.0, 300.0), vp(800.0, 600.0), 1.0), Vec2::zero());
    }

    #[test]
    fn corners_map_to_aspect_bounds() {
        let res = vp(800.0, 600.0);
        let lo = normalize_point(v(0.0, 0.0), res, 1.0);
        let hi = normalize_point(v(800.0, 600.0), res, 1.0);
        assert!((lo.x + 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(lo.y, -1.0);
        assert!((hi.x - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(hi.y, 1.0);
    }

    #[test]
    fn normalize_is_linear_in_scale() {
        let res = vp(1280.0, 720.0);
        for p in [v(0.0, 0.0), v(17.5, 703.25), v(640.0, 360.0), v(1279.0, 1.0), v(-40.0, 900.0)] {
            let base = normalize_point(p, res, 1.0);
            for s in [0.25, 1.0, 3.0, 7.5, 64.0] {
                assert_eq!(normalize_point(p, res, s), base * s, "p={p:?} s={s}");
            }
        }
    }

    #[test]
    fn aspect_follows_current_viewport() {
        let raw = v(400.0, 300.0);
        let narrow = normalize_point(raw, vp(800.0, 600.0), 1.0);
        let wide = normalize_point(raw, vp(1600.0, 600.0), 1.0);

        assert_eq!(narrow, Vec2::zero());
        // x: (400 / 1600 * 2 - 1) * (1600 / 600)
        assert!((wide.x - (-0.5 * 1600.0 / 600.0)).abs() < 1e-6);
        assert_eq!(wide.y, 0.0);
        assert_ne!(cell(narrow), cell(wide));
    }

    // ── grid_line ─────────────────────────────────────────────────────────

    #[test]
    fn integer_lines_are_on_grid() {
        assert_eq!(grid_line(v(0.0, 0.5)), 1.0);
        assert_eq!(grid_line(v(0.5, -3.0)), 1.0);
        assert_eq!(grid_line(v(0.05, 0.5)), 1.0);
        assert_eq!(grid_line(v(-0.05, 0.5)), 1.0);
    }

    #[test]
    fn cell_interior_is_off_grid() {
        assert_eq!(grid_line(v(0.5, 0.5)), 0.0);
        assert_eq!(grid_line(v(0.2, 0.8)), 0.0);
        assert_eq!(grid_line(v(-0.5, -1.5)), 0.0);
    }

    #[test]
    fn band_is_thickness_wide() {
        // Centred band: |n - round(n)| < THICKNESS / 2.
        assert_eq!(grid_line(v(0.07, 0.5)), 1.0);
        assert_eq!(grid_line(v(0.08, 0.5)), 0.0);
        assert_eq!(grid_line(v(0.5, 0.93)), 1.0);
        assert_eq!(grid_line(v(0.5, 0.92)), 0.0);
    }

    #[test]
    fn grid_is_periodic_under_integer_translation() {
        for n in lattice(3) {
            assert_eq!(grid_line(n), grid_line(n + v(1.0, 1.0)), "n={n:?}");
            assert_eq!(grid_line(n), grid_line(n + v(-2.0, 0.0)), "n={n:?}");
        }
    }

    // ── cell ──────────────────────────────────────────────────────────────

    #[test]
    fn cell_is_floor() {
        assert_eq!(cell(v(0.25, 0.75)), v(0.0, 0.0));
        assert_eq!(cell(v(-0.25, 1.5)), v(-1.0, 1.0));
        assert_eq!(cell(v(3.0, -2.0)), v(3.0, -2.0));
    }

    #[test]
    fn cell_is_deterministic() {
        let res = vp(800.0, 600.0);
        for p in [v(0.0, 0.0), v(123.4, 567.8), v(799.0, 599.0), v(400.0, 300.0)] {
            let a = cell(normalize_point(p, res, 2.5));
            let b = cell(normalize_point(p, res, 2.5));
            assert_eq!(a, b);
        }
    }

    // ── pointer_highlight ─────────────────────────────────────────────────

    #[test]
    fn highlight_zero_outside_pointer_cell() {
        // Sweep the pointer across one full cell; fragments in every neighbour see nothing.
        let neighbours = [v(1.0, 0.0), v(-1.0, 0.0), v(0.0, 1.0), v(0.0, -1.0), v(1.0, 1.0), v(-1.0, -1.0)];
        for i in 0..8 {
            for j in 0..8 {
                let mouse = v(i as f32 / 8.0, j as f32 / 8.0);
                for off in neighbours {
                    for frag in [v(0.175, 0.3), v(0.0, 0.0), v(0.9, 0.1), v(0.3, 0.3)] {
                        assert_eq!(pointer_highlight(frag + off, mouse), 0.0, "mouse={mouse:?} frag={:?}", frag + off);
                    }
                }
            }
        }
    }

    #[test]
    fn highlight_zero_inside_gap_band() {
        for i in 0..8 {
            let mouse = v(2.0 + i as f32 / 8.0, -3.0 + i as f32 / 8.0);
            for t in [0.41, 0.45, 0.5, 0.55, 0.59] {
                assert_eq!(pointer_highlight(v(2.0 + t, -3.0 + 0.1), mouse), 0.0);
                assert_eq!(pointer_highlight(v(2.1, -3.0 + t), mouse), 0.0);
            }
        }
    }

    #[test]
    fn gap_band_is_open_interval() {
        assert!(!in_gap_band(v(0.4, 0.1)));
        assert!(!in_gap_band(v(0.1, 0.6)));
        assert!(in_gap_band(v(0.45, 0.1)));
        assert!(in_gap_band(v(-0.5, 0.1)));
    }

    #[test]
    fn highlight_rim_fully_covered() {
        // d = -0.175, inside the [-0.2, -0.15] band.
        assert_eq!(pointer_highlight(v(0.175, 0.3), v(0.5, 0.5)), 1.0);
        assert_eq!(pointer_highlight(v(0.7, 0.825), v(0.9, 0.9)), 1.0);
    }

    #[test]
    fn highlight_interior_is_empty() {
        assert_eq!(pointer_highlight(v(0.3, 0.3), v(0.5, 0.5)), 0.0);
        assert_eq!(pointer_highlight(v(0.7, 0.7), v(0.1, 0.1)), 0.0);
    }

    #[test]
    fn highlight_fades_toward_cell_edge() {
        let m = v(0.5, 0.5);
        let at_rim = pointer_highlight(v(0.15, 0.3), m);
        let mid = pointer_highlight(v(0.08, 0.3), m);
        let edge = pointer_highlight(v(0.0, 0.3), m);
        assert!(at_rim > mid && mid > edge && edge > 0.0, "{at_rim} {mid} {edge}");
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn centre_pointer_highlights_centre_fragment() {
        let u = GridUniforms::new(vp(800.0, 600.0), v(400.0, 300.0), 1.0);
        let n = u.normalize(v(400.0, 300.0));
        let m = u.normalized_mouse();

        assert_eq!(m, Vec2::zero());
        assert!(same_cell(n, m));
        assert!(pointer_highlight(n, m) > 0.0);
        assert!(shade(v(400.0, 300.0), &u).g > 0.5);
    }

    #[test]
    fn opposite_corner_is_not_highlighted() {
        let u = GridUniforms::new(vp(800.0, 600.0), v(0.0, 0.0), 1.0);
        let n = u.normalize(v(799.0, 599.0));
        let m = u.normalized_mouse();

        assert!(!same_cell(n, m));
        assert_eq!(pointer_highlight(n, m), 0.0);
    }

    #[test]
    fn resize_moves_pointer_cell() {
        let pointer = v(1000.0, 300.0);
        let before = GridUniforms::new(vp(800.0, 600.0), pointer, 1.0);
        let after = GridUniforms::new(vp(1600.0, 600.0), pointer, 1.0);

        // 800x600: x = (2.5 - 1) * 4/3 = 2.0 exactly on a line; 1600x600: x = 0.25 * 8/3.
        assert!((before.normalized_mouse().x - 2.0).abs() < 1e-5);
        assert!((after.normalized_mouse().x - 2.0 / 3.0).abs() < 1e-5);
        assert_eq!(cell(after.normalized_mouse()), v(0.0, 0.0));
    }

    // ── shade ─────────────────────────────────────────────────────────────

    #[test]
    fn shade_is_opaque_black_in_empty_cell_interior() {
        let u = GridUniforms::new(vp(800.0, 600.0), v(0.0, 0.0), 1.0);
        // Normalizes to (0.5, 0.5): middle of cell (0, 0), pointer cell is (-2, -1).
        let frag = v(400.0 + 0.5 * 300.0, 300.0 + 0.5 * 300.0);
        assert_eq!(shade(frag, &u), ColorRgba::black());
    }

    #[test]
    fn shade_adds_overlapping_contributions() {
        // Fragment on a grid line inside the pointer's cell: both terms land, unclamped.
        let u = GridUniforms::new(vp(600.0, 600.0), v(450.0, 450.0), 1.0);
        let frag = v(306.0, 375.0);
        let n = u.normalize(frag);
        let h = pointer_highlight(n, u.normalized_mouse());

        assert_eq!(grid_line(n), 1.0);
        assert!(h > 0.0);

        let c = shade(frag, &u);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.5 + h);
        assert_eq!(c.b, 1.0);
        assert_eq!(c.a, 1.0);
    }
}

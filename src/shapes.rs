//! Stateless geometric rasterizers.
//!
//! These functions write straight into a [`PixelGrid`] – no local buffer,
//! no compositing, no transparency. Effects are immediate and can only be
//! undone by restoring an externally saved snapshot.
//!
//! All rasterization is column-stepping with round-half-up
//! (`floor(x + 0.5)`) row selection, done in exact integer arithmetic. One
//! pixel per column means steep [`line`]s show gaps and [`circle`]s
//! under-resolve near their top and bottom; that is the contract of these
//! primitives on a panel this coarse, not something the caller should work
//! around.
//!
//! Coordinates are `(row, col)` for every function here, corners in any
//! order; out-of-range pixels are dropped by the grid.

use crate::PixelGrid;

/// `floor(num / den + 1/2)` for `den > 0`, the round-half-up of the exact
/// quotient.
fn round_div(num: i32, den: i32) -> i32 {
    debug_assert!(den > 0);
    (2 * num + den).div_euclid(2 * den)
}

/// `floor(sqrt(v) + 1/2)` for `v >= 0`.
fn isqrt_round(v: i32) -> i32 {
    debug_assert!(v >= 0);
    let mut s = 0;
    while (s + 1) * (s + 1) <= v {
        s += 1;
    }
    // sqrt(v) >= s + 1/2  iff  v > s(s+1)
    s + i32::from(v > s * (s + 1))
}

/// Draw a line from (`i1`, `j1`) to (`i2`, `j2`).
///
/// Vertical lines are walked row by row. Everything else steps column by
/// column from the lower-column endpoint, picking one row per column from
/// the slope – so lines steeper than 45° come out dashed.
pub fn line(target: &mut impl PixelGrid, i1: i32, j1: i32, i2: i32, j2: i32, c: u32) {
    if j1 == j2 {
        for i in i1.min(i2)..=i1.max(i2) {
            target.set_grid(i, j1, c);
        }
        return;
    }
    // Order the endpoints so columns ascend
    let (a1, a2, b1, b2) = if j1 < j2 {
        (j1, j2, i1, i2)
    } else {
        (j2, j1, i2, i1)
    };
    for j in a1..=a2 {
        let i = b1 + round_div((b2 - b1) * (j - a1), a2 - a1);
        target.set_grid(i, j, c);
    }
}

/// Fill the axis-aligned rectangle spanned by the two corners, one
/// vertical line per column.
pub fn rectangle_fill(target: &mut impl PixelGrid, i1: i32, j1: i32, i2: i32, j2: i32, c: u32) {
    let (top, bottom) = (i1.min(i2), i1.max(i2));
    for j in j1.min(j2)..=j1.max(j2) {
        line(target, top, j, bottom, j, c);
    }
}

/// Draw the border of the axis-aligned rectangle spanned by the two
/// corners: four lines, no interior.
pub fn rectangle_outline(target: &mut impl PixelGrid, i1: i32, j1: i32, i2: i32, j2: i32, c: u32) {
    let (top, bottom) = (i1.min(i2), i1.max(i2));
    let (left, right) = (j1.min(j2), j1.max(j2));

    line(target, top, left, bottom, left, c);
    line(target, top, left, top, right, c);
    line(target, top, right, bottom, right, c);
    line(target, bottom, left, bottom, right, c);
}

/// Fill the disk of radius `r` centred at (`i`, `j`): one vertical line per
/// column between the two circle-boundary rows.
pub fn disk(target: &mut impl PixelGrid, i: i32, j: i32, r: i32, c: u32) {
    for k in j - r..=j + r {
        let half = isqrt_round(r * r - (k - j) * (k - j));
        line(target, i + half, k, i - half, k, c);
    }
}

/// Draw the circle of radius `r` centred at (`i`, `j`): only the two
/// boundary pixels per column, leaving the interior untouched. The
/// per-column sampling under-resolves where the boundary is near vertical,
/// so the sides of large circles show gaps.
pub fn circle(target: &mut impl PixelGrid, i: i32, j: i32, r: i32, c: u32) {
    for k in j - r..=j + r {
        let half = isqrt_round(r * r - (k - j) * (k - j));
        target.set_grid(i + half, k, c);
        target.set_grid(i - half, k, c);
    }
}

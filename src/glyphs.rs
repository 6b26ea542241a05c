//! Character drawables seeded from a fixed pattern table.
//!
//! A [`Glyph`] is an ordinary [`Drawable`] whose bounding box is populated
//! at construction from a per-character list of `(row, col)` offsets. The
//! table is sparse: only a handful of characters are defined, and an
//! undefined character yields an all-transparent drawable of the default
//! size – a known limitation of the table, not of the compositing model.
//!
//! [`compose_text`] lays out a whole string as a sequence of glyphs sharing
//! one baseline, ready to be drawn or handed to
//! [`Drawable::crawl`](crate::drawable::Drawable::crawl) for scrolling
//! text.

use heapless::Vec;

use crate::drawable::Drawable;

/// Height of every glyph bounding box, in rows.
pub const GLYPH_HEIGHT: usize = 5;

/// Width of the widest glyph bounding box, in columns.
pub const GLYPH_WIDTH_MAX: usize = 3;

/// Cell capacity needed for any glyph.
pub const GLYPH_CELLS: usize = GLYPH_HEIGHT * GLYPH_WIDTH_MAX;

/// Columns a space advances the layout cursor.
const SPACE_ADVANCE: i32 = 3;

/// A character drawable.
pub type Glyph = Drawable<GLYPH_CELLS>;

//  #      ##
// # #     # #
// ###     ##
// # #     # #
// # #     ##
const PATTERN_A: &[(u8, u8)] = &[
    (0, 1),
    (1, 0),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
    (3, 0),
    (3, 2),
    (4, 0),
    (4, 2),
];
const PATTERN_B: &[(u8, u8)] = &[
    (0, 0),
    (0, 1),
    (1, 0),
    (1, 2),
    (2, 0),
    (2, 1),
    (3, 0),
    (3, 2),
    (4, 0),
    (4, 1),
];
const PATTERN_C: &[(u8, u8)] = &[
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (2, 0),
    (3, 0),
    (4, 0),
    (4, 1),
    (4, 2),
];
const PATTERN_E: &[(u8, u8)] = &[
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (2, 0),
    (2, 1),
    (3, 0),
    (4, 0),
    (4, 1),
    (4, 2),
];
const PATTERN_H: &[(u8, u8)] = &[
    (0, 0),
    (0, 2),
    (1, 0),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
    (3, 0),
    (3, 2),
    (4, 0),
    (4, 2),
];
const PATTERN_I: &[(u8, u8)] = &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)];
const PATTERN_L: &[(u8, u8)] = &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (4, 1), (4, 2)];
const PATTERN_O: &[(u8, u8)] = &[
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 2),
    (2, 0),
    (2, 2),
    (3, 0),
    (3, 2),
    (4, 0),
    (4, 1),
    (4, 2),
];
const PATTERN_T: &[(u8, u8)] = &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1), (3, 1), (4, 1)];

fn pattern(ch: char) -> &'static [(u8, u8)] {
    match ch.to_ascii_uppercase() {
        'A' => PATTERN_A,
        'B' => PATTERN_B,
        'C' => PATTERN_C,
        'E' => PATTERN_E,
        'H' => PATTERN_H,
        'I' | '1' => PATTERN_I,
        'L' => PATTERN_L,
        'O' | '0' => PATTERN_O,
        'T' => PATTERN_T,
        _ => &[],
    }
}

/// Bounding box width for a character, in columns.
///
/// Narrow characters (`I`, `1`) take a single column, everything else the
/// full [`GLYPH_WIDTH_MAX`].
#[must_use]
pub fn glyph_width(ch: char) -> usize {
    match ch.to_ascii_uppercase() {
        'I' | '1' => 1,
        _ => GLYPH_WIDTH_MAX,
    }
}

/// Build the drawable for one character, anchored at (`base_row`,
/// `base_col`), with every marked cell set to `color`.
///
/// Characters missing from the pattern table produce an all-transparent
/// drawable: it occupies layout space but draws nothing.
#[must_use]
pub fn glyph(ch: char, base_row: i32, base_col: i32, color: u32) -> Glyph {
    let mut g = Glyph::new(base_row, base_col, glyph_width(ch), GLYPH_HEIGHT);
    for &(row, col) in pattern(ch) {
        g.set_local_pixel(row as usize, col as usize, color);
    }
    g
}

/// Lay out a string as a sequence of glyphs on one baseline.
///
/// Each glyph advances the cursor by its width plus one column of spacing;
/// a space advances by three columns without producing a glyph. Input
/// beyond the `MAX` capacity is silently dropped, over-length strings are
/// not an error.
#[must_use]
pub fn compose_text<const MAX: usize>(
    text: &str,
    base_row: i32,
    base_col: i32,
    color: u32,
) -> Vec<Glyph, MAX> {
    let mut glyphs = Vec::new();
    let mut offset = 0;
    for ch in text.chars() {
        if ch == ' ' {
            offset += SPACE_ADVANCE;
            continue;
        }
        if glyphs.push(glyph(ch, base_row, base_col + offset, color)).is_err() {
            break;
        }
        offset += glyph_width(ch) as i32 + 1;
    }
    glyphs
}

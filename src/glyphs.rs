//! Hand-drawn outlines for the wordmark. Each glyph is one unit high with its
//! origin at the lower-left corner. Horizontal placement comes from the
//! `advance` column, not from the outline: edit both together.

/// One letter of the wordmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub letter: char,
    /// Closed polygon, listed once (no repeated closing point).
    pub outline: &'static [[f32; 2]],
    /// X position of the glyph origin before letter spacing is added.
    pub advance: f32,
}

const L: &[[f32; 2]] = &[
    [0.0, 0.0],
    [0.0, 1.0],
    [0.2, 1.0],
    [0.2, 0.2],
    [0.7, 0.2],
    [0.7, 0.0],
];

const Y: &[[f32; 2]] = &[
    [0.0, 1.0],
    [0.2, 1.0],
    [0.4, 0.5],
    [0.6, 1.0],
    [0.8, 1.0],
    [0.5, 0.3],
    [0.5, 0.0],
    [0.3, 0.0],
    [0.3, 0.3],
];

const N: &[[f32; 2]] = &[
    [0.0, 0.0],
    [0.0, 1.0],
    [0.2, 1.0],
    [0.2, 0.3],
    [0.6, 1.0],
    [0.8, 1.0],
    [0.8, 0.0],
    [0.6, 0.0],
    [0.6, 0.7],
    [0.2, 0.0],
];

const X: &[[f32; 2]] = &[
    [0.0, 1.0],
    [0.2, 1.0],
    [0.4, 0.6],
    [0.6, 1.0],
    [0.8, 1.0],
    [0.5, 0.5],
    [0.8, 0.0],
    [0.6, 0.0],
    [0.4, 0.4],
    [0.2, 0.0],
    [0.0, 0.0],
    [0.3, 0.5],
];

/// "LYNXX", left to right.
pub const WORDMARK: [Glyph; 5] = [
    Glyph { letter: 'L', outline: L, advance: 0.0 },
    Glyph { letter: 'Y', outline: Y, advance: 0.8 },
    Glyph { letter: 'N', outline: N, advance: 1.7 },
    Glyph { letter: 'X', outline: X, advance: 2.6 },
    Glyph { letter: 'X', outline: X, advance: 3.5 },
];

impl Glyph {
    /// Horizontal origin of the glyph at position `index` in the word.
    pub fn offset(&self, index: usize, letter_spacing: f32) -> f32 {
        self.advance + letter_spacing * index as f32
    }

    /// `(min_x, max_x)` of the outline.
    pub fn extent(&self) -> (f32, f32) {
        self.outline
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[0]), hi.max(p[0]))
            })
    }
}

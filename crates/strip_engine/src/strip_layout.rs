//! Character strip geometry.
//!
//! A strip stacks one fixed-height glyph bitmap per code point. The glyph
//! height is derived from the strip height and never stored in the file,
//! so it is recomputed whenever a buffer is (re)loaded.

use std::ops::Range;

/// Strip heights of the known game font files and their glyph heights.
const CHAR_HEIGHT_TABLE: &[(i32, i32)] = &[
    (2048, 8),  // 256 chars * 8
    (2259, 9),  // 251 chars * 9
    (3390, 15), // 226 chars * 15
    (3584, 14), // 256 chars * 14
];

/// Derives the glyph height for a strip of the given total height.
///
/// Known heights come from the lookup table; anything else assumes an
/// extended-ASCII strip of 256 glyphs, clamped to a minimum height of 1.
pub fn detect_char_height(strip_height: i32) -> i32 {
    for &(height, char_height) in CHAR_HEIGHT_TABLE {
        if height == strip_height {
            return char_height;
        }
    }
    (strip_height / 256).max(1)
}

/// Glyph slicing for one strip; a derived value, cheap to recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripLayout {
    strip_height: i32,
    char_height: i32,
}

impl StripLayout {
    pub fn detect(strip_height: i32) -> Self {
        Self {
            strip_height,
            char_height: detect_char_height(strip_height),
        }
    }

    /// Overrides the detected glyph height; heights below 1 are clamped.
    pub fn with_char_height(strip_height: i32, char_height: i32) -> Self {
        Self {
            strip_height,
            char_height: char_height.max(1),
        }
    }

    pub fn char_height(&self) -> i32 {
        self.char_height
    }

    pub fn num_characters(&self) -> i32 {
        self.strip_height / self.char_height
    }

    /// The rows occupied by glyph `index`, or `None` when the index is out
    /// of range. Out-of-range requests are not errors; callers bound them
    /// with the same computation.
    pub fn row_range(&self, index: i32) -> Option<Range<i32>> {
        if index < 0 || index >= self.num_characters() {
            return None;
        }
        Some(index * self.char_height..(index + 1) * self.char_height)
    }

    pub fn first_row(&self, index: i32) -> Option<i32> {
        self.row_range(index).map(|range| range.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_heights() {
        assert_eq!(8, detect_char_height(2048));
        assert_eq!(9, detect_char_height(2259));
        assert_eq!(15, detect_char_height(3390));
        assert_eq!(14, detect_char_height(3584));
    }

    #[test]
    fn test_fallback_divides_by_256() {
        assert_eq!(4, detect_char_height(1024));
        assert_eq!(3, detect_char_height(1000)); // floor
    }

    #[test]
    fn test_fallback_clamps_to_one() {
        assert_eq!(1, detect_char_height(24));
        assert_eq!(1, detect_char_height(0));
    }

    #[test]
    fn test_row_ranges() {
        let layout = StripLayout::detect(2048);
        assert_eq!(256, layout.num_characters());
        assert_eq!(Some(0..8), layout.row_range(0));
        assert_eq!(Some(2040..2048), layout.row_range(255));
        assert_eq!(None, layout.row_range(256));
        assert_eq!(None, layout.row_range(-1));
    }

    #[test]
    fn test_override_clamps() {
        let layout = StripLayout::with_char_height(24, 0);
        assert_eq!(1, layout.char_height());
        let layout = StripLayout::with_char_height(24, 8);
        assert_eq!(3, layout.num_characters());
        assert_eq!(Some(16..24), layout.row_range(2));
    }
}

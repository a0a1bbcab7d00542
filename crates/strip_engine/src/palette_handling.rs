use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{Color: r={:02X}, g={:02X}, b={:02X}}}", self.r, self.g, self.b)
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn get_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl Eq for Color {}

impl std::hash::Hash for Color {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color {
            r: value.0,
            g: value.1,
            b: value.2,
        }
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(value: Color) -> (u8, u8, u8) {
        (value.r, value.g, value.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(value: [u8; 3]) -> Self {
        Color {
            r: value[0],
            g: value[1],
            b: value[2],
        }
    }
}

impl From<Color> for [u8; 3] {
    fn from(value: Color) -> [u8; 3] {
        [value.r, value.g, value.b]
    }
}

/// An ordered, index-addressed color table.
///
/// Loaded from a strip file and written back verbatim on save. Between a
/// load and the next load the table never changes, which is what keeps the
/// palette byte-identical across an edit cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub const MAX_COLORS: usize = 256;

    /// # Errors
    ///
    /// Returns an error if the slice holds more than 256 colors.
    pub fn from_slice(colors: &[Color]) -> Result<Self> {
        if colors.len() > Self::MAX_COLORS {
            return Err(EngineError::InvalidPalette {
                message: format!("{} colors, max is {}", colors.len(), Self::MAX_COLORS),
            });
        }
        Ok(Self { colors: colors.to_vec() })
    }

    /// Builds a palette from a flat sequence of RGB triplets, as stored in
    /// a PNG `PLTE` chunk.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is not a multiple of 3 or the table
    /// exceeds 256 entries.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 3 != 0 {
            return Err(EngineError::InvalidPalette {
                message: format!("length {} is not a multiple of 3", bytes.len()),
            });
        }
        if bytes.len() / 3 > Self::MAX_COLORS {
            return Err(EngineError::InvalidPalette {
                message: format!("{} entries, max is {}", bytes.len() / 3, Self::MAX_COLORS),
            });
        }
        let colors = bytes.chunks_exact(3).map(|c| Color::new(c[0], c[1], c[2])).collect();
        Ok(Self { colors })
    }

    /// The exact triplet table this palette was loaded with.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.colors.len() * 3);
        for color in &self.colors {
            result.push(color.r);
            result.push(color.g);
            result.push(color.b);
        }
        result
    }

    /// A 256-entry gray ramp, used when converting grayscale sources to
    /// indexed form.
    pub fn grayscale_ramp() -> Self {
        let colors = (0..=255).map(|v| Color::new(v, v, v)).collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get_color(&self, index: u8) -> Color {
        if index as usize >= self.colors.len() {
            return Color::new(0, 0, 0);
        }
        self.colors[index as usize]
    }

    pub fn get_rgb(&self, index: u8) -> (u8, u8, u8) {
        self.get_color(index).get_rgb()
    }

    pub fn color_iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    pub fn are_colors_equal(&self, other: &Palette) -> bool {
        self.colors == other.colors
    }
}

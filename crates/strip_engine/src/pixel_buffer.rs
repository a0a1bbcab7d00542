use crate::{EngineError, Rectangle, Result, Size};

/// A width x height grid of palette indices, row-major, top-down.
///
/// Out-of-bounds access is rejected with a range error, never clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    data: Vec<u8>,
}

impl Default for PixelBuffer {
    fn default() -> Self {
        PixelBuffer::new((0, 0))
    }
}

impl PixelBuffer {
    pub fn new(size: impl Into<Size>) -> Self {
        let size = size.into();
        Self {
            size,
            data: vec![0; size.area()],
        }
    }

    /// # Errors
    ///
    /// Returns an error if `data` does not hold exactly `width * height` indices.
    pub fn from_data(size: impl Into<Size>, data: Vec<u8>) -> Result<Self> {
        let size = size.into();
        if data.len() != size.area() {
            return Err(EngineError::BufferLengthMismatch {
                expected: size.area(),
                actual: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    pub fn get_width(&self) -> i32 {
        self.size.width
    }

    pub fn get_height(&self) -> i32 {
        self.size.height
    }

    pub fn get_size(&self) -> Size {
        self.size
    }

    pub fn get_rectangle(&self) -> Rectangle {
        Rectangle::from_min_size((0, 0), self.size)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.size.width && y < self.size.height
    }

    /// # Errors
    ///
    /// Returns `CoordOutOfRange` if (x, y) lies outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Result<u8> {
        if !self.is_inside(x, y) {
            return Err(self.range_error(x, y));
        }
        Ok(self.data[(y * self.size.width + x) as usize])
    }

    /// Reads a pixel, substituting `fallback` for out-of-bounds coordinates.
    pub fn get_or(&self, x: i32, y: i32, fallback: u8) -> u8 {
        if !self.is_inside(x, y) {
            return fallback;
        }
        self.data[(y * self.size.width + x) as usize]
    }

    /// # Errors
    ///
    /// Returns `CoordOutOfRange` if (x, y) lies outside the buffer. The
    /// index is not validated here; the palette bound lives on
    /// [`crate::editor::EditState::set_pixel`].
    pub fn set(&mut self, x: i32, y: i32, index: u8) -> Result<()> {
        if !self.is_inside(x, y) {
            return Err(self.range_error(x, y));
        }
        self.data[(y * self.size.width + x) as usize] = index;
        Ok(())
    }

    fn range_error(&self, x: i32, y: i32) -> EngineError {
        EngineError::CoordOutOfRange {
            x,
            y,
            width: self.size.width,
            height: self.size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut buffer = PixelBuffer::new((4, 3));
        buffer.set(3, 2, 7).unwrap();
        assert_eq!(7, buffer.get(3, 2).unwrap());
        assert_eq!(0, buffer.get(0, 0).unwrap());
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut buffer = PixelBuffer::new((4, 3));
        assert!(buffer.get(4, 0).is_err());
        assert!(buffer.get(0, 3).is_err());
        assert!(buffer.get(-1, 0).is_err());
        assert!(buffer.set(0, -1, 1).is_err());
    }

    #[test]
    fn test_get_or_pads() {
        let buffer = PixelBuffer::new((2, 2));
        assert_eq!(9, buffer.get_or(5, 5, 9));
        assert_eq!(0, buffer.get_or(1, 1, 9));
    }

    #[test]
    fn test_from_data_length_check() {
        assert!(PixelBuffer::from_data((2, 2), vec![0; 3]).is_err());
        assert!(PixelBuffer::from_data((2, 2), vec![0; 4]).is_ok());
    }
}

use crate::{EngineError, Result};

use super::EditState;

impl EditState {
    /// Writes a single palette index into the buffer.
    ///
    /// This is where the palette bound is enforced: an index at or past
    /// the palette length is rejected, never clamped and never written.
    /// Callers starting a draw stroke push `save_state("Draw")` first;
    /// individual pixel writes do not snapshot on their own.
    ///
    /// # Errors
    ///
    /// `CoordOutOfRange` for coordinates outside the buffer,
    /// `IndexOutsidePalette` for indices the palette cannot resolve.
    pub fn set_pixel(&mut self, x: i32, y: i32, index: u8) -> Result<()> {
        if index as usize >= self.palette.len() {
            return Err(EngineError::IndexOutsidePalette {
                index,
                palette_len: self.palette.len(),
            });
        }
        self.buffer.set(x, y, index)
    }

    /// # Errors
    ///
    /// `CoordOutOfRange` for coordinates outside the buffer.
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<u8> {
        self.buffer.get(x, y)
    }
}

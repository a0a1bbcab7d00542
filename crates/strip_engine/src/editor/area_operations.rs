use crate::{EngineError, Result, Size};

use super::EditState;

/// A deep-copied rectangular block of palette indices, row-major.
///
/// Lives independently of the buffer it was sampled from: mutating or even
/// replacing the buffer leaves the payload intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    size: Size,
    data: Vec<u8>,
}

impl ClipboardPayload {
    pub fn get_width(&self) -> i32 {
        self.size.width
    }

    pub fn get_height(&self) -> i32 {
        self.size.height
    }

    pub fn get_size(&self) -> Size {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(super) fn get(&self, dx: i32, dy: i32) -> u8 {
        self.data[(dy * self.size.width + dx) as usize]
    }
}

impl EditState {
    /// Copies the selected rectangle into the clipboard.
    ///
    /// Sampling runs row-major over the normalized rectangle, both corners
    /// inclusive. Coordinates outside the canvas are not an error here:
    /// those cells read as index 0, so a selection dragged past the edge
    /// yields a zero-padded payload of the full selected size. The
    /// selection is consumed.
    ///
    /// # Errors
    ///
    /// Returns `NoSelection` when no selection is active.
    pub fn copy(&mut self) -> Result<Size> {
        let Some(selection) = self.selection_opt else {
            return Err(EngineError::NoSelection);
        };
        let min = selection.min();
        let max = selection.max();
        let size = selection.size();

        let mut data = Vec::with_capacity(size.area());
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                data.push(self.buffer.get_or(x, y, 0));
            }
        }

        self.clipboard = Some(ClipboardPayload { size, data });
        self.selection_opt = None;
        Ok(size)
    }

    pub fn clipboard(&self) -> Option<&ClipboardPayload> {
        self.clipboard.as_ref()
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }
}

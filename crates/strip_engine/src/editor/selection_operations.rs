use crate::{EngineError, Position, Result, Selection};

use super::EditState;

impl EditState {
    /// Starts a rectangle at a point.
    ///
    /// # Errors
    ///
    /// Returns `PasteSessionActive` while a paste overlay exists; exactly
    /// one of drawing, selecting and paste-dragging may be live at a time.
    pub fn begin_selection(&mut self, x: i32, y: i32) -> Result<()> {
        if self.paste_session.is_some() {
            return Err(EngineError::PasteSessionActive);
        }
        self.selection_opt = Some(Selection::new((x, y)));
        Ok(())
    }

    /// Moves the lead corner. Does nothing without a live (unlocked)
    /// selection; the rectangle stays unnormalized until read.
    pub fn update_selection(&mut self, x: i32, y: i32) {
        if let Some(selection) = &mut self.selection_opt {
            if !selection.locked {
                selection.lead = Position::new(x, y);
            }
        }
    }

    /// Freezes the rectangle. It persists until cleared or consumed by
    /// `copy`.
    pub fn end_selection(&mut self) {
        if let Some(selection) = &mut self.selection_opt {
            selection.locked = true;
        }
    }

    /// Idempotent.
    pub fn clear_selection(&mut self) {
        self.selection_opt = None;
    }

    pub fn get_selection(&self) -> Option<Selection> {
        self.selection_opt
    }

    pub fn is_something_selected(&self) -> bool {
        self.selection_opt.is_some()
    }
}

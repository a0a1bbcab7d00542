use crate::{EngineError, Position, Result};

use super::EditState;

/// A floating paste overlay: the clipboard payload hovering over the
/// buffer at some offset, not yet written.
///
/// The payload itself stays in the clipboard; the session only tracks
/// where it currently hovers. Offsets may be negative or point past the
/// canvas; clipping happens at commit, per cell.
#[derive(Debug, Clone, Copy)]
pub struct PasteSession {
    offset: Position,
}

impl PasteSession {
    pub fn get_offset(&self) -> Position {
        self.offset
    }
}

impl EditState {
    /// Starts a paste session with the overlay anchored at the origin.
    ///
    /// An already-running session is silently replaced; the overlay just
    /// snaps back to (0, 0). Any selection is dropped: at most one of
    /// selecting and paste-dragging is live at a time, from either side.
    ///
    /// # Errors
    ///
    /// Returns `EmptyClipboard` when nothing has been copied yet.
    pub fn begin_paste(&mut self) -> Result<()> {
        if self.clipboard.is_none() {
            return Err(EngineError::EmptyClipboard);
        }
        self.selection_opt = None;
        self.paste_session = Some(PasteSession { offset: Position::default() });
        Ok(())
    }

    /// Moves the overlay. No clamping: the offset is free to leave the
    /// canvas entirely, commit clips instead.
    pub fn move_paste(&mut self, x: i32, y: i32) {
        if let Some(session) = &mut self.paste_session {
            session.offset = Position::new(x, y);
        }
    }

    /// Writes the overlay into the buffer and ends the session.
    ///
    /// Snapshots as "Paste" before any cell is written. Destination cells
    /// outside the buffer are skipped one by one, so a partially
    /// overhanging overlay commits its visible part. A commit that lands
    /// entirely off-canvas still costs a snapshot.
    ///
    /// Returns `Ok(false)` when no session is running.
    ///
    /// # Errors
    ///
    /// None beyond the `Result` plumbing of the buffer writes; every write
    /// is bounds-checked before it happens.
    pub fn commit_paste(&mut self) -> Result<bool> {
        let Some(session) = self.paste_session.take() else {
            return Ok(false);
        };
        // begin_paste guarantees the clipboard is set while a session runs.
        let Some(payload) = self.clipboard.clone() else {
            return Ok(false);
        };

        self.save_state("Paste");
        let offset = session.get_offset();
        for dy in 0..payload.get_height() {
            for dx in 0..payload.get_width() {
                let x = offset.x + dx;
                let y = offset.y + dy;
                if self.buffer.is_inside(x, y) {
                    self.buffer.set(x, y, payload.get(dx, dy))?;
                }
            }
        }
        Ok(true)
    }

    /// Discards the overlay without touching the buffer. Idempotent.
    pub fn cancel_paste(&mut self) {
        self.paste_session = None;
    }

    pub fn paste_session(&self) -> Option<&PasteSession> {
        self.paste_session.as_ref()
    }

    pub fn is_paste_active(&self) -> bool {
        self.paste_session.is_some()
    }
}

use crate::{EngineError, PixelBuffer, Result, Size};

use super::EditState;

/// A full copy of the buffer contents, taken before a mutation.
///
/// Whole-buffer snapshots instead of diffs: glyph strips are small, so the
/// memory cost buys a much simpler stack contract.
#[derive(Debug, Clone)]
pub struct Snapshot {
    data: Vec<u8>,
    size: Size,
    label: String,
}

impl Snapshot {
    fn of(buffer: &PixelBuffer, label: impl Into<String>) -> Self {
        Self {
            data: buffer.data().to_vec(),
            size: buffer.get_size(),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

pub trait UndoState {
    fn undo_description(&self) -> Option<String>;
    fn can_undo(&self) -> bool;

    /// Restores the most recent snapshot.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotSizeMismatch` when the snapshot dimensions differ
    /// from the current buffer. The mismatching entry is consumed either
    /// way and the buffer is left untouched; the failure is not retryable.
    fn undo(&mut self) -> Result<bool>;

    fn redo_description(&self) -> Option<String>;
    fn can_redo(&self) -> bool;

    /// Reapplies the most recently undone state; same contract as
    /// [`UndoState::undo`].
    ///
    /// # Errors
    ///
    /// See [`UndoState::undo`].
    fn redo(&mut self) -> Result<bool>;
}

impl EditState {
    /// Pushes a snapshot of the current buffer onto the undo stack.
    ///
    /// Must be called *before* the mutation it protects. Snapshots are
    /// explicit; nothing in the engine tracks dirtiness for you. Past
    /// `max_history` entries the oldest snapshot is evicted, and any
    /// pending redo entries are dropped.
    pub fn save_state(&mut self, label: impl Into<String>) {
        self.undo_stack.push(Snapshot::of(&self.buffer, label));
        if self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    pub fn undo_stack_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_stack_len(&self) -> usize {
        self.redo_stack.len()
    }

    fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        if snapshot.size != self.buffer.get_size() {
            log::warn!(
                "dropping snapshot '{}': size {} does not match buffer {}",
                snapshot.label,
                snapshot.size,
                self.buffer.get_size()
            );
            return Err(EngineError::SnapshotSizeMismatch {
                snapshot: snapshot.size,
                buffer: self.buffer.get_size(),
            });
        }
        self.buffer = PixelBuffer::from_data(snapshot.size, snapshot.data)?;
        Ok(())
    }
}

impl UndoState for EditState {
    fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|snapshot| snapshot.label().to_string())
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn undo(&mut self) -> Result<bool> {
        let Some(snapshot) = self.undo_stack.pop() else {
            return Ok(false);
        };
        // The pre-undo state goes onto the redo stack before the size
        // check; on mismatch it stays there while the popped entry is lost.
        self.redo_stack.push(Snapshot::of(&self.buffer, "Current"));
        self.restore(snapshot)?;
        Ok(true)
    }

    fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|snapshot| snapshot.label().to_string())
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn redo(&mut self) -> Result<bool> {
        let Some(snapshot) = self.redo_stack.pop() else {
            return Ok(false);
        };
        // Direct push: redo must not evict history or clear itself.
        self.undo_stack.push(Snapshot::of(&self.buffer, "Current"));
        self.restore(snapshot)?;
        Ok(true)
    }
}

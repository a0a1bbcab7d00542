//! The editing session.
//!
//! [`EditState`] is the one owned aggregate holding the buffer, palette,
//! selection, clipboard, paste session and history. Every operation takes
//! it by exclusive reference; there are no globals and no locks. The model
//! is strictly single-threaded and synchronous: each operation runs to
//! completion before the next is accepted.

pub mod undo_stack;
pub use undo_stack::*;

mod edit_operations;

mod selection_operations;

mod area_operations;
pub use area_operations::*;

mod paste_operations;
pub use paste_operations::*;

use std::path::{Path, PathBuf};

use crate::{EngineError, Palette, PixelBuffer, Result, Selection, StripDocument, StripLayout, load_strip_file, save_strip_file};

pub const DEFAULT_MAX_HISTORY: usize = 50;

pub struct EditState {
    buffer: PixelBuffer,
    palette: Palette,
    file_name: Option<PathBuf>,

    selection_opt: Option<Selection>,
    clipboard: Option<ClipboardPayload>,
    paste_session: Option<PasteSession>,

    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_history: usize,

    char_height_override: Option<i32>,
}

impl Default for EditState {
    fn default() -> Self {
        Self {
            buffer: PixelBuffer::default(),
            palette: Palette::default(),
            file_name: None,
            selection_opt: None,
            clipboard: None,
            paste_session: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history: DEFAULT_MAX_HISTORY,
            char_height_override: None,
        }
    }
}

impl EditState {
    pub fn from_document(document: StripDocument) -> Self {
        Self {
            buffer: document.buffer,
            palette: document.palette,
            ..Default::default()
        }
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history.max(1);
        self
    }

    pub fn get_buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn get_palette(&self) -> &Palette {
        &self.palette
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Loads a new strip, discarding the whole session state: buffer,
    /// palette, selection, clipboard, paste session and both history
    /// stacks. History never survives a load.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded; the session
    /// is left untouched in that case.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let document = load_strip_file(path)?;
        log::debug!(
            "loaded strip {} ({}x{}, {} palette entries)",
            path.display(),
            document.buffer.get_width(),
            document.buffer.get_height(),
            document.palette.len()
        );
        self.buffer = document.buffer;
        self.palette = document.palette;
        self.file_name = Some(path.to_path_buf());
        self.selection_opt = None;
        self.clipboard = None;
        self.paste_session = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
        Ok(())
    }

    /// Writes the buffer with the exact palette it was loaded with.
    ///
    /// # Errors
    ///
    /// Returns an error on encoder or write failure.
    pub fn save_file(&self, path: &Path) -> Result<()> {
        save_strip_file(path, &self.buffer, &self.palette)
    }

    /// Saves back to the file the strip was loaded from.
    ///
    /// # Errors
    ///
    /// Returns `NoFileName` if nothing has been loaded from a path yet.
    pub fn save(&self) -> Result<()> {
        match &self.file_name {
            Some(path) => save_strip_file(path, &self.buffer, &self.palette),
            None => Err(EngineError::NoFileName),
        }
    }

    /// Swaps in a new buffer without touching history or palette. This is
    /// the structural-replacement hook a front end uses when resizing the
    /// canvas; snapshots taken before the swap no longer match and will
    /// fail to restore.
    pub fn replace_buffer(&mut self, buffer: PixelBuffer) {
        self.buffer = buffer;
    }

    /// Glyph height: the explicit override when one was set, otherwise
    /// detected from the buffer height.
    pub fn char_height(&self) -> i32 {
        match self.char_height_override {
            Some(char_height) => char_height,
            None => crate::detect_char_height(self.buffer.get_height()),
        }
    }

    pub fn set_char_height(&mut self, char_height: i32) {
        self.char_height_override = Some(char_height.max(1));
    }

    pub fn strip_layout(&self) -> StripLayout {
        StripLayout::with_char_height(self.buffer.get_height(), self.char_height())
    }

    /// First row of glyph `index`, for scrolling. Out-of-range indices are
    /// a silent no-op (`None`), not an error.
    pub fn jump_to(&self, index: i32) -> Option<i32> {
        self.strip_layout().first_row(index)
    }
}

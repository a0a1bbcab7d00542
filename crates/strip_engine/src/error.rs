//! Unified error types for strip_engine

use std::path::PathBuf;
use thiserror::Error;

use crate::Size;

/// Main error type for strip_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open file '{path}': {message}")]
    OpenFile { path: PathBuf, message: String },

    // === Loading Errors ===
    #[error("File too short to be valid")]
    FileTooShort,

    #[error("Invalid file ID or magic number mismatch")]
    IdMismatch,

    #[error("Unsupported format: {description}")]
    UnsupportedFormat { description: String },

    #[error("Invalid BMP data: {message}")]
    InvalidBmp { message: String },

    #[error("Source exceeds 256 distinct colors, cannot build an indexed palette")]
    TooManyColors,

    // === Saving Errors ===
    #[error("Cannot save with an empty palette")]
    EmptyPalette,

    #[error("Cannot save an empty buffer")]
    EmptyBuffer,

    #[error("No file name set for the current strip")]
    NoFileName,

    // === Palette Errors ===
    #[error("Invalid palette data: {message}")]
    InvalidPalette { message: String },

    #[error("Pixel index {index} outside palette (palette has {palette_len} entries)")]
    IndexOutsidePalette { index: u8, palette_len: usize },

    // === Range Errors ===
    #[error("Coordinate ({x}, {y}) outside buffer bounds {width}x{height}")]
    CoordOutOfRange { x: i32, y: i32, width: i32, height: i32 },

    #[error("Buffer data length mismatch: expected {expected}, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    // === State Errors ===
    #[error("No active selection")]
    NoSelection,

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("Operation not allowed while a paste session is active")]
    PasteSessionActive,

    // === History Errors ===
    #[error("Snapshot size {snapshot} does not match buffer size {buffer}")]
    SnapshotSizeMismatch { snapshot: Size, buffer: Size },

    // === External Errors ===
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for strip_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }

    pub fn unsupported(description: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            description: description.into(),
        }
    }

    pub fn invalid_bmp(msg: impl Into<String>) -> Self {
        Self::InvalidBmp { message: msg.into() }
    }

    /// Create an open file error
    pub fn open_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::OpenFile {
            path: path.into(),
            message: msg.into(),
        }
    }
}

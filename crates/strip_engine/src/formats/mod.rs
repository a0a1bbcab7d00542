//! Strip file codecs.
//!
//! The codec layer is the sole authority on palette preservation: saving
//! always writes the palette the document was loaded with, byte for byte,
//! and never a recomputed or optimized one. Edits that would need a color
//! absent from the palette have to be rejected before they get here.

mod bmp;
pub use bmp::*;

mod png_format;
pub use png_format::*;

use std::{fs, path::Path};

use crate::{EngineError, Palette, PixelBuffer, Result};

/// A decoded strip together with the palette it must be written back with.
#[derive(Debug, Clone, PartialEq)]
pub struct StripDocument {
    pub buffer: PixelBuffer,
    pub palette: Palette,
}

impl StripDocument {
    pub fn new(buffer: PixelBuffer, palette: Palette) -> Self {
        Self { buffer, palette }
    }

    /// Checks the core invariant: every stored index addresses a palette
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutsidePalette` for the first violating pixel.
    pub fn validate_indices(&self) -> Result<()> {
        let palette_len = self.palette.len();
        for &index in self.buffer.data() {
            if index as usize >= palette_len {
                return Err(EngineError::IndexOutsidePalette { index, palette_len });
            }
        }
        Ok(())
    }
}

pub trait OutputFormat: Send + Sync {
    fn get_file_extension(&self) -> &str;

    fn get_name(&self) -> &str;

    /// Encodes the buffer with the exact stored palette.
    ///
    /// # Errors
    ///
    /// Returns an error for empty buffers/palettes or encoder failures.
    fn to_bytes(&self, buffer: &PixelBuffer, palette: &Palette) -> Result<Vec<u8>>;

    /// Decodes a strip, converting non-indexed sources to indexed form.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not a recognized indexed raster and
    /// cannot be converted to one.
    fn load_strip(&self, data: &[u8]) -> Result<StripDocument>;
}

/// File formats the engine can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// 8-bit uncompressed Windows bitmap (.bmp)
    Bmp,
    /// Indexed PNG (.png); truecolor/grayscale sources are converted
    Png,
}

impl FileFormat {
    pub const ALL: &'static [FileFormat] = &[FileFormat::Bmp, FileFormat::Png];

    pub fn codec(&self) -> &'static dyn OutputFormat {
        match self {
            FileFormat::Bmp => &BmpFormat {},
            FileFormat::Png => &PngFormat {},
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Bmp => "bmp",
            FileFormat::Png => "png",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Bmp => "Windows Bitmap",
            FileFormat::Png => "PNG Image",
        }
    }

    pub fn from_extension(ext: &str) -> Option<FileFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Some(FileFormat::Bmp),
            "png" => Some(FileFormat::Png),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<FileFormat> {
        path.extension().and_then(|ext| ext.to_str()).and_then(FileFormat::from_extension)
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn format_for_path(path: &Path) -> Result<FileFormat> {
    FileFormat::from_path(path).ok_or_else(|| EngineError::unsupported(path.display().to_string()))
}

/// Loads a strip file, detecting the format from the extension.
///
/// # Errors
///
/// Returns an error for unknown extensions, unreadable files and
/// unsupported or corrupt raster data.
pub fn load_strip_file(path: &Path) -> Result<StripDocument> {
    let format = format_for_path(path)?;
    let data = fs::read(path).map_err(|err| EngineError::open_file(path, err.to_string()))?;
    format.codec().load_strip(&data)
}

/// Saves a strip file, detecting the format from the extension.
///
/// # Errors
///
/// Returns an error for unknown extensions, encoder failures and write
/// failures.
pub fn save_strip_file(path: &Path, buffer: &PixelBuffer, palette: &Palette) -> Result<()> {
    let format = format_for_path(path)?;
    let bytes = format.codec().to_bytes(buffer, palette)?;
    fs::write(path, bytes)?;
    Ok(())
}

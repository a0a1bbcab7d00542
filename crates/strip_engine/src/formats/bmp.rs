use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::{OutputFormat, StripDocument};
use crate::{Color, EngineError, Palette, PixelBuffer, Result};

// https://learn.microsoft.com/en-us/windows/win32/gdi/bitmap-storage
// Only 8-bit uncompressed (BI_RGB) bitmaps carry the palette table this
// engine has to preserve; everything else is rejected.

const BMP_MAGIC: &[u8] = b"BM";
const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const BI_RGB: u32 = 0;

#[derive(Default)]
pub struct BmpFormat {}

impl OutputFormat for BmpFormat {
    fn get_file_extension(&self) -> &str {
        "bmp"
    }

    fn get_name(&self) -> &str {
        "Windows Bitmap"
    }

    fn to_bytes(&self, buffer: &PixelBuffer, palette: &Palette) -> Result<Vec<u8>> {
        if palette.is_empty() {
            return Err(EngineError::EmptyPalette);
        }
        if buffer.get_width() <= 0 || buffer.get_height() <= 0 {
            return Err(EngineError::EmptyBuffer);
        }
        let width = buffer.get_width() as u32;
        let height = buffer.get_height() as u32;
        let entries = palette.len() as u32;
        let stride = (width + 3) & !3;
        let pixel_bytes = stride * height;
        let data_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + entries * 4;

        let mut result = Vec::with_capacity((data_offset + pixel_bytes) as usize);
        result.extend(BMP_MAGIC);
        result.write_u32::<LittleEndian>(data_offset + pixel_bytes)?;
        result.write_u32::<LittleEndian>(0)?; // reserved
        result.write_u32::<LittleEndian>(data_offset)?;

        result.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
        result.write_i32::<LittleEndian>(width as i32)?;
        result.write_i32::<LittleEndian>(height as i32)?; // positive: bottom-up
        result.write_u16::<LittleEndian>(1)?; // planes
        result.write_u16::<LittleEndian>(8)?; // bits per pixel
        result.write_u32::<LittleEndian>(BI_RGB)?;
        result.write_u32::<LittleEndian>(pixel_bytes)?;
        result.write_i32::<LittleEndian>(0)?; // x pixels per meter
        result.write_i32::<LittleEndian>(0)?; // y pixels per meter
        result.write_u32::<LittleEndian>(entries)?;
        result.write_u32::<LittleEndian>(0)?; // important colors

        // The stored table goes out verbatim, unused entries included.
        for color in palette.color_iter() {
            let (r, g, b) = color.get_rgb();
            result.push(b);
            result.push(g);
            result.push(r);
            result.push(0);
        }

        let data = buffer.data();
        let width = width as usize;
        for y in (0..height as usize).rev() {
            result.extend_from_slice(&data[y * width..(y + 1) * width]);
            for _ in width..stride as usize {
                result.push(0);
            }
        }
        Ok(result)
    }

    fn load_strip(&self, data: &[u8]) -> Result<StripDocument> {
        if data.len() < (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as usize {
            return Err(EngineError::FileTooShort);
        }
        if &data[0..2] != BMP_MAGIC {
            return Err(EngineError::IdMismatch);
        }

        let mut cursor = Cursor::new(data);
        cursor.set_position(10);
        let data_offset = cursor.read_u32::<LittleEndian>()? as usize;
        let header_size = cursor.read_u32::<LittleEndian>()?;
        if header_size < INFO_HEADER_SIZE {
            return Err(EngineError::invalid_bmp(format!("header size {header_size} too small")));
        }
        let width = cursor.read_i32::<LittleEndian>()?;
        let height = cursor.read_i32::<LittleEndian>()?;
        let _planes = cursor.read_u16::<LittleEndian>()?;
        let bits_per_pixel = cursor.read_u16::<LittleEndian>()?;
        let compression = cursor.read_u32::<LittleEndian>()?;
        let _image_size = cursor.read_u32::<LittleEndian>()?;
        let _x_ppm = cursor.read_i32::<LittleEndian>()?;
        let _y_ppm = cursor.read_i32::<LittleEndian>()?;
        let colors_used = cursor.read_u32::<LittleEndian>()?;
        let _colors_important = cursor.read_u32::<LittleEndian>()?;

        if bits_per_pixel != 8 {
            return Err(EngineError::unsupported(format!("{bits_per_pixel} bpp BMP, only 8 bpp indexed is supported")));
        }
        if compression != BI_RGB {
            return Err(EngineError::unsupported(format!("compressed BMP (method {compression})")));
        }
        if width <= 0 || height == 0 {
            return Err(EngineError::invalid_bmp(format!("invalid dimensions {width}x{height}")));
        }

        // biClrUsed == 0 means a full 256-entry table for 8 bpp.
        let entries = if colors_used == 0 { 256 } else { colors_used as usize };
        if entries > Palette::MAX_COLORS {
            return Err(EngineError::invalid_bmp(format!("{entries} palette entries")));
        }
        let palette_offset = (FILE_HEADER_SIZE + header_size) as usize;
        let palette_end = palette_offset + entries * 4;
        if data.len() < palette_end {
            return Err(EngineError::FileTooShort);
        }
        let mut colors = Vec::with_capacity(entries);
        for quad in data[palette_offset..palette_end].chunks_exact(4) {
            colors.push(Color::new(quad[2], quad[1], quad[0]));
        }
        let palette = Palette::from_slice(&colors)?;

        // Negative height marks a top-down pixel ordering.
        let top_down = height < 0;
        let height = height.unsigned_abs() as usize;
        let width = width as usize;
        let stride = (width + 3) & !3;
        if data.len() < data_offset + stride * height {
            return Err(EngineError::FileTooShort);
        }

        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let src_y = if top_down { y } else { height - 1 - y };
            let row_start = data_offset + src_y * stride;
            pixels.extend_from_slice(&data[row_start..row_start + width]);
        }

        let buffer = PixelBuffer::from_data((width, height), pixels)?;
        let document = StripDocument::new(buffer, palette);
        document.validate_indices()?;
        Ok(document)
    }
}

use std::{collections::HashMap, io::Cursor};

use super::{OutputFormat, StripDocument};
use crate::{Color, EngineError, Palette, PixelBuffer, Result};

/// Indexed PNG codec.
///
/// Indexed sources keep their `PLTE` chunk untouched. Truecolor and
/// grayscale sources are converted to indexed form first; the palette that
/// conversion produces is implementation-defined and carries no relation
/// to any "original" table.
#[derive(Default)]
pub struct PngFormat {}

impl OutputFormat for PngFormat {
    fn get_file_extension(&self) -> &str {
        "png"
    }

    fn get_name(&self) -> &str {
        "PNG Image"
    }

    fn to_bytes(&self, buffer: &PixelBuffer, palette: &Palette) -> Result<Vec<u8>> {
        if palette.is_empty() {
            return Err(EngineError::EmptyPalette);
        }
        if buffer.get_width() <= 0 || buffer.get_height() <= 0 {
            return Err(EngineError::EmptyBuffer);
        }

        let mut result = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut result, buffer.get_width() as u32, buffer.get_height() as u32);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(palette.to_rgb_bytes());

            let mut writer = encoder.write_header()?;
            writer.write_image_data(buffer.data())?;
        }
        Ok(result)
    }

    fn load_strip(&self, data: &[u8]) -> Result<StripDocument> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info()?;

        let info = reader.info();
        let color_type = info.color_type;
        let bit_depth = info.bit_depth;
        if bit_depth != png::BitDepth::Eight {
            return Err(EngineError::unsupported(format!("{bit_depth:?}-bit PNG, only 8-bit is supported")));
        }
        let palette_bytes = info.palette.as_ref().map(|plte| plte.to_vec());

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| EngineError::generic("PNG output buffer size unknown"))?;
        let mut buf = vec![0; buf_size];
        let frame = reader.next_frame(&mut buf)?;
        buf.truncate(frame.buffer_size());
        let size = (frame.width, frame.height);

        match color_type {
            png::ColorType::Indexed => {
                let Some(palette_bytes) = palette_bytes else {
                    return Err(EngineError::InvalidPalette {
                        message: "indexed PNG without PLTE chunk".to_string(),
                    });
                };
                let palette = Palette::from_rgb_bytes(&palette_bytes)?;
                let buffer = PixelBuffer::from_data(size, buf)?;
                let document = StripDocument::new(buffer, palette);
                document.validate_indices()?;
                Ok(document)
            }
            png::ColorType::Grayscale => {
                // The gray value doubles as the palette index.
                let buffer = PixelBuffer::from_data(size, buf)?;
                Ok(StripDocument::new(buffer, Palette::grayscale_ramp()))
            }
            png::ColorType::Rgb => convert_to_indexed(&buf, size, 3),
            png::ColorType::Rgba => convert_to_indexed(&buf, size, 4),
            other => Err(EngineError::unsupported(format!("{other:?} PNG"))),
        }
    }
}

/// Builds an indexed document from truecolor samples by collecting unique
/// colors in scan order. Alpha is dropped.
fn convert_to_indexed(data: &[u8], size: (u32, u32), channels: usize) -> Result<StripDocument> {
    let mut colors: Vec<Color> = Vec::new();
    let mut color_map: HashMap<Color, u8> = HashMap::new();
    let mut pixels = Vec::with_capacity(data.len() / channels);

    for sample in data.chunks_exact(channels) {
        let color = Color::new(sample[0], sample[1], sample[2]);
        let index = match color_map.get(&color) {
            Some(&index) => index,
            None => {
                if colors.len() >= Palette::MAX_COLORS {
                    return Err(EngineError::TooManyColors);
                }
                let index = colors.len() as u8;
                colors.push(color);
                color_map.insert(color, index);
                index
            }
        };
        pixels.push(index);
    }

    let buffer = PixelBuffer::from_data(size, pixels)?;
    Ok(StripDocument::new(buffer, Palette::from_slice(&colors)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> (PixelBuffer, Palette) {
        let mut buffer = PixelBuffer::new((4, 6));
        for y in 0..6 {
            for x in 0..4 {
                buffer.set(x, y, ((x * y) % 4) as u8).unwrap();
            }
        }
        let palette = Palette::from_rgb_bytes(&[0, 0, 0, 255, 0, 255, 0, 255, 0, 9, 9, 9]).unwrap();
        (buffer, palette)
    }

    #[test]
    fn test_round_trip() {
        let (buffer, palette) = sample_document();
        let bytes = PngFormat {}.to_bytes(&buffer, &palette).unwrap();
        let document = PngFormat {}.load_strip(&bytes).unwrap();
        assert_eq!(buffer, document.buffer);
        assert_eq!(palette.to_rgb_bytes(), document.palette.to_rgb_bytes());
    }

    #[test]
    fn test_rgb_source_is_converted() {
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, 2, 2);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&[10, 20, 30, 10, 20, 30, 40, 50, 60, 10, 20, 30])
                .unwrap();
        }
        let document = PngFormat {}.load_strip(&data).unwrap();
        assert_eq!(2, document.palette.len());
        assert_eq!((10, 20, 30), document.palette.get_rgb(0));
        assert_eq!((40, 50, 60), document.palette.get_rgb(1));
        assert_eq!(&[0, 0, 1, 0], document.buffer.data());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(PngFormat {}.load_strip(&[0u8; 32]).is_err());
    }
}

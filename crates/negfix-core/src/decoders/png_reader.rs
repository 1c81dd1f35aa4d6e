//! PNG image decoder

use std::io::{BufRead, Seek};

use png::{BitDepth, ColorType, Decoder, Transformations};

use super::samples_to_rgb;
use crate::error::{NegfixError, Result};
use crate::image::Rgb16Image;

/// Decode a PNG stream into a 16-bit RGB grid.
///
/// Palette and sub-byte images are expanded to 8 bits by the decoder before
/// being scaled up.
pub fn decode_png_from_reader<R: BufRead + Seek>(reader: R) -> Result<Rgb16Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| NegfixError::Decode(format!("Failed to read PNG info: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| NegfixError::Decode("Failed to determine PNG buffer size".to_string()))?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| NegfixError::Decode(format!("Failed to read PNG frame: {}", e)))?;
    let bytes = &buf[..frame_info.buffer_size()];

    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(NegfixError::InvalidInput(
                "Indexed PNG was not expanded".to_string(),
            ))
        }
    };

    let samples: Vec<u16> = match bit_depth {
        BitDepth::Eight => bytes.iter().map(|&v| u16::from(v) * 257).collect(),
        // PNG 16-bit is big-endian
        BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect(),
        other => {
            return Err(NegfixError::InvalidInput(format!(
                "Unsupported PNG bit depth: {:?}",
                other
            )))
        }
    };

    samples_to_rgb(samples, channels, width, height)
}

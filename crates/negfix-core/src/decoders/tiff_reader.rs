//! TIFF image decoder

use std::io::{Read, Seek};

use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::ColorType;

use super::samples_to_rgb;
use crate::error::{NegfixError, Result};
use crate::image::Rgb16Image;

/// Decode a TIFF stream into a 16-bit RGB grid.
pub fn decode_tiff_from_reader<R: Read + Seek>(reader: R) -> Result<Rgb16Image> {
    // Configure limits for large film scans (up to 1GB uncompressed)
    let mut limits = Limits::default();
    limits.decoding_buffer_size = 1024 * 1024 * 1024;
    limits.ifd_value_size = 1024 * 1024 * 1024;
    limits.intermediate_buffer_size = 1024 * 1024 * 1024;

    let mut decoder = Decoder::new(reader)
        .map_err(|e| NegfixError::Decode(format!("Failed to create TIFF decoder: {}", e)))?
        .with_limits(limits);

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| NegfixError::Decode(format!("Failed to get TIFF dimensions: {}", e)))?;

    let color_type = decoder
        .colortype()
        .map_err(|e| NegfixError::Decode(format!("Failed to get TIFF color type: {}", e)))?;

    let channels = match color_type {
        ColorType::Gray(_) => 1,
        ColorType::GrayA(_) => 2,
        ColorType::RGB(_) => 3,
        ColorType::RGBA(_) => 4,
        other => {
            return Err(NegfixError::InvalidInput(format!(
                "Unsupported TIFF color type: {:?}",
                other
            )))
        }
    };

    let image_data = decoder
        .read_image()
        .map_err(|e| NegfixError::Decode(format!("Failed to read TIFF image data: {}", e)))?;

    let samples = match image_data {
        DecodingResult::U8(buf) => to_u16_samples(&buf),
        DecodingResult::U16(buf) => buf,
        DecodingResult::U32(buf) => to_u16_samples(&buf),
        DecodingResult::U64(buf) => to_u16_samples(&buf),
        DecodingResult::F32(buf) => to_u16_samples(&buf),
        DecodingResult::F64(buf) => to_u16_samples(&buf),
        DecodingResult::F16(buf) => {
            let f32_buf: Vec<f32> = buf.iter().map(|&v| v.to_f32()).collect();
            to_u16_samples(&f32_buf)
        }
        DecodingResult::I8(_)
        | DecodingResult::I16(_)
        | DecodingResult::I32(_)
        | DecodingResult::I64(_) => {
            return Err(NegfixError::InvalidInput(
                "Signed integer TIFF formats not supported".to_string(),
            ));
        }
    };

    samples_to_rgb(samples, channels, width, height)
}

/// TIFF sample types that can be rescaled to 16 bits.
trait TiffSample: Copy {
    fn to_u16(self) -> u16;
}

impl TiffSample for u8 {
    #[inline]
    fn to_u16(self) -> u16 {
        u16::from(self) * 257
    }
}

impl TiffSample for u32 {
    #[inline]
    fn to_u16(self) -> u16 {
        (self >> 16) as u16
    }
}

impl TiffSample for u64 {
    #[inline]
    fn to_u16(self) -> u16 {
        (self >> 48) as u16
    }
}

impl TiffSample for f32 {
    #[inline]
    fn to_u16(self) -> u16 {
        (self.clamp(0.0, 1.0) * 65535.0).round() as u16
    }
}

impl TiffSample for f64 {
    #[inline]
    fn to_u16(self) -> u16 {
        (self.clamp(0.0, 1.0) * 65535.0).round() as u16
    }
}

fn to_u16_samples<T: TiffSample>(buf: &[T]) -> Vec<u16> {
    buf.iter().map(|&v| v.to_u16()).collect()
}

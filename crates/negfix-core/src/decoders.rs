//! Image decoders for various formats
//!
//! Support for TIFF and PNG files. Every format is decoded to a 16-bit RGB
//! grid: 8-bit samples are scaled by 257, grayscale is expanded to RGB and
//! alpha is dropped.

mod png_reader;
mod tiff_reader;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::error::{NegfixError, Result};
use crate::image::Rgb16Image;

pub use png_reader::decode_png_from_reader;
pub use tiff_reader::decode_tiff_from_reader;

/// Container formats understood by the decoders and exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Tiff,
    Png,
}

impl ImageFormat {
    /// Pick a format from a file extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| {
                NegfixError::InvalidInput(format!(
                    "No file extension found for {}",
                    path.display()
                ))
            })?;

        match extension.as_str() {
            "tif" | "tiff" => Ok(ImageFormat::Tiff),
            "png" => Ok(ImageFormat::Png),
            _ => Err(NegfixError::InvalidInput(format!(
                "Unsupported file format: {}",
                extension
            ))),
        }
    }

    /// Identify a format from its leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
        if bytes.starts_with(PNG_SIGNATURE) {
            return Some(ImageFormat::Png);
        }
        if bytes.starts_with(b"II*\0")
            || bytes.starts_with(b"MM\0*")
            || bytes.starts_with(b"II+\0")
            || bytes.starts_with(b"MM\0+")
        {
            return Some(ImageFormat::Tiff);
        }
        None
    }
}

/// Decode an image from a file path, choosing the decoder by extension.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<Rgb16Image> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| NegfixError::io("Failed to open image", path, e))?;
    let reader = BufReader::new(file);

    let image = match format {
        ImageFormat::Tiff => decode_tiff_from_reader(reader),
        ImageFormat::Png => decode_png_from_reader(reader),
    }
    .map_err(|e| match e {
        NegfixError::Decode(msg) => NegfixError::Decode(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;

    log::debug!(
        "Decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Decode an in-memory TIFF or PNG file.
pub fn decode_bytes(bytes: &[u8]) -> Result<Rgb16Image> {
    match ImageFormat::sniff(bytes) {
        Some(ImageFormat::Tiff) => decode_tiff_from_reader(Cursor::new(bytes)),
        Some(ImageFormat::Png) => decode_png_from_reader(Cursor::new(bytes)),
        None => Err(NegfixError::InvalidInput(
            "Unrecognized image data (expected TIFF or PNG)".to_string(),
        )),
    }
}

/// Build an RGB grid from interleaved 16-bit samples with 1-4 channels.
///
/// One channel is gray, two are gray+alpha, four are RGBA.
pub(crate) fn samples_to_rgb(
    samples: Vec<u16>,
    channels: usize,
    width: u32,
    height: u32,
) -> Result<Rgb16Image> {
    let expected_len = width as usize * height as usize * channels;
    if samples.len() != expected_len {
        return Err(NegfixError::Decode(format!(
            "Buffer size mismatch: expected {}, got {}",
            expected_len,
            samples.len()
        )));
    }

    let data = match channels {
        3 => samples,
        1 | 2 => {
            let mut rgb_data = Vec::with_capacity(width as usize * height as usize * 3);
            for px in samples.chunks_exact(channels) {
                rgb_data.extend_from_slice(&[px[0], px[0], px[0]]);
            }
            rgb_data
        }
        4 => {
            let mut rgb_data = Vec::with_capacity(width as usize * height as usize * 3);
            for rgba in samples.chunks_exact(4) {
                rgb_data.extend_from_slice(&rgba[..3]);
            }
            rgb_data
        }
        n => {
            return Err(NegfixError::InvalidInput(format!(
                "Unsupported channel count: {}",
                n
            )))
        }
    };

    Rgb16Image::from_raw(width, height, data)
}

//! Image exporters for various output formats
//!
//! Results are written as 16-bit RGBA (alpha fully opaque) TIFF or PNG. Files
//! are encoded into a temporary file next to the destination and renamed into
//! place once encoding succeeds, so a failed export never leaves a truncated
//! output behind.

use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tiff::encoder::{colortype, TiffEncoder};

use crate::decoders::ImageFormat;
use crate::error::{NegfixError, Result};
use crate::image::Rgb16Image;

/// Encode an image as a 16-bit RGBA TIFF.
pub fn encode_tiff16<W: Write + Seek>(image: &Rgb16Image, writer: W) -> Result<()> {
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| NegfixError::Encode(format!("Failed to create TIFF encoder: {}", e)))?;

    encoder
        .write_image::<colortype::RGBA16>(image.width(), image.height(), &image.to_rgba16())
        .map_err(|e| NegfixError::Encode(format!("Failed to write TIFF image: {}", e)))
}

/// Encode an image as a 16-bit RGBA PNG.
pub fn encode_png16<W: Write>(image: &Rgb16Image, writer: W) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Sixteen);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| NegfixError::Encode(format!("Failed to write PNG header: {}", e)))?;

    // PNG 16-bit is big-endian
    let bytes: Vec<u8> = image
        .to_rgba16()
        .iter()
        .flat_map(|v| v.to_be_bytes())
        .collect();

    png_writer
        .write_image_data(&bytes)
        .map_err(|e| NegfixError::Encode(format!("Failed to write PNG image: {}", e)))?;
    png_writer
        .finish()
        .map_err(|e| NegfixError::Encode(format!("Failed to finish PNG image: {}", e)))
}

/// Encode an image to an in-memory file of the given format.
pub fn encode_bytes(image: &Rgb16Image, format: ImageFormat) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    match format {
        ImageFormat::Tiff => encode_tiff16(image, &mut cursor)?,
        ImageFormat::Png => encode_png16(image, &mut cursor)?,
    }
    Ok(cursor.into_inner())
}

/// Export an image to `path`, choosing the format by extension.
pub fn export_image<P: AsRef<Path>>(image: &Rgb16Image, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| NegfixError::io("Failed to create output file", path, e))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        match format {
            ImageFormat::Tiff => encode_tiff16(image, &mut writer)?,
            ImageFormat::Png => encode_png16(image, &mut writer)?,
        }
        writer
            .flush()
            .map_err(|e| NegfixError::io("Failed to write output file", path, e))?;
    }

    temp.persist(path)
        .map_err(|e| NegfixError::io("Failed to finalize output file", path, e.error))?;

    log::debug!("Wrote {}", path.display());
    Ok(())
}

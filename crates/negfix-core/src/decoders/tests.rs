//! Tests for image decoders

use super::*;
use std::io::Cursor;

fn encode_png8(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }
    out
}

#[test]
fn test_format_from_path() {
    assert_eq!(ImageFormat::from_path("scan.TIF").unwrap(), ImageFormat::Tiff);
    assert_eq!(ImageFormat::from_path("scan.tiff").unwrap(), ImageFormat::Tiff);
    assert_eq!(ImageFormat::from_path("chart.png").unwrap(), ImageFormat::Png);
    assert!(matches!(
        ImageFormat::from_path("scan.cr2"),
        Err(NegfixError::InvalidInput(_))
    ));
    assert!(matches!(
        ImageFormat::from_path("scan"),
        Err(NegfixError::InvalidInput(_))
    ));
}

#[test]
fn test_decode_bytes_rejects_unknown_data() {
    let result = decode_bytes(b"GIF89a....");
    assert!(matches!(result, Err(NegfixError::InvalidInput(_))));
}

#[test]
fn test_decode_missing_file() {
    let result = decode_image("/nonexistent/negative.tif");
    assert!(matches!(result, Err(NegfixError::Io { .. })));
}

#[test]
fn test_decode_truncated_tiff() {
    let result = decode_bytes(b"II*\0\x08\0\0\0");
    assert!(matches!(result, Err(NegfixError::Decode(_))));
}

#[test]
fn test_decode_png_rgb8_scales_to_16_bit() {
    let bytes = encode_png8(2, 1, png::ColorType::Rgb, &[0, 128, 255, 1, 2, 3]);

    let image = decode_png_from_reader(Cursor::new(bytes)).unwrap();

    assert_eq!(image.dimensions(), (2, 1));
    assert_eq!(image.pixel(0, 0), [0, 32896, 65535]);
    assert_eq!(image.pixel(1, 0), [257, 514, 771]);
}

#[test]
fn test_decode_png_gray8_expands_to_rgb() {
    let bytes = encode_png8(2, 2, png::ColorType::Grayscale, &[0, 255, 10, 20]);

    let image = decode_bytes(&bytes).unwrap();

    assert_eq!(image.pixel(1, 0), [65535, 65535, 65535]);
    assert_eq!(image.pixel(1, 1), [5140, 5140, 5140]);
}

#[test]
fn test_decode_tiff_gray16_expands_to_rgb() {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder = tiff::encoder::TiffEncoder::new(&mut cursor).unwrap();
        encoder
            .write_image::<tiff::encoder::colortype::Gray16>(2, 1, &[100, 60000])
            .unwrap();
    }

    let image = decode_bytes(cursor.get_ref()).unwrap();

    assert_eq!(image.pixel(0, 0), [100, 100, 100]);
    assert_eq!(image.pixel(1, 0), [60000, 60000, 60000]);
}

#[test]
fn test_decode_tiff_rgb8_scales_to_16_bit() {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder = tiff::encoder::TiffEncoder::new(&mut cursor).unwrap();
        encoder
            .write_image::<tiff::encoder::colortype::RGB8>(1, 1, &[255, 0, 1])
            .unwrap();
    }
    cursor.set_position(0);

    let image = decode_tiff_from_reader(cursor).unwrap();

    assert_eq!(image.pixel(0, 0), [65535, 0, 257]);
}

#[test]
fn test_samples_to_rgb_drops_alpha() {
    let image = samples_to_rgb(vec![1, 2, 3, 4, 5, 6, 7, 8], 4, 2, 1).unwrap();
    assert_eq!(image.as_raw(), &[1, 2, 3, 5, 6, 7]);
}

#[test]
fn test_samples_to_rgb_gray_alpha() {
    let image = samples_to_rgb(vec![9, 65535, 11, 0], 2, 1, 2).unwrap();
    assert_eq!(image.pixel(0, 1), [11, 11, 11]);
}

#[test]
fn test_samples_to_rgb_size_mismatch() {
    let result = samples_to_rgb(vec![1, 2, 3], 3, 2, 1);
    assert!(matches!(result, Err(NegfixError::Decode(_))));
}

//! Film base color estimation
//!
//! The base color is measured from a separate scan of unexposed film (the
//! mask sample) and later cancelled by the cast-removal stage.

use crate::error::{NegfixError, Result};
use crate::image::Rgb16Image;

/// Mean color of every pixel in `sample`, rounded down per channel.
pub fn average_color(sample: &Rgb16Image) -> Result<[u16; 3]> {
    if sample.pixel_count() == 0 {
        return Err(NegfixError::InvalidInput(
            "Film base sample image is empty".to_string(),
        ));
    }

    let mut sums = [0u64; 3];
    for pixel in sample.pixels() {
        for (sum, value) in sums.iter_mut().zip(pixel) {
            *sum += u64::from(value);
        }
    }

    let count = sample.pixel_count() as u64;
    let average = sums.map(|sum| (sum / count) as u16);

    log::debug!(
        "Film base average over {} pixels: [{}, {}, {}]",
        count,
        average[0],
        average[1],
        average[2]
    );
    Ok(average)
}

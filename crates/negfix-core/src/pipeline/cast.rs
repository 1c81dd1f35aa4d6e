//! Film mask (color cast) removal
//!
//! Works in negative space: the complement of the base color is added to
//! every pixel, so the film base itself ends up at full scale.

use crate::image::{Rgb16Image, MAX_SAMPLE};

/// Per-channel offset that cancels the given base color.
pub fn cast_offset(base: [u16; 3]) -> [u16; 3] {
    base.map(|v| MAX_SAMPLE - v)
}

/// Add the complement of `base` to every pixel, saturating at full scale.
pub fn remove_cast(image: &Rgb16Image, base: [u16; 3]) -> Rgb16Image {
    let offset = cast_offset(base);
    log::debug!(
        "Removing film mask with offsets [{}, {}, {}]",
        offset[0],
        offset[1],
        offset[2]
    );

    image.map_pixels(|[r, g, b]| {
        [
            r.saturating_add(offset[0]),
            g.saturating_add(offset[1]),
            b.saturating_add(offset[2]),
        ]
    })
}

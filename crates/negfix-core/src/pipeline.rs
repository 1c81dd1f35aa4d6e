//! Negative conversion pipeline
//!
//! Stages run in a fixed order, each producing a new image:
//!
//! 1. film mask removal (when a base color is known)
//! 2. gamma correction with the reciprocal of the film profile
//! 3. per-channel level normalization (optional)
//! 4. inversion (optional)
//!
//! Mask removal is a linear offset and belongs in the original negative
//! space. Normalization measures the histogram that gamma has already
//! reshaped, and inversion must see corrected levels.

pub mod base_estimation;
pub mod cast;
pub mod gamma;
pub mod inversion;
pub mod levels;


pub use base_estimation::average_color;
pub use cast::{cast_offset, remove_cast};
pub use gamma::apply_gamma;
pub use inversion::invert;
pub use levels::{apply_levels, measure_levels, normalize};

use crate::error::Result;
use crate::image::Rgb16Image;
use crate::models::ConvertOptions;

/// Run the full conversion pipeline on a decoded negative.
pub fn process_image(image: &Rgb16Image, options: &ConvertOptions) -> Result<Rgb16Image> {
    options.validate()?;
    log::info!("Processing {}x{} image", image.width(), image.height());

    let cast_removed;
    let source = match options.base_color {
        Some(base) => {
            cast_removed = remove_cast(image, base);
            &cast_removed
        }
        None => {
            log::warn!("No film base sample given; not removing film mask");
            image
        }
    };

    let mut current = apply_gamma(source, &options.gamma.reciprocal())?;

    match &options.normalize {
        Some(normalize_options) => current = normalize(&current, normalize_options)?,
        None => log::debug!("Normalization skipped"),
    }

    if options.invert {
        current = invert(&current);
    } else {
        log::debug!("Inversion skipped");
    }

    Ok(current)
}

//! Per-channel level normalization
//!
//! Levels are measured on a central region of the frame so that film edges
//! and scanner holders do not skew the statistics. Each channel's range is
//! found from its histogram with separate pixel-count thresholds at the low
//! and high ends, which lets isolated dust or scratch pixels fall through,
//! and the whole frame is then stretched to full scale.

mod histogram;


pub use histogram::{region_histograms, ChannelHistogram, Region};

use crate::error::{NegfixError, Result};
use crate::image::{Rgb16Image, MAX_SAMPLE};
use crate::models::{ChannelBounds, NormalizeOptions};

const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// Derive a channel's bounds from its histogram.
///
/// Fails when no value crosses the thresholds or the range collapses to a
/// single value, since no stretch can be derived.
pub fn channel_bounds(
    histogram: &ChannelHistogram,
    threshold_lower: u32,
    threshold_upper: u32,
) -> Option<ChannelBounds> {
    let min = histogram.first_above(threshold_lower)?;
    let max = histogram.last_above(threshold_upper)?;
    (max > min).then_some(ChannelBounds { min, max })
}

/// Measure the normalization bounds of every channel.
pub fn measure_levels(
    image: &Rgb16Image,
    options: &NormalizeOptions,
) -> Result<[ChannelBounds; 3]> {
    options.validate()?;

    let region = Region::interior(image.width(), image.height(), options.border_percent);
    if region.is_empty() {
        return Err(NegfixError::Degenerate(format!(
            "Normalization region is empty ({}x{} image, {}% border)",
            image.width(),
            image.height(),
            options.border_percent
        )));
    }

    let histograms = region_histograms(image, region);

    let mut bounds = [ChannelBounds { min: 0, max: MAX_SAMPLE }; 3];
    for (i, histogram) in histograms.iter().enumerate() {
        bounds[i] = channel_bounds(histogram, options.threshold_lower, options.threshold_upper)
            .ok_or_else(|| {
                NegfixError::Degenerate(format!(
                    "The {} channel has no usable range (lower threshold {}, upper threshold {})",
                    CHANNEL_NAMES[i], options.threshold_lower, options.threshold_upper
                ))
            })?;
    }

    log::debug!(
        "Levels: red {}-{}, green {}-{}, blue {}-{}",
        bounds[0].min,
        bounds[0].max,
        bounds[1].min,
        bounds[1].max,
        bounds[2].min,
        bounds[2].max
    );
    Ok(bounds)
}

/// Stretch each channel of the full image so `min` maps to 0 and `max` to full scale.
///
/// Fractional results are truncated; values outside the bounds clamp.
pub fn apply_levels(image: &Rgb16Image, bounds: &[ChannelBounds; 3]) -> Rgb16Image {
    let full_scale = u64::from(MAX_SAMPLE);
    let ranges = bounds.map(|b| u64::from(b.max.saturating_sub(b.min).max(1)));

    image.map_pixels(|rgb| {
        let mut out = rgb;
        for ((value, bound), range) in out.iter_mut().zip(bounds).zip(ranges) {
            let offset = u64::from(value.saturating_sub(bound.min));
            *value = (offset * full_scale / range).min(full_scale) as u16;
        }
        out
    })
}

/// Measure levels on the interior region, then stretch the whole image.
pub fn normalize(image: &Rgb16Image, options: &NormalizeOptions) -> Result<Rgb16Image> {
    let bounds = measure_levels(image, options)?;
    Ok(apply_levels(image, &bounds))
}

//! Gamma calibration from chart scans
//!
//! A calibration chart is a square image with one printed step curve per
//! channel (red, green, blue from the bottom up), or a single curve for black
//! and white stock. Measuring how far each curve sits from the bottom edge,
//! column by column, and fitting a line through those distances gives the
//! gamma exponent stored in a [`GammaProfile`].

mod scan;


pub use scan::{is_dark, BandLengths, BLACK_POINT};

use crate::error::{NegfixError, Result};
use crate::image::Rgb16Image;
use crate::models::GammaProfile;

const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// Curve layout of a calibration chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveMode {
    /// Three curves: red, green, blue.
    #[default]
    Color,
    /// One curve shared by every channel.
    BlackAndWhite,
}

impl CurveMode {
    pub fn band_count(self) -> usize {
        match self {
            CurveMode::Color => 3,
            CurveMode::BlackAndWhite => 1,
        }
    }
}

/// Collect per-column band lengths from a square chart.
pub fn scan_chart(image: &Rgb16Image, mode: CurveMode) -> Result<Vec<BandLengths>> {
    let (width, height) = image.dimensions();
    if width != height {
        return Err(NegfixError::InvalidInput(format!(
            "Calibration chart is not square: {}x{}",
            width, height
        )));
    }

    let lengths = scan::scan_columns(image, mode.band_count());
    log::debug!(
        "Chart scan recorded {:?} columns per band",
        lengths.iter().map(Vec::len).collect::<Vec<_>>()
    );
    Ok(lengths)
}

/// Least-squares slope of `values` against their index.
///
/// Returns `None` for fewer than two values, where no slope exists.
pub fn slope(values: &[u32]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean_x = (0..values.len()).map(|i| i as f64).sum::<f64>() / n;
    let mean_y = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;

    let (mut numerator, mut denominator) = (0.0, 0.0);
    for (i, &v) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        numerator += dx * (f64::from(v) - mean_y);
        denominator += dx * dx;
    }

    Some(numerator / denominator)
}

fn channel_slope(lengths: &[u32], channel: usize) -> Result<f64> {
    slope(lengths).ok_or_else(|| {
        NegfixError::Degenerate(format!(
            "Not enough chart columns to fit the {} curve ({} found)",
            CHANNEL_NAMES[channel],
            lengths.len()
        ))
    })
}

/// Measure a chart and return the fitted exponents.
///
/// In black and white mode the single curve is used for every channel.
pub fn profile_chart(image: &Rgb16Image, mode: CurveMode) -> Result<GammaProfile> {
    let lengths = scan_chart(image, mode)?;

    let profile = match mode {
        CurveMode::Color => GammaProfile::new(
            channel_slope(&lengths[0], 0)?,
            channel_slope(&lengths[1], 1)?,
            channel_slope(&lengths[2], 2)?,
        ),
        CurveMode::BlackAndWhite => GammaProfile::uniform(channel_slope(&lengths[0], 0)?),
    };

    log::info!(
        "Fitted gamma r={}, g={}, b={}",
        profile.r,
        profile.g,
        profile.b
    );
    Ok(profile)
}

/// Text form printed by the calibration tool, ready to paste into a profile.
pub fn format_profile(profile: &GammaProfile) -> String {
    format!("r: {},\ng: {},\nb: {},\n", profile.r, profile.g, profile.b)
}

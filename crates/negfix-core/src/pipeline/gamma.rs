//! Per-channel power-law gamma correction

use crate::error::Result;
use crate::image::{Rgb16Image, MAX_SAMPLE};
use crate::models::GammaProfile;

const LUT_SIZE: usize = MAX_SAMPLE as usize + 1;

/// Map every sample `s` to `round(MAX * (s / MAX) ^ exponent)`, per channel.
///
/// `exponents` are applied as given; callers undoing a film profile pass
/// `profile.reciprocal()`.
pub fn apply_gamma(image: &Rgb16Image, exponents: &GammaProfile) -> Result<Rgb16Image> {
    exponents.validate()?;
    log::debug!(
        "Applying gamma exponents r={:.4}, g={:.4}, b={:.4}",
        exponents.r,
        exponents.g,
        exponents.b
    );

    let luts = exponents.as_array().map(|e| (e != 1.0).then(|| build_lut(e)));

    Ok(image.map_pixels(|rgb| {
        let mut out = rgb;
        for (value, lut) in out.iter_mut().zip(&luts) {
            if let Some(lut) = lut {
                *value = lut[*value as usize];
            }
        }
        out
    }))
}

/// Single-sample form of the gamma curve.
#[inline]
pub fn gamma_sample(value: u16, exponent: f64) -> u16 {
    let max = f64::from(MAX_SAMPLE);
    let normalized = f64::from(value) / max;
    (normalized.powf(exponent) * max).round().clamp(0.0, max) as u16
}

fn build_lut(exponent: f64) -> Vec<u16> {
    (0..LUT_SIZE)
        .map(|v| gamma_sample(v as u16, exponent))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NegfixError;

    fn ramp_image() -> Rgb16Image {
        let mut image = Rgb16Image::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                let v = ((y * 16 + x) * 257) as u16;
                image.set_pixel(x, y, [v, 65535 - v, v / 3]);
            }
        }
        image
    }

    #[test]
    fn test_unit_exponent_is_identity() {
        let image = ramp_image();
        let out = apply_gamma(&image, &GammaProfile::NONE).unwrap();
        assert_eq!(out, image);
    }

    #[test]
    fn test_endpoints_are_fixed() {
        for exponent in [0.25, 0.5733379896124348, 1.0, 2.2, 4.0] {
            assert_eq!(gamma_sample(0, exponent), 0);
            assert_eq!(gamma_sample(65535, exponent), 65535);
        }
    }

    #[test]
    fn test_square_root_of_quarter() {
        // (16384 / 65535)^0.5 * 65535
        assert_eq!(gamma_sample(16384, 0.5), 32768);
    }

    #[test]
    fn test_channels_are_independent() {
        let image = Rgb16Image::filled(1, 1, [32768, 32768, 32768]);
        let out = apply_gamma(&image, &GammaProfile::new(1.0, 2.0, 0.5)).unwrap();
        let [r, g, b] = out.pixel(0, 0);

        assert_eq!(r, 32768);
        assert_eq!(g, gamma_sample(32768, 2.0));
        assert_eq!(b, gamma_sample(32768, 0.5));
        assert!(g < r && r < b);
    }

    #[test]
    fn test_round_trip_within_rounding() {
        let image = ramp_image();
        let profile = GammaProfile::new(0.5228012326204643, 0.536735995403697, 0.6114420242779521);

        let forward = apply_gamma(&image, &profile).unwrap();
        let back = apply_gamma(&forward, &profile.reciprocal()).unwrap();

        for (a, b) in image.as_raw().iter().zip(back.as_raw()) {
            let diff = (i32::from(*a) - i32::from(*b)).abs();
            assert!(diff <= 4, "round trip drifted by {}: {} vs {}", diff, a, b);
        }
    }

    #[test]
    fn test_rejects_non_positive_exponent() {
        let image = Rgb16Image::filled(1, 1, [1, 2, 3]);
        let result = apply_gamma(&image, &GammaProfile::new(1.0, 0.0, 1.0));
        assert!(matches!(result, Err(NegfixError::Config(_))));
    }
}

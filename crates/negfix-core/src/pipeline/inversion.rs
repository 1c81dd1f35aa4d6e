//! Negative-to-positive inversion

use crate::image::{Rgb16Image, MAX_SAMPLE};

/// Complement every channel of every pixel.
pub fn invert(image: &Rgb16Image) -> Rgb16Image {
    image.map_pixels(|rgb| rgb.map(|v| MAX_SAMPLE - v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_extremes() {
        let mut image = Rgb16Image::new(2, 1);
        image.set_pixel(1, 0, [65535, 1, 32768]);

        let out = invert(&image);

        assert_eq!(out.pixel(0, 0), [65535, 65535, 65535]);
        assert_eq!(out.pixel(1, 0), [0, 65534, 32767]);
    }

    #[test]
    fn test_invert_is_involutive() {
        let mut image = Rgb16Image::new(5, 3);
        for y in 0..3 {
            for x in 0..5 {
                let v = (x * 13_001 + y * 7_919) as u16;
                image.set_pixel(x, y, [v, v.wrapping_mul(3), 65535 - v]);
            }
        }

        assert_eq!(invert(&invert(&image)), image);
    }
}

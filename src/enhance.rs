//! Contrast enhancement around the image's mean luma.

use image::RgbaImage;

/// 8-bit ITU-R 601 luma, rounded.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Rounded mean luma over every pixel, transparent ones included.
pub fn mean_luma(image: &RgbaImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = image.pixels().map(|p| luma(p[0], p[1], p[2]) as u64).sum();
    (sum as f64 / count as f64 + 0.5) as u8
}

/// Push each color channel away from the mean luma by `factor`.
/// Alpha is left as is. A factor of 1.0 returns the image unchanged.
pub fn enhance_contrast(image: &RgbaImage, factor: f32) -> RgbaImage {
    let pivot = mean_luma(image) as f32;
    let mut output = image.clone();

    for pixel in output.pixels_mut() {
        for channel in pixel.0[..3].iter_mut() {
            let value = pivot + factor * (*channel as f32 - pivot);
            // truncate, then clamp into the 8-bit range
            *channel = if value <= 0.0 {
                0
            } else if value >= 255.0 {
                255
            } else {
                value as u8
            };
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn solid_orange_stays_orange_ish() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([255, 153, 0, 255]));
        assert_eq!(mean_luma(&image), 166);

        let out = enhance_contrast(&image, 1.2);
        // 166 + 1.2 * (153 - 166) = 150.4
        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 150, 0, 255]));
    }

    #[test]
    fn alpha_is_untouched() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 0]));
        image.put_pixel(1, 0, Rgba([200, 200, 200, 77]));
        let out = enhance_contrast(&image, 1.5);
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(1, 0)[3], 77);
    }

    #[test]
    fn unit_factor_is_identity() {
        let mut image = RgbaImage::from_pixel(3, 3, Rgba([12, 99, 240, 255]));
        image.put_pixel(1, 1, Rgba([250, 1, 64, 128]));
        assert_eq!(enhance_contrast(&image, 1.0), image);
    }

    #[test]
    fn deterministic() {
        let mut image = RgbaImage::from_pixel(5, 2, Rgba([80, 160, 40, 255]));
        image.put_pixel(4, 1, Rgba([0, 0, 0, 0]));
        assert_eq!(enhance_contrast(&image, 1.2), enhance_contrast(&image, 1.2));
    }
}

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use thiserror::Error;

/// Multiplier applied to each pixel's distance from the mean luminance.
pub const CONTRAST_FACTOR: f32 = 1.5;
/// Multiplier applied to each pixel's distance from its smoothed value.
pub const SHARPNESS_FACTOR: f32 = 1.2;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Grayscale → contrast ×1.5 → sharpness ×1.2.
///
/// Dimensions are preserved; the same input always yields the same output.
pub fn prepare_for_ocr(img: &DynamicImage) -> GrayImage {
    let gray = to_luma(img);
    let contrasted = enhance_contrast(&gray, CONTRAST_FACTOR);
    enhance_sharpness(&contrasted, SHARPNESS_FACTOR)
}

/// Serialize a prepared image as PNG for byte-oriented OCR engines.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}

/// ITU-R 601-2 luma; alpha is dropped.
fn to_luma(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    ImageBuffer::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let l = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000;
        Luma([l as u8])
    })
}

/// Interpolate from `base` towards `px` by `factor`, clamped to 0..=255.
/// Factors above 1.0 push the pixel past `px`, away from `base`.
fn blend(base: u8, px: u8, factor: f32) -> u8 {
    let v = base as f32 + factor * (px as f32 - base as f32);
    if v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

fn enhance_contrast(gray: &GrayImage, factor: f32) -> GrayImage {
    let count = gray.width() as u64 * gray.height() as u64;
    if count == 0 {
        return gray.clone();
    }

    let sum: u64 = gray.pixels().map(|p| p[0] as u64).sum();
    let mean = ((sum as f64 / count as f64) + 0.5) as u8;

    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([blend(mean, gray.get_pixel(x, y)[0], factor)])
    })
}

fn enhance_sharpness(gray: &GrayImage, factor: f32) -> GrayImage {
    let smooth = smooth(gray);
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([blend(smooth.get_pixel(x, y)[0], gray.get_pixel(x, y)[0], factor)])
    })
}

/// 3×3 smoothing, kernel `[1 1 1; 1 5 1; 1 1 1] / 13`. Border pixels are copied.
fn smooth(gray: &GrayImage) -> GrayImage {
    let (w, h) = gray.dimensions();
    ImageBuffer::from_fn(w, h, |x, y| {
        let center = gray.get_pixel(x, y)[0] as u32;
        if x == 0 || y == 0 || x + 1 >= w || y + 1 >= h {
            return Luma([center as u8]);
        }

        let mut sum = 4 * center;
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                sum += gray.get_pixel(nx, ny)[0] as u32;
            }
        }
        Luma([((sum + 6) / 13) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid_gray(width: u32, height: u32, value: u8) -> GrayImage {
        ImageBuffer::from_fn(width, height, |_, _| Luma([value]))
    }

    fn split_gray(width: u32, height: u32, left: u8, right: u8) -> GrayImage {
        ImageBuffer::from_fn(width, height, |x, _| {
            Luma([if x < width / 2 { left } else { right }])
        })
    }

    #[test]
    fn grayscale_uses_601_luma() {
        let red: RgbImage = ImageBuffer::from_fn(2, 2, |_, _| Rgb([255, 0, 0]));
        let out = prepare_for_ocr(&DynamicImage::ImageRgb8(red));
        // Uniform input: contrast and sharpness leave the luma untouched.
        assert!(out.pixels().all(|p| p[0] == 76));
    }

    #[test]
    fn grayscale_input_keeps_its_values() {
        let gray = solid_gray(3, 3, 91);
        assert_eq!(to_luma(&DynamicImage::ImageLuma8(gray.clone())), gray);
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let img: RgbaImage = ImageBuffer::from_fn(2, 2, |x, _| Rgba([0, 0, 255, x as u8 * 255]));
        let out = to_luma(&DynamicImage::ImageRgba8(img));
        assert!(out.pixels().all(|p| p[0] == 29));
    }

    #[test]
    fn contrast_expands_away_from_mean() {
        let out = enhance_contrast(&split_gray(4, 1, 100, 200), CONTRAST_FACTOR);
        // mean = 150
        assert_eq!(out.get_pixel(0, 0)[0], 75);
        assert_eq!(out.get_pixel(3, 0)[0], 225);
    }

    #[test]
    fn contrast_clamps_to_valid_range() {
        let out = enhance_contrast(&split_gray(4, 1, 0, 255), CONTRAST_FACTOR);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(3, 0)[0], 255);
    }

    #[test]
    fn sharpness_boosts_isolated_detail() {
        let mut img = solid_gray(3, 3, 0);
        img.put_pixel(1, 1, Luma([130]));
        let out = enhance_sharpness(&img, SHARPNESS_FACTOR);
        // smoothed center = (5 * 130 + 6) / 13 = 50; 50 + 1.2 * 80 = 146
        assert_eq!(out.get_pixel(1, 1)[0], 146);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn sharpness_leaves_uniform_image_alone() {
        let img = solid_gray(5, 5, 180);
        assert_eq!(enhance_sharpness(&img, SHARPNESS_FACTOR), img);
    }

    #[test]
    fn contrast_runs_before_sharpness() {
        let mut img = solid_gray(3, 3, 100);
        img.put_pixel(1, 1, Luma([140]));
        let out = prepare_for_ocr(&DynamicImage::ImageLuma8(img));
        // contrast: mean 104 -> border 98, center 158
        // sharpness: smoothed center (4 * 158 + 8 * 98 + 158 + 6) / 13 = 121 -> 121 + 1.2 * 37 = 165
        // sharpening first would leave the border at 97
        assert_eq!(out.get_pixel(0, 0)[0], 98);
        assert_eq!(out.get_pixel(2, 1)[0], 98);
        assert_eq!(out.get_pixel(1, 1)[0], 165);
    }

    #[test]
    fn dimensions_are_preserved() {
        let img = DynamicImage::ImageLuma8(split_gray(3000, 7, 20, 240));
        let out = prepare_for_ocr(&img);
        assert_eq!(out.dimensions(), (3000, 7));
    }

    #[test]
    fn preprocessing_is_deterministic() {
        let img: RgbImage = ImageBuffer::from_fn(16, 9, |x, y| {
            Rgb([(x * 15) as u8, (y * 25) as u8, ((x + y) * 7) as u8])
        });
        let img = DynamicImage::ImageRgb8(img);
        assert_eq!(prepare_for_ocr(&img), prepare_for_ocr(&img));
    }

    #[test]
    fn empty_image_does_not_panic() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert_eq!(prepare_for_ocr(&img).dimensions(), (0, 0));
    }

    #[test]
    fn encode_png_produces_png_header() {
        let bytes = encode_png(&solid_gray(4, 4, 100)).unwrap();
        // PNG magic bytes: 0x89 0x50 0x4E 0x47
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}

//! Canonicalization of raw image bytes for text recognition.

use crate::recognizer::OcrError;
use image::{DynamicImage, GrayImage, Rgb, RgbImage};

/// Decode arbitrary encoded image bytes into the form the recognizer
/// expects: no alpha channel, single-channel luminance.
///
/// Alpha is composited over opaque white before being discarded, so
/// transparent regions read as white rather than black. Dark blobs from
/// transparency would otherwise register as text-like regions.
///
/// # Errors
///
/// Returns [`OcrError::ImageDecode`] if the bytes are not a supported image
/// format. Callers treat this as a local failure (no text), not a fatal one.
pub fn normalize_for_ocr(bytes: &[u8]) -> Result<GrayImage, OcrError> {
    let img = image::load_from_memory(bytes).map_err(|e| OcrError::ImageDecode(e.to_string()))?;
    Ok(flatten_to_gray(&img))
}

fn flatten_to_gray(img: &DynamicImage) -> GrayImage {
    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut flat = RgbImage::new(width, height);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let alpha = u16::from(pixel[3]);
            let over_white =
                |fg: u8| -> u8 { ((u16::from(fg) * alpha + 255 * (255 - alpha)) / 255) as u8 };
            flat.put_pixel(
                x,
                y,
                Rgb([over_white(pixel[0]), over_white(pixel[1]), over_white(pixel[2])]),
            );
        }
        DynamicImage::ImageRgb8(flat).to_luma8()
    } else {
        img.to_luma8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Luma, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_rejects_undecodable_bytes() {
        let result = normalize_for_ocr(b"definitely not an image");
        assert!(matches!(result, Err(OcrError::ImageDecode(_))));
    }

    #[test]
    fn test_grayscale_conversion() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([10, 20, 30])));
        let bytes = encode(&img, ImageFormat::Png);

        let gray = normalize_for_ocr(&bytes).unwrap();
        assert_eq!(gray.dimensions(), (4, 4));
        // Luminance of a dark pixel stays dark.
        assert!(gray.get_pixel(0, 0)[0] < 64);
    }

    #[test]
    fn test_transparent_pixels_read_as_white() {
        // Fully transparent black: without white compositing this would come
        // out as luminance 0.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 0])));
        let bytes = encode(&img, ImageFormat::Png);

        let gray = normalize_for_ocr(&bytes).unwrap();
        assert_eq!(gray.get_pixel(1, 1), &Luma([255]));
    }

    #[test]
    fn test_opaque_alpha_preserves_color() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
        let bytes = encode(&img, ImageFormat::Png);

        let gray = normalize_for_ocr(&bytes).unwrap();
        assert_eq!(gray.get_pixel(0, 0), &Luma([0]));
    }

    #[test]
    fn test_partial_alpha_blends_toward_white() {
        // 50% opaque black over white should land mid-gray.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 128])));
        let bytes = encode(&img, ImageFormat::Png);

        let gray = normalize_for_ocr(&bytes).unwrap();
        let value = gray.get_pixel(0, 0)[0];
        assert!((100..=160).contains(&value), "expected mid-gray, got {value}");
    }
}

//! JPEG encoding, the lossy target of the compressor.
//!
//! Uses the `image` crate's baseline JPEG encoder. Quality is an integer
//! percent; the compressor walks it downwards to trade fidelity for size.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::codec::{validate_pixels, Codec, EncodeError, PixelLayout};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality percent, clamped to 1-100
///
/// # Quality Guidelines
///
/// * 86-92: visually close to the source, the first steps of the search
/// * 50-80: typical landing zone for phone photos under a 200 KB budget
/// * Below 30: visible blocking, reached only for very detailed images
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, PixelLayout::Rgb)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Vec::new();

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            codec: Codec::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer)
}

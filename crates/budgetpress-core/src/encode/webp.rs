//! Lossy WebP encoding through libwebp.

use super::codec::{validate_pixels, Codec, EncodeError, PixelLayout};

/// Encode RGB or RGBA pixel data to lossy WebP bytes.
///
/// `quality` is a percent clamped to 1-100. Alpha is kept for RGBA input.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, layout)?;

    let quality = quality.clamp(1, 100);
    let encoder = match layout {
        PixelLayout::Rgb => ::webp::Encoder::from_rgb(pixels, width, height),
        PixelLayout::Rgba => ::webp::Encoder::from_rgba(pixels, width, height),
    };

    let memory = encoder
        .encode_simple(false, f32::from(quality))
        .map_err(|e| EncodeError::EncodingFailed {
            codec: Codec::WebP,
            message: format!("{e:?}"),
        })?;

    Ok(memory.to_vec())
}

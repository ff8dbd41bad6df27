//! Lossless PNG encoding for the format converter.

use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use super::codec::{validate_pixels, Codec, EncodeError, PixelLayout};

/// Encode RGB or RGBA pixel data to PNG bytes.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, layout)?;

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, layout.color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            codec: Codec::Png,
            message: e.to_string(),
        })?;

    Ok(buffer)
}

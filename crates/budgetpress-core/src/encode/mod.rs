//! Raster encoding for the compressor and the format converter.
//!
//! This module provides functionality for:
//! - Encoding rasters to JPEG with a quality percent (the compressor target)
//! - Encoding rasters to lossy WebP with a quality percent
//! - Encoding lossless PNG, keeping alpha where the converter needs it
//!
//! All operations are synchronous and single-threaded.

mod codec;
mod jpeg;
mod png;
mod webp;

pub use self::codec::{Codec, EncodeError, PixelLayout};
pub use self::jpeg::encode_jpeg;
pub use self::png::encode_png;
pub use self::webp::encode_webp;

use crate::decode::Raster;

/// Encode a raster with the given codec.
///
/// `quality` is a percent and only affects lossy codecs. A zero-byte result
/// is reported as [`EncodeError::EmptyOutput`].
pub fn encode(raster: &Raster, codec: Codec, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_pixels(
        &raster.pixels,
        raster.width,
        raster.height,
        PixelLayout::Rgb,
        codec,
        quality,
    )
}

/// Encode a raw pixel buffer of the given layout.
///
/// RGBA input is rejected for codecs without an alpha channel.
pub fn encode_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    codec: Codec,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let bytes = match (codec, layout) {
        (Codec::Jpeg, PixelLayout::Rgb) => encode_jpeg(pixels, width, height, quality)?,
        (Codec::Jpeg, PixelLayout::Rgba) => {
            return Err(EncodeError::UnsupportedLayout { codec, layout })
        }
        (Codec::Png, _) => encode_png(pixels, width, height, layout)?,
        (Codec::WebP, _) => encode_webp(pixels, width, height, layout, quality)?,
    };

    if bytes.is_empty() {
        return Err(EncodeError::EmptyOutput(codec));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_dispatches_by_codec() {
        let raster = Raster::filled(8, 8, [90, 120, 150]);

        let jpeg = encode(&raster, Codec::Jpeg, 80).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let png = encode(&raster, Codec::Png, 80).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let webp = encode(&raster, Codec::WebP, 80).unwrap();
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_webp_quality_changes_output() {
        let pixels: Vec<u8> = (0..32 * 32 * 3).map(|i| ((i * 7919) % 251) as u8).collect();
        let raster = Raster::new(32, 32, pixels);

        let high = encode(&raster, Codec::WebP, 100).unwrap();
        let low = encode(&raster, Codec::WebP, 10).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_jpeg_rejects_rgba() {
        let result = encode_pixels(&[0u8; 16], 2, 2, PixelLayout::Rgba, Codec::Jpeg, 80);
        assert!(matches!(
            result,
            Err(EncodeError::UnsupportedLayout {
                codec: Codec::Jpeg,
                layout: PixelLayout::Rgba
            })
        ));
    }

    #[test]
    fn test_png_ignores_quality() {
        let raster = Raster::filled(8, 8, [1, 2, 3]);
        let a = encode(&raster, Codec::Png, 10).unwrap();
        let b = encode(&raster, Codec::Png, 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_propagates_validation() {
        let broken = Raster {
            width: 4,
            height: 4,
            pixels: vec![0u8; 3],
        };
        assert!(matches!(
            encode(&broken, Codec::Jpeg, 80),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }
}

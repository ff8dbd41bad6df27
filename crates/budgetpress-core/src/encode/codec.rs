//! Output codecs and encoding errors.

use image::ExtendedColorType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while encoding a raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * channels), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder reported an error
    #[error("{codec} encoding failed: {message}")]
    EncodingFailed { codec: Codec, message: String },

    /// The encoder returned without producing any bytes
    #[error("{0} encoder produced no output")]
    EmptyOutput(Codec),

    /// The codec cannot store this pixel layout
    #[error("{codec} cannot encode {layout:?} pixels")]
    UnsupportedLayout { codec: Codec, layout: PixelLayout },
}

/// Channel layout of a pixel buffer handed to an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLayout {
    #[default]
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    pub(crate) fn color_type(self) -> ExtendedColorType {
        match self {
            PixelLayout::Rgb => ExtendedColorType::Rgb8,
            PixelLayout::Rgba => ExtendedColorType::Rgba8,
        }
    }
}

/// Output codec for encoded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// Lossy JPEG, no alpha channel.
    #[default]
    Jpeg,
    /// Lossless PNG.
    Png,
    /// Lossy WebP with alpha.
    WebP,
}

impl Codec {
    /// File extension used when naming downloads.
    pub fn extension(self) -> &'static str {
        match self {
            Codec::Jpeg => "jpg",
            Codec::Png => "png",
            Codec::WebP => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Codec::Jpeg => "image/jpeg",
            Codec::Png => "image/png",
            Codec::WebP => "image/webp",
        }
    }

    /// Whether the quality parameter has any effect on the output.
    pub fn is_lossy(self) -> bool {
        matches!(self, Codec::Jpeg | Codec::WebP)
    }

    /// Whether transparency survives encoding.
    pub fn supports_alpha(self) -> bool {
        matches!(self, Codec::Png | Codec::WebP)
    }

    /// Parse a user-facing format name such as `"jpg"` or `"image/webp"`.
    pub fn parse(name: &str) -> Option<Codec> {
        match name.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "image/jpeg" | "image/jpg" => Some(Codec::Jpeg),
            "png" | "image/png" => Some(Codec::Png),
            "webp" | "image/webp" => Some(Codec::WebP),
            _ => None,
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Codec::Jpeg => "JPEG",
            Codec::Png => "PNG",
            Codec::WebP => "WebP",
        };
        f.write_str(name)
    }
}

/// Check dimensions and buffer length before handing pixels to an encoder.
pub(crate) fn validate_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * layout.channels();
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_extensions() {
        assert_eq!(Codec::Jpeg.extension(), "jpg");
        assert_eq!(Codec::Png.extension(), "png");
        assert_eq!(Codec::WebP.extension(), "webp");
    }

    #[test]
    fn test_codec_parse() {
        assert_eq!(Codec::parse("JPG"), Some(Codec::Jpeg));
        assert_eq!(Codec::parse(" jpeg "), Some(Codec::Jpeg));
        assert_eq!(Codec::parse("image/webp"), Some(Codec::WebP));
        assert_eq!(Codec::parse("png"), Some(Codec::Png));
        assert_eq!(Codec::parse("gif"), None);
    }

    #[test]
    fn test_lossy_codecs() {
        assert!(Codec::Jpeg.is_lossy());
        assert!(!Codec::Png.is_lossy());
        assert!(Codec::WebP.is_lossy());
    }

    #[test]
    fn test_alpha_support() {
        assert!(!Codec::Jpeg.supports_alpha());
        assert!(Codec::Png.supports_alpha());
        assert!(Codec::WebP.supports_alpha());
    }

    #[test]
    fn test_validate_pixels() {
        assert!(validate_pixels(&[0u8; 12], 2, 2, PixelLayout::Rgb).is_ok());
        assert!(validate_pixels(&[0u8; 16], 2, 2, PixelLayout::Rgba).is_ok());
        assert!(matches!(
            validate_pixels(&[0u8; 12], 2, 2, PixelLayout::Rgba),
            Err(EncodeError::InvalidPixelData {
                expected: 16,
                actual: 12
            })
        ));
        assert!(matches!(
            validate_pixels(&[0u8; 11], 2, 2, PixelLayout::Rgb),
            Err(EncodeError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
        assert!(matches!(
            validate_pixels(&[], 0, 2, PixelLayout::Rgb),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::EmptyOutput(Codec::Jpeg);
        assert_eq!(err.to_string(), "JPEG encoder produced no output");

        let err = EncodeError::EncodingFailed {
            codec: Codec::WebP,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "WebP encoding failed: boom");

        let err = EncodeError::UnsupportedLayout {
            codec: Codec::Jpeg,
            layout: PixelLayout::Rgba,
        };
        assert_eq!(err.to_string(), "JPEG cannot encode Rgba pixels");
    }
}

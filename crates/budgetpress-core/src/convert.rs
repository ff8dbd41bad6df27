//! Single-shot format conversion between JPEG, PNG and WebP.
//!
//! Unlike the compressor there is no size target: the upload is decoded,
//! re-encoded once at its original dimensions, and named after the upload.
//! Transparency survives PNG and WebP output; JPEG output is composited onto
//! black.

use thiserror::Error;
use tracing::{info, instrument};

use crate::decode::{decode_oriented, flatten_alpha, DecodeError};
use crate::encode::{encode, encode_pixels, Codec, EncodeError, PixelLayout};
use crate::report::output_file_name;

/// Quality used when the caller gives none (or zero).
pub const DEFAULT_CONVERT_QUALITY: u8 = 90;

/// Lowest quality the converter accepts.
pub const MIN_CONVERT_QUALITY: u8 = 10;

/// Base name used when the upload has no usable name.
pub const CONVERT_FALLBACK_NAME: &str = "converted-image";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Could not read the image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Could not generate output image: {0}")]
    Encode(#[from] EncodeError),
}

/// A converted image ready for download.
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub codec: Codec,
    pub file_name: String,
}

impl ConvertedImage {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Normalise a user-entered quality percent.
///
/// Non-finite and zero inputs fall back to the default; everything else is
/// rounded and clamped to `10..=100`.
pub fn normalize_quality(percent: f32) -> u8 {
    if !percent.is_finite() || percent == 0.0 {
        return DEFAULT_CONVERT_QUALITY;
    }
    percent
        .round()
        .clamp(MIN_CONVERT_QUALITY as f32, 100.0) as u8
}

/// Convert an uploaded image to `target`.
///
/// `quality_percent` affects JPEG and WebP output.
#[instrument(skip(bytes), fields(input_len = bytes.len()))]
pub fn convert_image(
    bytes: &[u8],
    file_name: &str,
    target: Codec,
    quality_percent: f32,
) -> Result<ConvertedImage, ConvertError> {
    let quality = normalize_quality(quality_percent);
    let image = decode_oriented(bytes)?;
    let (width, height) = (image.width(), image.height());
    let keep_alpha = target.supports_alpha() && image.color().has_alpha();

    let encoded = if keep_alpha {
        let rgba = image.into_rgba8();
        encode_pixels(rgba.as_raw(), width, height, PixelLayout::Rgba, target, quality)?
    } else {
        encode(&flatten_alpha(image), target, quality)?
    };

    let converted = ConvertedImage {
        bytes: encoded,
        width,
        height,
        codec: target,
        file_name: output_file_name(file_name, "", target, CONVERT_FALLBACK_NAME),
    };

    info!(
        codec = %target,
        quality,
        keep_alpha,
        size = converted.size(),
        file_name = %converted.file_name,
        "Image converted"
    );

    Ok(converted)
}

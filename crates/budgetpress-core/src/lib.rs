//! budgetpress core - target-size image compression
//!
//! This crate re-encodes uploaded images so they fit a byte budget (200 KB by
//! default), trying lower JPEG quality first and smaller dimensions second.
//! It also carries the single-shot WebP/JPG/PNG converter and the helpers
//! the browser front end uses for status lines and download names.
//!
//! # Modules
//!
//! - `decode` - source decoding (JPEG, PNG, WebP) and resizing
//! - `encode` - JPEG, lossy WebP and PNG encoding
//! - `rasterizer` - the decode/resize/encode capability the search runs on
//! - `compress` - the target-size search
//! - `convert` - format conversion
//! - `report` - sizes, status messages and file names

pub mod compress;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod rasterizer;
pub mod report;

pub use compress::{
    compress_bytes, compress_raster, CancellationToken, Clock, CompressError, CompressOptions,
    CompressionOutcome, EncodingAttempt, SearchControl, SearchSchedule, SearchStatus,
    DEFAULT_TARGET_BYTES,
};
#[cfg(not(target_arch = "wasm32"))]
pub use compress::{compress_file_bytes, SystemClock};
pub use convert::{convert_image, ConvertError, ConvertedImage};
pub use decode::{DecodeError, Raster};
pub use encode::{Codec, EncodeError, PixelLayout};
pub use rasterizer::{ImageRasterizer, Rasterizer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_is_200_kib() {
        assert_eq!(DEFAULT_TARGET_BYTES, 200 * 1024);
        assert_eq!(CompressOptions::default().target_bytes, DEFAULT_TARGET_BYTES);
    }

    #[test]
    fn test_outcome_status_message() {
        let outcome = CompressionOutcome {
            bytes: vec![0u8; 150 * 1024],
            width: 800,
            height: 600,
            quality: 62,
            round: 0,
            codec: Codec::Jpeg,
            target_bytes: DEFAULT_TARGET_BYTES,
            attempts: Vec::new(),
        };

        assert_eq!(outcome.status(), SearchStatus::TargetMet);
        assert_eq!(
            outcome.status_message(2 * 1024 * 1024),
            "Done. Image compressed to target size (2.00 MB → 150.0 KB)."
        );
    }
}

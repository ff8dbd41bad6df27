//! Source image decoding for the compressor.
//!
//! This module provides functionality for:
//! - Sniffing and decoding JPEG, PNG and WebP uploads
//! - Applying EXIF orientation so rasters are upright
//! - Resizing rasters for the shrink rounds of the target-size search
//!
//! # Architecture
//!
//! Decoding happens once per upload. The decoded [`Raster`] is immutable and
//! every shrink round resamples from it, so quality loss never compounds
//! across rounds.

mod resize;
mod source;
mod types;

pub use resize::{resize, scaled_dimensions};
pub use source::{decode_image, decode_oriented, detect_format, flatten_alpha, get_orientation};
pub use types::{DecodeError, FilterType, Orientation, Raster, SourceFormat};

//! Raster capability used by the compressor.
//!
//! The search only needs three things from its environment: decode an upload,
//! redraw a raster at new dimensions, and encode it. Putting them behind a
//! trait lets tests drive the search with a deterministic fake encoder whose
//! byte sizes are known in advance.

use crate::decode::{self, DecodeError, FilterType, Raster};
use crate::encode::{self, Codec, EncodeError};

/// Decode, resize and encode rasters.
pub trait Rasterizer {
    /// Decode file bytes into an upright RGB raster.
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError>;

    /// Redraw `raster` at exactly `width` x `height`.
    fn resize(&self, raster: &Raster, width: u32, height: u32) -> Result<Raster, DecodeError>;

    /// Encode `raster` with `codec` at `quality` percent.
    fn encode(&self, raster: &Raster, codec: Codec, quality: u8) -> Result<Vec<u8>, EncodeError>;
}

/// [`Rasterizer`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRasterizer {
    /// Filter used when shrinking between rounds.
    pub filter: FilterType,
}

impl ImageRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Rasterizer for ImageRasterizer {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError> {
        decode::decode_image(bytes)
    }

    fn resize(&self, raster: &Raster, width: u32, height: u32) -> Result<Raster, DecodeError> {
        decode::resize(raster, width, height, self.filter)
    }

    fn encode(&self, raster: &Raster, codec: Codec, quality: u8) -> Result<Vec<u8>, EncodeError> {
        encode::encode(raster, codec, quality)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError> {
        (**self).decode(bytes)
    }

    fn resize(&self, raster: &Raster, width: u32, height: u32) -> Result<Raster, DecodeError> {
        (**self).resize(raster, width, height)
    }

    fn encode(&self, raster: &Raster, codec: Codec, quality: u8) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(raster, codec, quality)
    }
}

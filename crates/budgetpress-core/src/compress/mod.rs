//! Target-size compression.
//!
//! Given a decoded raster and a byte budget, re-encode it with a lossy codec
//! until the output fits, trading quality first and dimensions second.
//!
//! # Search order
//!
//! ```text
//! round 0 (W0 x H0):        q 92 -> 86 -> ... -> 14
//! round 1 (0.9 W0 x ...):   q 92 -> 86 -> ... -> 14
//! ...
//! round 4 (0.9^4 W0 x ...): q 92 -> 86 -> ... -> 14
//! ```
//!
//! Attempts run strictly one at a time. The first attempt at or under the
//! budget ends the search.

mod control;
mod options;
mod search;
#[cfg(test)]
pub(crate) mod testing;

pub use control::{CancellationToken, Clock, SearchControl};
#[cfg(not(target_arch = "wasm32"))]
pub use control::SystemClock;
pub use options::{CompressOptions, SearchSchedule, DEFAULT_TARGET_BYTES};
pub use search::{compress_raster, CompressionOutcome, EncodingAttempt, SearchStatus};

use thiserror::Error;
use tracing::{instrument, warn};

use crate::decode::DecodeError;
use crate::encode::Codec;
use crate::rasterizer::Rasterizer;

/// Errors that end a compression without output.
///
/// Missing the budget is not an error; see [`SearchStatus::BudgetNotMet`].
#[derive(Debug, Error)]
pub enum CompressError {
    /// The upload could not be decoded; no attempt was made.
    #[error("Image decode failed: {0}")]
    ImageDecodeFailed(#[from] DecodeError),

    /// The source raster has no pixels.
    #[error("Source image is empty")]
    EmptySource,

    /// No attempt in the whole search produced output.
    #[error("{codec} encoding is not supported here ({attempts} attempts failed)")]
    EncodingUnsupported { codec: Codec, attempts: usize },

    /// The wall-clock bound passed between two attempts.
    #[error("Search timed out after {elapsed_ms} ms ({attempts} attempts made)")]
    SearchTimedOut { elapsed_ms: u64, attempts: usize },

    /// The caller cancelled the search between two attempts.
    #[error("Compression cancelled after {attempts} attempts")]
    Cancelled { attempts: usize },

    #[error("Invalid compression options: {0}")]
    InvalidOptions(String),
}

/// Decode `bytes` with `rasterizer`, then run the search.
///
/// Decoding failures abort before any attempt is made.
#[instrument(skip_all, fields(input_len = bytes.len(), target_bytes = options.target_bytes))]
pub fn compress_bytes<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    bytes: &[u8],
    options: &CompressOptions,
    control: &SearchControl<'_>,
) -> Result<CompressionOutcome, CompressError> {
    options.validate()?;

    let source = rasterizer.decode(bytes).map_err(|err| {
        warn!(error = %err, "Source image could not be decoded");
        CompressError::ImageDecodeFailed(err)
    })?;

    compress_raster(rasterizer, &source, options, control)
}

/// Compress an uploaded file with the `image`-backed rasterizer and the
/// system clock.
#[cfg(not(target_arch = "wasm32"))]
pub fn compress_file_bytes(
    bytes: &[u8],
    options: &CompressOptions,
) -> Result<CompressionOutcome, CompressError> {
    let clock = SystemClock::new();
    compress_bytes(
        &crate::ImageRasterizer::new(),
        bytes,
        options,
        &SearchControl::new(&clock),
    )
}

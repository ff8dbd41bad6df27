//! The target-size search loop.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{CompressError, CompressOptions, SearchControl};
use crate::decode::Raster;
use crate::encode::Codec;
use crate::rasterizer::Rasterizer;

/// One encode issued by the search, in issuance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingAttempt {
    /// Resize round, 0 being full size.
    pub round: u32,
    /// Quality percent used.
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    /// Encoded size, or `None` if the encoder failed or produced nothing.
    pub size: Option<usize>,
    /// Whether this attempt replaced the best result.
    pub accepted: bool,
}

/// Terminal state of a search that produced output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    /// The output fits the budget.
    TargetMet,
    /// Every round ran without fitting; the output is the smallest encoding
    /// seen and the budget is not guaranteed.
    BudgetNotMet,
}

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct CompressionOutcome {
    /// Encoded output.
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub round: u32,
    pub codec: Codec,
    pub target_bytes: usize,
    /// Every attempt made, failures included.
    pub attempts: Vec<EncodingAttempt>,
}

impl CompressionOutcome {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn target_met(&self) -> bool {
        self.size() <= self.target_bytes
    }

    pub fn status(&self) -> SearchStatus {
        if self.target_met() {
            SearchStatus::TargetMet
        } else {
            SearchStatus::BudgetNotMet
        }
    }

    /// Human-readable summary comparing against the uploaded file size.
    pub fn status_message(&self, original_size: usize) -> String {
        crate::report::status_message(self.status(), original_size, self.size(), self.target_bytes)
    }
}

struct Best {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    quality: u8,
    round: u32,
}

/// Re-encode `source` until it fits `options.target_bytes`.
///
/// Quality descends within a round before the raster is shrunk for the next
/// round. The first encoding at or under the budget ends the search, so
/// quality is never lowered further than needed. If no encoding fits, the
/// smallest one seen is returned with [`SearchStatus::BudgetNotMet`].
///
/// # Errors
///
/// * [`CompressError::InvalidOptions`] for a zero budget or broken schedule
/// * [`CompressError::EncodingUnsupported`] if no attempt produced output
/// * [`CompressError::Cancelled`] / [`CompressError::SearchTimedOut`] from
///   the checks made between attempts
#[instrument(
    skip_all,
    fields(
        width = source.width,
        height = source.height,
        target_bytes = options.target_bytes,
        codec = %options.codec,
    )
)]
pub fn compress_raster<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    source: &Raster,
    options: &CompressOptions,
    control: &SearchControl<'_>,
) -> Result<CompressionOutcome, CompressError> {
    options.validate()?;
    if source.is_empty() {
        return Err(CompressError::EmptySource);
    }

    let schedule = &options.schedule;
    let qualities = schedule.quality_levels();
    let started_ms = control.now_ms();

    let mut attempts: Vec<EncodingAttempt> = Vec::with_capacity(schedule.max_attempts());
    let mut best: Option<Best> = None;

    'rounds: for round in 0..schedule.resize_rounds {
        control.checkpoint(started_ms, options.timeout_ms, attempts.len())?;

        let (width, height) = schedule.round_dimensions(source.width, source.height, round);
        let working: Cow<'_, Raster> = if (width, height) == source.dimensions() {
            Cow::Borrowed(source)
        } else {
            match rasterizer.resize(source, width, height) {
                Ok(raster) => Cow::Owned(raster),
                Err(err) => {
                    warn!(round, width, height, error = %err, "Resize failed, skipping round");
                    continue;
                }
            }
        };

        for &quality in &qualities {
            control.checkpoint(started_ms, options.timeout_ms, attempts.len())?;

            let bytes = match rasterizer.encode(&working, options.codec, quality) {
                Ok(bytes) if !bytes.is_empty() => bytes,
                Ok(_) => {
                    warn!(round, quality, "Encoder produced no output, skipping attempt");
                    attempts.push(failed_attempt(round, quality, width, height));
                    continue;
                }
                Err(err) => {
                    warn!(round, quality, error = %err, "Encode failed, skipping attempt");
                    attempts.push(failed_attempt(round, quality, width, height));
                    continue;
                }
            };

            let size = bytes.len();
            let within_budget = size <= options.target_bytes;
            let accepted = within_budget || best.as_ref().map_or(true, |b| size < b.bytes.len());

            debug!(round, quality, width, height, size, accepted, "Encoding attempt");
            attempts.push(EncodingAttempt {
                round,
                quality,
                width,
                height,
                size: Some(size),
                accepted,
            });

            if accepted {
                best = Some(Best {
                    bytes,
                    width,
                    height,
                    quality,
                    round,
                });
            }

            if within_budget {
                break 'rounds;
            }
        }
    }

    let Some(best) = best else {
        warn!(attempts = attempts.len(), "No attempt produced output");
        return Err(CompressError::EncodingUnsupported {
            codec: options.codec,
            attempts: attempts.len(),
        });
    };

    let outcome = CompressionOutcome {
        bytes: best.bytes,
        width: best.width,
        height: best.height,
        quality: best.quality,
        round: best.round,
        codec: options.codec,
        target_bytes: options.target_bytes,
        attempts,
    };

    info!(
        status = ?outcome.status(),
        size = outcome.size(),
        width = outcome.width,
        height = outcome.height,
        quality = outcome.quality,
        round = outcome.round,
        attempts = outcome.attempts.len(),
        "Search finished"
    );

    Ok(outcome)
}

fn failed_attempt(round: u32, quality: u8, width: u32, height: u32) -> EncodingAttempt {
    EncodingAttempt {
        round,
        quality,
        width,
        height,
        size: None,
        accepted: false,
    }
}

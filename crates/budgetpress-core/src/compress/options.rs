//! Search configuration.

use serde::{Deserialize, Serialize};

use super::CompressError;
use crate::decode::scaled_dimensions;
use crate::encode::Codec;

/// Default byte budget: 200 KiB, the limit most upload portals enforce.
pub const DEFAULT_TARGET_BYTES: usize = 200 * 1024;

/// Fixed bounds of the coarse-to-fine search.
///
/// Quality values are integer percents so the descent is exact: the default
/// schedule visits 92, 86, ... 14 in every round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchSchedule {
    /// Number of resize rounds, the first at full size.
    pub resize_rounds: u32,
    /// First quality tried in each round.
    pub quality_start: u8,
    /// Lowest quality allowed; the descent stops before going under it.
    pub quality_floor: u8,
    /// Quality decrement between attempts.
    pub quality_step: u8,
    /// Multiplier applied to both sides after each unsuccessful round.
    pub resize_factor: f64,
}

impl Default for SearchSchedule {
    fn default() -> Self {
        Self {
            resize_rounds: 5,
            quality_start: 92,
            quality_floor: 10,
            quality_step: 6,
            resize_factor: 0.9,
        }
    }
}

impl SearchSchedule {
    /// Quality levels of one round, highest first.
    pub fn quality_levels(&self) -> Vec<u8> {
        if self.quality_step == 0 || self.quality_start < self.quality_floor {
            return Vec::new();
        }
        (self.quality_floor..=self.quality_start)
            .rev()
            .step_by(self.quality_step as usize)
            .collect()
    }

    /// Working dimensions for `round`, always redrawn from the source size.
    pub fn round_dimensions(&self, width: u32, height: u32, round: u32) -> (u32, u32) {
        if round == 0 {
            return (width, height);
        }
        let exponent = i32::try_from(round).unwrap_or(i32::MAX);
        scaled_dimensions(width, height, self.resize_factor.powi(exponent))
    }

    /// Total number of attempts the search may make.
    pub fn max_attempts(&self) -> usize {
        self.resize_rounds as usize * self.quality_levels().len()
    }

    pub fn validate(&self) -> Result<(), CompressError> {
        let invalid = |msg: &str| Err(CompressError::InvalidOptions(msg.to_string()));

        if self.resize_rounds == 0 {
            return invalid("at least one resize round is required");
        }
        if self.quality_step == 0 {
            return invalid("quality step must be positive");
        }
        if self.quality_floor == 0 {
            return invalid("quality floor must be at least 1");
        }
        if self.quality_start > 100 {
            return invalid("quality start must not exceed 100");
        }
        if self.quality_start < self.quality_floor {
            return invalid("quality start must not be below the quality floor");
        }
        if !(self.resize_factor > 0.0 && self.resize_factor <= 1.0) {
            return invalid("resize factor must be in (0, 1]");
        }
        Ok(())
    }
}

/// Caller-facing options for one compression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressOptions {
    /// Maximum acceptable output size in bytes.
    pub target_bytes: usize,
    /// Output codec. Only lossy codecs benefit from the quality descent.
    pub codec: Codec,
    /// Wall-clock bound on the whole search, checked between attempts.
    pub timeout_ms: Option<u64>,
    pub schedule: SearchSchedule,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            target_bytes: DEFAULT_TARGET_BYTES,
            codec: Codec::Jpeg,
            timeout_ms: None,
            schedule: SearchSchedule::default(),
        }
    }
}

impl CompressOptions {
    pub fn with_target(target_bytes: usize) -> Self {
        Self {
            target_bytes,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CompressError> {
        if self.target_bytes == 0 {
            return Err(CompressError::InvalidOptions(
                "target byte budget must be positive".to_string(),
            ));
        }
        if self.timeout_ms == Some(0) {
            return Err(CompressError::InvalidOptions(
                "timeout must be positive when set".to_string(),
            ));
        }
        self.schedule.validate()
    }
}

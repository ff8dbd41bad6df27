//! Cooperative cancellation and wall-clock bounds for a running search.
//!
//! Both are only consulted between attempts; an encode that has started
//! always runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::CompressError;

/// Source of monotonic milliseconds.
///
/// Native callers use [`SystemClock`]; the browser bindings supply their own
/// because `std::time::Instant` is unavailable on `wasm32-unknown-unknown`.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

/// Clock backed by `std::time::Instant`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Shared flag a caller flips to stop a search.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Per-invocation controls handed to the search.
pub struct SearchControl<'a> {
    clock: &'a dyn Clock,
    cancel: Option<CancellationToken>,
}

impl<'a> SearchControl<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Fail if the caller cancelled or the deadline has passed.
    pub(crate) fn checkpoint(
        &self,
        started_ms: f64,
        timeout_ms: Option<u64>,
        attempts: usize,
    ) -> Result<(), CompressError> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(CompressError::Cancelled { attempts });
        }

        if let Some(limit) = timeout_ms {
            let elapsed = (self.clock.now_ms() - started_ms).max(0.0);
            if elapsed >= limit as f64 {
                return Err(CompressError::SearchTimedOut {
                    elapsed_ms: elapsed as u64,
                    attempts,
                });
            }
        }

        Ok(())
    }
}

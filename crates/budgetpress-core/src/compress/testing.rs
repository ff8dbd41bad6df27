//! Deterministic test doubles for the search.

use std::cell::{Cell, RefCell};

use super::Clock;
use crate::decode::{DecodeError, Raster};
use crate::encode::{Codec, EncodeError};
use crate::rasterizer::Rasterizer;

pub const KB: usize = 1024;

type SizeFn = Box<dyn Fn(u32, u32, u8) -> Option<usize>>;

/// Rasterizer whose encoded size is a closed-form function of
/// `(width, height, quality)`. `None` simulates an encoder failure.
pub struct FakeRasterizer {
    size_of: SizeFn,
    fail_resize_below: Option<u32>,
    encodes: RefCell<Vec<(u32, u32, u8)>>,
    resizes: RefCell<Vec<((u32, u32), (u32, u32))>>,
}

impl FakeRasterizer {
    pub fn new(size_of: impl Fn(u32, u32, u8) -> Option<usize> + 'static) -> Self {
        Self {
            size_of: Box::new(size_of),
            fail_resize_below: None,
            encodes: RefCell::new(Vec::new()),
            resizes: RefCell::new(Vec::new()),
        }
    }

    /// Make every resize to a width under `width` fail.
    pub fn failing_resize_below(mut self, width: u32) -> Self {
        self.fail_resize_below = Some(width);
        self
    }

    pub fn qualities(&self) -> Vec<u8> {
        self.encodes.borrow().iter().map(|&(_, _, q)| q).collect()
    }

    pub fn resize_calls(&self) -> usize {
        self.resizes.borrow().len()
    }

    pub fn resize_sources(&self) -> Vec<(u32, u32)> {
        self.resizes.borrow().iter().map(|&(from, _)| from).collect()
    }

    pub fn resize_targets(&self) -> Vec<(u32, u32)> {
        self.resizes.borrow().iter().map(|&(_, to)| to).collect()
    }
}

impl Rasterizer for FakeRasterizer {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError> {
        match bytes {
            [w, h, ..] if *w > 0 && *h > 0 => Ok(Raster::filled(*w as u32, *h as u32, [0, 0, 0])),
            _ => Err(DecodeError::UnsupportedFormat),
        }
    }

    fn resize(&self, raster: &Raster, width: u32, height: u32) -> Result<Raster, DecodeError> {
        self.resizes
            .borrow_mut()
            .push((raster.dimensions(), (width, height)));
        if self.fail_resize_below.is_some_and(|limit| width < limit) {
            return Err(DecodeError::InvalidDimensions { width, height });
        }
        Ok(Raster::filled(width, height, [0, 0, 0]))
    }

    fn encode(&self, raster: &Raster, codec: Codec, quality: u8) -> Result<Vec<u8>, EncodeError> {
        self.encodes
            .borrow_mut()
            .push((raster.width, raster.height, quality));
        match (self.size_of)(raster.width, raster.height, quality) {
            Some(size) => Ok(vec![0xAB; size]),
            None => Err(EncodeError::EncodingFailed {
                codec,
                message: "fake failure".to_string(),
            }),
        }
    }
}

/// Clock that advances by a fixed step on every read.
pub struct StepClock {
    now: Cell<f64>,
    step: f64,
}

impl StepClock {
    pub fn new(step: f64) -> Self {
        Self {
            now: Cell::new(0.0),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> f64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

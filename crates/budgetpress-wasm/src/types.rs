//! WASM-compatible wrapper types for raster data.

use budgetpress_core::decode::{FilterType, Raster};
use wasm_bindgen::prelude::*;

/// A decoded raster wrapper for JavaScript.
///
/// Pixel data lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from dimensions and RGB pixel data (3 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRaster {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }

    /// Convert back to a core Raster. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Map a filter id from JavaScript: 0 = Nearest, 2 = Lanczos3, anything else
/// Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_accessors() {
        let img = JsRaster::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_raster_conversion_round_trip() {
        let raster = Raster::filled(4, 3, [9, 8, 7]);
        let js = JsRaster::from_raster(raster.clone());
        assert_eq!(js.to_raster(), raster);
        assert_eq!(js.pixels(), raster.pixels);
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::Lanczos3);
        assert_eq!(filter_from_u8(255), FilterType::Bilinear);
    }
}

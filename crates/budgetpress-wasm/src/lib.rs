//! budgetpress WASM - WebAssembly bindings for the image compressor
//!
//! This crate exposes budgetpress-core to the browser pages that host the
//! JPG compressor and the WebP/JPG converter. Everything runs locally in the
//! page; nothing is uploaded.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible raster wrapper
//! - `decode` - upload decoding and resizing
//! - `encode` - JPEG encoding
//! - `compress` - target-size compression
//! - `convert` - format conversion
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_to_target, format_size } from '@budgetpress/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_to_target(bytes, file.name, 200 * 1024);
//! console.log(`${format_size(result.original_size)} -> ${format_size(result.size)}`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod convert;
mod decode;
mod encode;
mod log;
mod types;

pub use compress::{compress_to_target, compress_with_options, JsCompressionResult};
pub use convert::{convert_image, JsConvertedImage};
pub use decode::{decode_image, is_supported_image, resize};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default byte budget of the compressor (200 KB).
#[wasm_bindgen]
pub fn default_target_bytes() -> usize {
    budgetpress_core::DEFAULT_TARGET_BYTES
}

/// Format a byte count the way the status line does (`B`, `KB`, `MB`).
#[wasm_bindgen]
pub fn format_size(bytes: usize) -> String {
    budgetpress_core::report::format_size(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_default_target_bytes() {
        assert_eq!(default_target_bytes(), 204_800);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(210 * 1024), "210.0 KB");
    }
}

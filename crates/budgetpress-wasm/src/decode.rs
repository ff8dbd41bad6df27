//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, is_supported_image } from '@budgetpress/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! if (is_supported_image(bytes)) {
//!   const image = decode_image(bytes);
//!   console.log(`${image.width}x${image.height}`);
//! }
//! ```

use crate::types::{filter_from_u8, JsRaster};
use budgetpress_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG, PNG or WebP upload, applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check the magic bytes for an accepted upload format.
#[wasm_bindgen]
pub fn is_supported_image(bytes: &[u8]) -> bool {
    decode::detect_format(bytes).is_some()
}

/// Resize a raster to exact dimensions.
///
/// `filter`: 0 = Nearest, 1 = Bilinear (default), 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize(image: &JsRaster, width: u32, height: u32, filter: u8) -> Result<JsRaster, JsValue> {
    decode::resize(&image.to_raster(), width, height, filter_from_u8(filter))
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_binding() {
        let img = JsRaster::new(10, 10, vec![128u8; 10 * 10 * 3]);
        let resized = resize(&img, 5, 4, 1).unwrap();
        assert_eq!(resized.width(), 5);
        assert_eq!(resized.height(), 4);
    }
}

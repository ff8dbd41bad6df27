//! Image encoding WASM bindings.

use crate::types::JsRaster;
use budgetpress_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes at `quality` percent (1-100).
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsRaster to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster();
    encode::encode(&raster, encode::Codec::Jpeg, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_encodes_as_jpeg() {
        let img = JsRaster::new(10, 10, vec![128u8; 10 * 10 * 3]);

        let jpeg = encode::encode(&img.to_raster(), encode::Codec::Jpeg, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}

//! WebP / JPG / PNG conversion WASM bindings.
//!
//! ```typescript
//! const converted = convert_image(bytes, file.name, 'webp', 90);
//! link.download = converted.file_name;
//! ```

use budgetpress_core::convert::{self, ConvertedImage};
use budgetpress_core::encode::Codec;
use budgetpress_core::report::{convert_failure_message, convert_success_message};
use wasm_bindgen::prelude::*;

/// A converted image ready for download.
#[wasm_bindgen]
pub struct JsConvertedImage {
    inner: ConvertedImage,
}

#[wasm_bindgen]
impl JsConvertedImage {
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.inner.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.codec.mime_type().to_string()
    }

    pub fn free(self) {}
}

/// Convert an upload to `target` (`"jpg"`, `"png"` or `"webp"`).
///
/// `quality` is a percent clamped to 10-100; PNG output ignores it.
#[wasm_bindgen]
pub fn convert_image(
    bytes: &[u8],
    file_name: &str,
    target: &str,
    quality: f32,
) -> Result<JsConvertedImage, JsValue> {
    let codec = parse_target(target).map_err(|e| JsValue::from_str(&e))?;

    match convert::convert_image(bytes, file_name, codec, quality) {
        Ok(inner) => {
            crate::log::info(&convert_success_message());
            Ok(JsConvertedImage { inner })
        }
        Err(err) => {
            let message = convert_failure_message(&err);
            crate::log::warn(&message);
            Err(JsValue::from_str(&message))
        }
    }
}

fn parse_target(target: &str) -> Result<Codec, String> {
    Codec::parse(target).ok_or_else(|| format!("Unsupported target format: {}", target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("jpg"), Ok(Codec::Jpeg));
        assert_eq!(parse_target("WEBP"), Ok(Codec::WebP));
        assert_eq!(
            parse_target("bmp"),
            Err("Unsupported target format: bmp".to_string())
        );
    }
}

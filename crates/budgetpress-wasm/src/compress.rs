//! Target-size compression WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { compress_to_target, compress_with_options } from '@budgetpress/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_to_target(bytes, file.name, 200 * 1024);
//! status.textContent = result.message;
//! link.download = result.file_name;
//! link.href = URL.createObjectURL(new Blob([result.bytes()], { type: 'image/jpeg' }));
//!
//! // Custom budget with a wall-clock bound
//! compress_with_options(bytes, file.name, { targetBytes: 150 * 1024, timeoutMs: 10000 });
//! ```

use budgetpress_core::compress::{
    compress_bytes, Clock, CompressError, CompressOptions, CompressionOutcome, SearchControl,
};
use budgetpress_core::report::{compressed_file_name, failure_message};
use budgetpress_core::ImageRasterizer;
use wasm_bindgen::prelude::*;

/// Browser clock backed by `Date.now()`.
struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Result of a compression, ready for display and download.
#[wasm_bindgen]
pub struct JsCompressionResult {
    outcome: CompressionOutcome,
    original_size: usize,
    file_name: String,
    message: String,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Encoded output as a Uint8Array copy.
    pub fn bytes(&self) -> Vec<u8> {
        self.outcome.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.outcome.size()
    }

    #[wasm_bindgen(getter)]
    pub fn original_size(&self) -> usize {
        self.original_size
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.outcome.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.outcome.height
    }

    /// Quality percent of the returned encoding.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u8 {
        self.outcome.quality
    }

    #[wasm_bindgen(getter)]
    pub fn round(&self) -> u32 {
        self.outcome.round
    }

    /// False when the result is best effort and still above the budget.
    #[wasm_bindgen(getter)]
    pub fn target_met(&self) -> bool {
        self.outcome.target_met()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.outcome.codec.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }

    /// Attempt trace as an array of `{ round, quality, width, height, size, accepted }`.
    pub fn attempts(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.outcome.attempts)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn free(self) {}
}

/// Compress an upload toward `target_bytes` with the default search.
#[wasm_bindgen]
pub fn compress_to_target(
    bytes: &[u8],
    file_name: &str,
    target_bytes: usize,
) -> Result<JsCompressionResult, JsValue> {
    let options = CompressOptions::with_target(target_bytes);
    finish(run(bytes, file_name, &options, &DateClock))
}

/// Compress an upload with options given as a JS object.
///
/// Accepts `{ targetBytes?, codec?, timeoutMs?, schedule? }`; missing fields
/// take their defaults and `undefined` means all defaults.
#[wasm_bindgen]
pub fn compress_with_options(
    bytes: &[u8],
    file_name: &str,
    options: JsValue,
) -> Result<JsCompressionResult, JsValue> {
    let options: CompressOptions = if options.is_undefined() || options.is_null() {
        CompressOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid compression options: {}", e)))?
    };
    finish(run(bytes, file_name, &options, &DateClock))
}

fn run(
    bytes: &[u8],
    file_name: &str,
    options: &CompressOptions,
    clock: &dyn Clock,
) -> Result<JsCompressionResult, CompressError> {
    let outcome = compress_bytes(
        &ImageRasterizer::new(),
        bytes,
        options,
        &SearchControl::new(clock),
    )?;

    Ok(JsCompressionResult {
        message: outcome.status_message(bytes.len()),
        file_name: compressed_file_name(file_name, outcome.codec),
        original_size: bytes.len(),
        outcome,
    })
}

fn finish(result: Result<JsCompressionResult, CompressError>) -> Result<JsCompressionResult, JsValue> {
    match result {
        Ok(result) => {
            crate::log::info(&result.message);
            Ok(result)
        }
        Err(err) => {
            let message = failure_message(&err);
            crate::log::warn(&message);
            Err(JsValue::from_str(&message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetpress_core::decode::Raster;
    use budgetpress_core::encode::{encode, Codec};
    use std::cell::Cell;

    struct TestClock(Cell<f64>);

    impl Clock for TestClock {
        fn now_ms(&self) -> f64 {
            let now = self.0.get();
            self.0.set(now + 1.0);
            now
        }
    }

    fn upload() -> Vec<u8> {
        let pixels: Vec<u8> = (0..64 * 48 * 3).map(|i| (i * 13 % 256) as u8).collect();
        encode(&Raster::new(64, 48, pixels), Codec::Png, 0).unwrap()
    }

    #[test]
    fn test_run_reports_success() {
        let bytes = upload();
        let clock = TestClock(Cell::new(0.0));

        let result = run(&bytes, "scan.png", &CompressOptions::default(), &clock).unwrap();

        assert!(result.target_met());
        assert_eq!(result.file_name(), "scan-compressed.jpg");
        assert_eq!(result.mime_type(), "image/jpeg");
        assert_eq!(result.original_size(), bytes.len());
        assert!(result.message().starts_with("Done. Image compressed to target size"));
        assert_eq!(&result.bytes()[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_run_best_effort_message() {
        let bytes = upload();
        let clock = TestClock(Cell::new(0.0));

        let result = run(&bytes, "scan.png", &CompressOptions::with_target(10), &clock).unwrap();

        assert!(!result.target_met());
        assert!(result.message().starts_with("Done. Could not reach 10 B exactly"));
    }

    #[test]
    fn test_run_decode_failure() {
        let clock = TestClock(Cell::new(0.0));
        let result = run(b"broken", "x.jpg", &CompressOptions::default(), &clock);
        assert!(matches!(result, Err(CompressError::ImageDecodeFailed(_))));
    }

    #[test]
    fn test_run_times_out() {
        let bytes = upload();
        let clock = TestClock(Cell::new(0.0));
        let mut options = CompressOptions::with_target(10);
        options.timeout_ms = Some(3);

        let result = run(&bytes, "x.png", &options, &clock);
        assert!(matches!(result, Err(CompressError::SearchTimedOut { .. })));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compress_to_target_rejects_garbage() {
        assert!(compress_to_target(&[1, 2, 3], "x.jpg", 1024).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_with_options_undefined_uses_defaults() {
        let bytes = budgetpress_core::encode::encode(
            &budgetpress_core::decode::Raster::filled(16, 16, [10, 20, 30]),
            budgetpress_core::encode::Codec::Png,
            0,
        )
        .unwrap();

        let result = compress_with_options(&bytes, "a.png", JsValue::UNDEFINED).unwrap();
        assert!(result.target_met());
    }
}

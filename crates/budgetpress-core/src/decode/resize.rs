//! Raster resizing for the shrink rounds of the compressor.
//!
//! All functions return new `Raster` instances without modifying the input.

use super::{DecodeError, FilterType, Raster};

/// Resize a raster to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is
/// zero, and `DecodeError::CorruptedFile` if the source buffer does not match
/// its declared dimensions.
pub fn resize(
    raster: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if raster.width == width && raster.height == height {
        return Ok(raster.clone());
    }

    let rgb_image = raster
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(Raster::from_rgb_image(resized))
}

/// Scale both sides by `factor`, rounding to the nearest pixel and never
/// dropping below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let scale = |side: u32| ((side as f64 * factor).round() as u32).max(1);
    (scale(width), scale(height))
}

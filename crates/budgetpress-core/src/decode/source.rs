//! Source image decoding with EXIF orientation and alpha flattening.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, RgbImage};
use tracing::debug;

use super::{DecodeError, Orientation, Raster, SourceFormat};

/// Sniff the source format from magic bytes.
///
/// Returns `None` for anything that is not JPEG, PNG or WebP.
pub fn detect_format(bytes: &[u8]) -> Option<SourceFormat> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
        image::ImageFormat::Png => Some(SourceFormat::Png),
        image::ImageFormat::WebP => Some(SourceFormat::WebP),
        _ => None,
    }
}

/// Decode an uploaded JPEG, PNG or WebP file into an RGB raster.
///
/// EXIF orientation is applied so the raster is upright, the way a browser
/// presents the image before drawing it. Transparent pixels are composited
/// onto black, which is what a canvas produces when exported to JPEG.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the bytes are not one of the
/// accepted formats, and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    decode_oriented(bytes).map(flatten_alpha)
}

/// Decode an upload and apply its EXIF orientation, keeping every channel.
///
/// The format converter uses this so PNG and WebP outputs keep transparency.
pub fn decode_oriented(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let format = detect_format(bytes).ok_or(DecodeError::UnsupportedFormat)?;
    let orientation = extract_orientation(bytes);

    let img = image::load_from_memory_with_format(bytes, format.to_image_format())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }

    debug!(
        ?format,
        ?orientation,
        width = img.width(),
        height = img.height(),
        has_alpha = img.color().has_alpha(),
        "Source image decoded"
    );

    Ok(apply_orientation(img, orientation))
}

/// Extract EXIF orientation value from file bytes.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Composite onto black and drop the alpha channel.
pub fn flatten_alpha(img: DynamicImage) -> Raster {
    if !img.color().has_alpha() {
        return Raster::from_rgb_image(img.into_rgb8());
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);
    for (src, dst) in rgba.pixels().zip(out.pixels_mut()) {
        let [r, g, b, a] = src.0;
        let a = a as u16;
        dst.0 = [
            ((r as u16 * a + 127) / 255) as u8,
            ((g as u16 * a + 127) / 255) as u8,
            ((b as u16 * a + 127) / 255) as u8,
        ];
    }
    Raster::from_rgb_image(out)
}

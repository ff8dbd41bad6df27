//! User-facing sizes, status lines and download names.

use std::fmt::Display;

use crate::compress::SearchStatus;
use crate::encode::Codec;

/// Suffix appended to the base name of compressed downloads.
pub const COMPRESSED_SUFFIX: &str = "-compressed";

/// Base name used when the upload has no usable name.
pub const FALLBACK_BASE_NAME: &str = "image";

/// Format a byte count as `B`, `KB` (one decimal) or `MB` (two decimals).
pub fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / KIB)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB)
    }
}

/// Summary line for a finished search.
pub fn status_message(
    status: SearchStatus,
    original_size: usize,
    compressed_size: usize,
    target_bytes: usize,
) -> String {
    let sizes = format!(
        "{} → {}",
        format_size(original_size),
        format_size(compressed_size)
    );
    match status {
        SearchStatus::TargetMet => format!("Done. Image compressed to target size ({sizes})."),
        SearchStatus::BudgetNotMet => format!(
            "Done. Could not reach {} exactly, but generated the smallest safe version ({sizes}).",
            format_size(target_bytes)
        ),
    }
}

/// Summary line for a search that ended in an error.
pub fn failure_message(error: &dyn Display) -> String {
    format!("Compression failed: {error}")
}

/// Summary line for a finished conversion.
pub fn convert_success_message() -> String {
    "Done. Download your converted file.".to_string()
}

/// Summary line for a conversion that ended in an error.
pub fn convert_failure_message(error: &dyn Display) -> String {
    format!("Conversion failed: {error}")
}

/// Strip directories and the final extension from an upload name.
///
/// Returns `None` when nothing usable is left.
pub fn base_name(file_name: &str) -> Option<&str> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();

    let stem = match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => &name[..dot],
        _ => name,
    };

    let stem = stem.trim();
    (!stem.is_empty()).then_some(stem)
}

/// Download name: `<base><suffix>.<ext>`, falling back to `fallback` as the
/// base when the upload name is empty.
pub fn output_file_name(file_name: &str, suffix: &str, codec: Codec, fallback: &str) -> String {
    let base = base_name(file_name).unwrap_or(fallback);
    format!("{base}{suffix}.{}", codec.extension())
}

/// Download name for a compressed upload.
pub fn compressed_file_name(file_name: &str, codec: Codec) -> String {
    output_file_name(file_name, COMPRESSED_SUFFIX, codec, FALLBACK_BASE_NAME)
}

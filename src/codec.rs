//! Conversion between raster images and their Base64 text form.
//!
//! Images travel to the host as Base64-encoded PNG bytes. Fields that expect
//! an inline-renderable value need the [`HEADER_MARKER`] prefix, while storage
//! and raw transports use the bare payload. One flag at encode time picks the
//! form.
//!
//! Decoding is fail-soft: malformed text or image bytes are logged and turn
//! into `None`, so a corrupt image degrades to "nothing rendered".

use std::io::Cursor;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, RgbaImage};

use crate::error::CodecError;

/// Prefix that marks Base64 PNG data as a data URI.
pub const HEADER_MARKER: &str = "data:image/png;base64,";

/// Loads the image at `path` and encodes it as Base64 PNG.
///
/// Returns `None` when `path` is not an existing file. A file that exists
/// but cannot be read or decoded is logged and also yields `None`.
pub fn encode_file(path: impl AsRef<Path>, with_header: bool) -> Option<String> {
    let path = path.as_ref();
    if !path.is_file() {
        log::debug!("image file not found: {}", path.display());
        return None;
    }

    match try_encode_file(path, with_header) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            log::warn!("failed to encode image file {}: {}", path.display(), e);
            None
        }
    }
}

fn try_encode_file(path: &Path, with_header: bool) -> Result<String, CodecError> {
    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory(&bytes)?.to_rgba8();
    encode_image(&image, with_header)
}

/// Encodes an in-memory image as Base64 PNG.
///
/// The [`HEADER_MARKER`] is prepended iff `with_header` is true.
pub fn encode_image(image: &RgbaImage, with_header: bool) -> Result<String, CodecError> {
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let payload = general_purpose::STANDARD.encode(&png);
    if with_header {
        Ok(format!("{HEADER_MARKER}{payload}"))
    } else {
        Ok(payload)
    }
}

/// Removes the [`HEADER_MARKER`] if `encoded` starts with it.
///
/// A string without the marker is returned unchanged, so stripping twice is
/// the same as stripping once.
pub fn strip_header(encoded: &str) -> &str {
    encoded.strip_prefix(HEADER_MARKER).unwrap_or(encoded)
}

/// Decodes a Base64 image string, with or without the header marker.
///
/// Surrounding whitespace and MIME-style line breaks inside the payload are
/// ignored. Any failure is logged and returned as `None`.
pub fn decode(encoded: &str) -> Option<RgbaImage> {
    match try_decode(encoded) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!(
                "failed to decode base64 image ({} chars): {}",
                encoded.len(),
                e
            );
            None
        }
    }
}

fn try_decode(encoded: &str) -> Result<RgbaImage, CodecError> {
    let payload: String = strip_header(encoded.trim())
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = general_purpose::STANDARD.decode(payload)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

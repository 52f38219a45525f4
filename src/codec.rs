//! Boundary between transport encodings and pixels.
//!
//! Uploads arrive as base64 (optionally wrapped in a `data:` URL) holding
//! PNG or JPEG bytes. Results leave as RGBA PNGs, base64 encoded for JSON.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use nonogram_core::RasterImage;

use crate::error::CodecError;

/// Strip an optional `data:image/...;base64,` prefix and whitespace.
fn base64_payload(input: &str) -> String {
    let trimmed = input.trim();
    let payload = match trimmed.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, data)| data),
        None => trimmed,
    };
    payload.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}

/// Decode a base64 upload into pixels.
///
/// `max_bytes` bounds the decoded file size, checked before image decoding.
pub fn decode_base64_image(input: &str, max_bytes: usize) -> Result<RasterImage, CodecError> {
    let payload = base64_payload(input);
    if payload.is_empty() {
        return Err(CodecError::Empty);
    }

    // Upper bound of the decoded size; rejects oversized uploads cheaply.
    let estimated = payload.len() / 4 * 3;
    if estimated > max_bytes.saturating_add(3) {
        return Err(CodecError::TooLarge {
            size: estimated,
            max: max_bytes,
        });
    }

    let bytes = STANDARD.decode(payload.as_bytes())?;
    if bytes.len() > max_bytes {
        return Err(CodecError::TooLarge {
            size: bytes.len(),
            max: max_bytes,
        });
    }
    decode_image_bytes(&bytes)
}

/// Decode PNG or JPEG file contents into pixels.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<RasterImage, CodecError> {
    if bytes.is_empty() {
        return Err(CodecError::Empty);
    }
    let image = RasterImage::from(image::load_from_memory(bytes)?);
    if image.is_empty() {
        return Err(CodecError::ZeroArea {
            width: image.width(),
            height: image.height(),
        });
    }
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "Decoded image"
    );
    Ok(image)
}

/// Encode as an 8-bit RGBA PNG.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, CodecError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

pub fn encode_base64_png(image: &RasterImage) -> Result<String, CodecError> {
    Ok(STANDARD.encode(encode_png(image)?))
}

//! Test fixtures: synthetic photos and request bodies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Uniform gray photo
pub fn gray(width: u32, height: u32, level: u8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([level, level, level, 255]))
}

/// Left half black, right half white
pub fn half_dark(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

/// White subject square in the middle third on a black background
pub fn center_mask(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= width / 3 && x < 2 * width / 3 && y >= height / 3 && y < 2 * height / 3;
        if inside {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("Failed to encode PNG fixture");
    buf.into_inner()
}

pub fn jpeg_bytes(image: &RgbaImage) -> Vec<u8> {
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).into_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 95)
        .encode_image(&rgb)
        .expect("Failed to encode JPEG fixture");
    buf
}

pub fn png_base64(image: &RgbaImage) -> String {
    STANDARD.encode(png_bytes(image))
}

/// Save a PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(image)).expect("Failed to write PNG fixture");
    path
}

/// Minimal generation request body
pub fn generate_body(image_base64: &str, difficulty: &str) -> Value {
    json!({
        "imageBase64": image_base64,
        "difficulty": difficulty,
    })
}

/// Decode a base64 PNG from a response
pub fn decode_png(base64_png: &str) -> RgbaImage {
    let bytes = STANDARD.decode(base64_png).expect("Invalid base64 in response");
    image::load_from_memory(&bytes)
        .expect("Invalid PNG in response")
        .into_rgba8()
}

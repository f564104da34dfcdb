//! Test fixtures and constants.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

/// Solid RGBA image
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    rgba.iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect()
}

/// Horizontal gray ramp from black to white
pub fn gray_ramp(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..height {
        for x in 0..width {
            let v = (x * 255 / (width - 1).max(1)) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    pixels
}

/// Left half red, right half blue
pub fn two_tone(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..height {
        for x in 0..width {
            if x < width / 2 {
                pixels.extend_from_slice(&[220, 20, 20, 255]);
            } else {
                pixels.extend_from_slice(&[20, 20, 220, 255]);
            }
        }
    }
    pixels
}

/// JSON image fields for a request body
pub fn image_body(width: u32, height: u32, pixels: &[u8]) -> Value {
    json!({
        "width": width,
        "height": height,
        "pixels": STANDARD.encode(pixels),
    })
}

/// Merge `extra` fields into an image body
pub fn with_fields(mut body: Value, extra: Value) -> Value {
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            body.insert(key.clone(), value.clone());
        }
    }
    body
}

//! PNG decoding to and encoding from RGBA8 pixel buffers.

use dither_core::PixelBuffer;

use crate::error::ImageError;

/// Decode a PNG into an RGBA8 buffer.
///
/// Palette, grayscale and 16-bit images are expanded and stripped to 8 bits
/// per channel first; missing alpha becomes fully opaque.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, ImageError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut raw = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut raw)?;
    raw.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::Unsupported(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let pixel_count = info.width as usize * info.height as usize;
    let rgba = match info.color_type {
        png::ColorType::Rgba => raw,
        png::ColorType::Rgb => expand(&raw, pixel_count, 3, |px| [px[0], px[1], px[2], 255]),
        png::ColorType::GrayscaleAlpha => {
            expand(&raw, pixel_count, 2, |px| [px[0], px[0], px[0], px[1]])
        }
        png::ColorType::Grayscale => expand(&raw, pixel_count, 1, |px| [px[0], px[0], px[0], 255]),
        png::ColorType::Indexed => {
            return Err(ImageError::Unsupported(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );

    Ok(PixelBuffer::new(info.width, info.height, rgba)?)
}

fn expand(
    raw: &[u8],
    pixel_count: usize,
    channels: usize,
    f: impl Fn(&[u8]) -> [u8; 4],
) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixel_count * 4);
    for px in raw.chunks_exact(channels) {
        rgba.extend_from_slice(&f(px));
    }
    rgba
}

/// Encode an RGBA8 buffer as PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, ImageError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(buffer.as_bytes())?;
    }
    Ok(out)
}

/// Read and decode a PNG file.
pub fn read_png(path: &std::path::Path) -> Result<PixelBuffer, ImageError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Encode and write a PNG file.
pub fn write_png(path: &std::path::Path, buffer: &PixelBuffer) -> Result<(), ImageError> {
    let bytes = encode_png(buffer)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

//! PNG adapter feeding the engine, as the CLI does.

use dither_core::{ColorQuantizer, ExtractionMethod, Palette, PaletteExtractor, PixelBuffer, Rgb};
use ditherkit::error::ImageError;
use ditherkit::rendering::{decode_png, encode_png, read_png, write_png};
use pretty_assertions::assert_eq;

fn ramp(width: u32) -> PixelBuffer {
    let data = (0..width)
        .flat_map(|x| {
            let v = (x * 255 / (width - 1)) as u8;
            [v, v / 2, 255 - v, 255]
        })
        .collect();
    PixelBuffer::new(width, 1, data).unwrap()
}

#[test]
fn test_quantize_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_png(&input, &ramp(32)).unwrap();

    let buffer = read_png(&input).unwrap();
    let palette = Palette::from_hex(&["#000000", "#ffffff", "#ff0000"]).unwrap();
    let result = ColorQuantizer::new(palette).quantize(buffer);
    write_png(&output, &result.buffer).unwrap();

    let written = read_png(&output).unwrap();
    assert_eq!(written, result.buffer);
    for (color, _) in written.pixels() {
        assert!([Rgb::BLACK, Rgb::WHITE, Rgb::new(255, 0, 0)].contains(&color));
    }
}

#[test]
fn test_extract_from_decoded_png() {
    let png = encode_png(&ramp(16)).unwrap();
    let buffer = decode_png(&png).unwrap();

    let colors = PaletteExtractor::new(ExtractionMethod::Frequency)
        .size(4)
        .extract(&buffer);
    assert_eq!(colors.len(), 4);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_png(&dir.path().join("absent.png"));
    assert!(matches!(result, Err(ImageError::Io(_))));
}

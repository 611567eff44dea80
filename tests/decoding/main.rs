use miniz_oxide::deflate::compress_to_vec_zlib;
use pngify::{encode_chunk, ColorType, DecodeOptions, Pixel, PngError, PNG};

const SIGNATURE: &[u8] = b"\x89PNG\x0d\x0a\x1a\x0a";

fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
    let mut data = width.to_be_bytes().to_vec();
    data.extend(height.to_be_bytes());
    data.extend([bit_depth, color_type, 0, 0, 0]);
    data
}

/// Builds a PNG stream by hand, compressing `scanlines` into one IDAT.
fn build_png(header: &[u8], palette: Option<&[u8]>, scanlines: &[u8]) -> Vec<u8> {
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(encode_chunk(b"IHDR", header).unwrap());
    if let Some(palette) = palette {
        bytes.extend(encode_chunk(b"PLTE", palette).unwrap());
    }
    bytes.extend(encode_chunk(b"IDAT", &compress_to_vec_zlib(scanlines, 6)).unwrap());
    bytes.extend(encode_chunk(b"IEND", &[]).unwrap());
    bytes
}

#[test]
fn expands_each_color_type_to_rgba() {
    let cases: [(u8, Option<&[u8]>, &[u8], Pixel, ColorType); 5] = [
        (0, None, &[0, 128], Pixel::new(128, 128, 128, 255), ColorType::Greyscale),
        (2, None, &[0, 10, 20, 30], Pixel::new(10, 20, 30, 255), ColorType::Truecolor),
        (3, Some(&[10, 20, 30]), &[0, 0], Pixel::new(10, 20, 30, 255), ColorType::IndexedColor),
        (4, None, &[0, 200, 50], Pixel::new(200, 200, 200, 50), ColorType::GreyscaleWithAlpha),
        (6, None, &[0, 1, 2, 3, 4], Pixel::new(1, 2, 3, 4), ColorType::TruecolorWithAlpha),
    ];
    for (code, palette, scanlines, expected, color_type) in cases {
        let bytes = build_png(&ihdr(1, 1, 8, code), palette, scanlines);
        let image = PNG::decode(&bytes).unwrap();
        assert_eq!(image.color_type(), color_type);
        assert_eq!((image.width(), image.height()), (1, 1));
        assert_eq!(image.pixels().pixels(), [expected], "color type {code}");
    }
}

#[test]
fn decodes_rows_in_order() {
    let scanlines = [0, 1, 2, 3, 0, 4, 5, 6];
    let bytes = build_png(&ihdr(3, 2, 8, 0), None, &scanlines);
    let image = PNG::decode(&bytes).unwrap();
    let values: Vec<u8> = image.pixels().pixels().iter().map(|p| p.red).collect();
    assert_eq!(values, [1, 2, 3, 4, 5, 6]);
    assert_eq!(image.get_pixel(0, 1), Some(Pixel::grey(4, 255)));
}

#[test]
fn idat_may_be_split() {
    let compressed = compress_to_vec_zlib(&[0, 9, 8, 7, 0, 6, 5, 4], 6);
    let (first, second) = compressed.split_at(compressed.len() / 2);
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(encode_chunk(b"IHDR", &ihdr(1, 2, 8, 2)).unwrap());
    bytes.extend(encode_chunk(b"IDAT", first).unwrap());
    bytes.extend(encode_chunk(b"gAMA", &[0, 0, 0xb1, 0x8f]).unwrap());
    bytes.extend(encode_chunk(b"IDAT", second).unwrap());
    bytes.extend(encode_chunk(b"IEND", &[]).unwrap());

    let image = PNG::decode(&bytes).unwrap();
    assert_eq!(
        image.pixels().pixels(),
        [Pixel::opaque(9, 8, 7), Pixel::opaque(6, 5, 4)]
    );
}

#[test]
fn altered_signature_is_rejected() {
    let bytes = build_png(&ihdr(1, 1, 8, 0), None, &[0, 1]);
    for i in 0..8 {
        let mut bad = bytes.clone();
        bad[i] ^= 0x20;
        assert!(
            matches!(PNG::decode(&bad), Err(PngError::InvalidSignature)),
            "byte {i}"
        );
    }
}

#[test]
fn unknown_color_type_is_rejected() {
    let bytes = build_png(&ihdr(1, 1, 8, 5), None, &[0, 1]);
    assert!(matches!(
        PNG::decode(&bytes),
        Err(PngError::UnsupportedColorType(5))
    ));
}

#[test]
fn other_bit_depths_are_rejected() {
    let bytes = build_png(&ihdr(1, 1, 16, 0), None, &[0, 1, 2]);
    assert!(matches!(
        PNG::decode(&bytes),
        Err(PngError::UnsupportedBitDepth(16))
    ));
}

#[test]
fn indexed_without_palette_fails() {
    let bytes = build_png(&ihdr(1, 1, 8, 3), None, &[0, 0]);
    assert!(matches!(PNG::decode(&bytes), Err(PngError::MissingPalette)));
}

#[test]
fn palette_length_must_be_multiple_of_three() {
    let bytes = build_png(&ihdr(1, 1, 8, 3), Some(&[1, 2, 3, 4, 5]), &[0, 0]);
    assert!(matches!(
        PNG::decode(&bytes),
        Err(PngError::MalformedPalette(5))
    ));
}

#[test]
fn palette_index_out_of_range_fails() {
    let bytes = build_png(&ihdr(2, 1, 8, 3), Some(&[1, 2, 3]), &[0, 0, 1]);
    assert!(matches!(
        PNG::decode(&bytes),
        Err(PngError::PaletteIndexOutOfRange { index: 1, len: 1 })
    ));
}

#[test]
fn corrupt_image_data_fails() {
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(encode_chunk(b"IHDR", &ihdr(1, 1, 8, 0)).unwrap());
    bytes.extend(encode_chunk(b"IDAT", b"definitely not zlib").unwrap());
    bytes.extend(encode_chunk(b"IEND", &[]).unwrap());
    assert!(matches!(
        PNG::decode(&bytes),
        Err(PngError::DecompressionError(_))
    ));
}

#[test]
fn crc_is_verified_unless_disabled() {
    let mut bytes = build_png(&ihdr(1, 1, 8, 0), None, &[0, 77]);
    // Last byte of the IHDR CRC trailer.
    bytes[8 + 8 + 13 + 3] ^= 0xff;
    assert!(matches!(
        PNG::decode(&bytes),
        Err(PngError::ChecksumMismatch { ref chunk_type, .. }) if chunk_type == "IHDR"
    ));

    let lenient = DecodeOptions {
        verify_checksums: false,
    };
    let image = PNG::decode_with(&bytes, &lenient).unwrap();
    assert_eq!(image.get_pixel(0, 0), Some(Pixel::grey(77, 255)));
}

#[test]
fn truncated_stream_fails() {
    let bytes = build_png(&ihdr(1, 1, 8, 0), None, &[0, 1]);
    let without_iend = &bytes[..bytes.len() - 12];
    assert!(matches!(
        PNG::decode(without_iend),
        Err(PngError::Truncated(_))
    ));
    assert!(matches!(
        PNG::decode(&bytes[..bytes.len() - 3]),
        Err(PngError::Truncated(_))
    ));
}

#[test]
fn iend_with_payload_is_rejected() {
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(encode_chunk(b"IHDR", &ihdr(1, 1, 8, 0)).unwrap());
    bytes.extend(encode_chunk(b"IDAT", &compress_to_vec_zlib(&[0, 1], 6)).unwrap());
    bytes.extend(encode_chunk(b"IEND", b"junk").unwrap());
    assert!(matches!(
        PNG::decode(&bytes),
        Err(PngError::MalformedEnd(4))
    ));
}

#[test]
fn oversized_image_data_is_rejected() {
    // A 1x1 header whose image data inflates to 1 MiB.
    let bytes = build_png(&ihdr(1, 1, 8, 0), None, &vec![0; 1 << 20]);
    assert!(matches!(
        PNG::decode(&bytes),
        Err(PngError::DecompressionError(_))
    ));

    // Modest trailing data is still tolerated.
    let bytes = build_png(&ihdr(1, 1, 8, 0), None, &[0, 42, 0, 0, 0, 0]);
    let image = PNG::decode(&bytes).unwrap();
    assert_eq!(image.get_pixel(0, 0), Some(Pixel::grey(42, 255)));
}

use pngify::{
    decode_chunk, encode, encode_chunk, encode_pixels, resize, Pixel, PixelBuffer, PngError, PNG,
};

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| Pixel::new(x as u8, y as u8, (x ^ y) as u8, (x + y) as u8))
        })
        .collect();
    PixelBuffer::new(width, height, pixels).unwrap()
}

#[test]
fn decode_reverses_encode() {
    for (width, height) in [(1, 1), (3, 2), (2, 3), (17, 5), (64, 64), (0, 0), (0, 4), (4, 0)] {
        let buffer = gradient(width, height);
        let image = PNG::decode(&encode(&buffer).unwrap()).unwrap();
        assert_eq!((image.width(), image.height()), (width, height));
        assert_eq!(image.into_pixels(), buffer, "{width}x{height}");
    }
}

#[test]
fn reencoding_a_decoded_image_is_stable() {
    let bytes = encode(&gradient(9, 7)).unwrap();
    let image = PNG::decode(&bytes).unwrap();
    assert_eq!(image.encode().unwrap(), bytes);
}

#[test]
fn mismatched_buffer_length_is_rejected() {
    let pixels = vec![Pixel::default(); 7];
    assert!(matches!(
        encode_pixels(4, 2, &pixels),
        Err(PngError::InvalidPixelBufferLength {
            expected: 8,
            actual: 7
        })
    ));
}

#[test]
fn chunk_round_trip_and_crc() {
    let payloads: [&[u8]; 3] = [b"", b"x", &[0xff; 300]];
    for payload in payloads {
        let bytes = encode_chunk(b"tEST", payload).unwrap();
        let (rest, chunk) = decode_chunk(&bytes, true).unwrap();
        assert!(rest.is_empty());
        assert_eq!(&chunk.chunk_type, b"tEST");
        assert_eq!(chunk.data, payload);

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(b"tEST");
        hasher.update(payload);
        assert_eq!(bytes[bytes.len() - 4..], hasher.finalize().to_be_bytes());
    }
}

#[test]
fn resize_after_decode() {
    let source = gradient(2, 2);
    let image = PNG::decode(&encode(&source).unwrap()).unwrap();
    let resized = resize(image.pixels(), 4, 4).unwrap();
    assert_eq!(resized.get(3, 3), source.get(1, 1));
    assert_eq!(resized.get(1, 2), source.get(0, 1));
    assert_eq!(resize(&resized, 4, 4).unwrap(), resized);
}

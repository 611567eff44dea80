use thiserror::Error;

use crate::pixel::Pixel;

pub type Result<T, E = PngError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PngError {
    #[error("input doesn't start with expected signature")]
    InvalidSignature,
    #[error("unexpected end of input while reading {0}")]
    Truncated(&'static str),
    #[error("first chunk must be IHDR")]
    MissingHeader,
    #[error("found more than one IHDR chunk")]
    DuplicateHeader,
    #[error("IHDR payload must be 13 bytes, got {0}")]
    MalformedHeader(usize),
    #[error("we don't support color type {0}")]
    UnsupportedColorType(u8),
    #[error("we don't support bit depth {0}")]
    UnsupportedBitDepth(u8),
    #[error("we don't support interlace method {0}")]
    UnsupportedInterlace(u8),
    #[error("chunk payload of {0} bytes doesn't fit a 32 bit length field")]
    ChunkTooLarge(usize),
    #[error("CRC mismatch in {chunk_type} chunk: trailer says {expected:#010x}, data hashes to {actual:#010x}")]
    ChecksumMismatch {
        chunk_type: String,
        expected: u32,
        actual: u32,
    },
    #[error("IEND payload must be empty, got {0} bytes")]
    MalformedEnd(usize),
    #[error("PLTE payload length {0} isn't a multiple of 3")]
    MalformedPalette(usize),
    #[error("indexed image has no PLTE chunk before image data")]
    MissingPalette,
    #[error("failed to decompress image data: {0}")]
    DecompressionError(String),
    #[error("image data too short: expected {expected} bytes, got {actual}")]
    ImageDataTooShort { expected: usize, actual: usize },
    #[error("palette index {index} out of range for a palette of {len} colors")]
    PaletteIndexOutOfRange { index: u8, len: usize },
    #[error("pixel buffer length mismatch: expected {expected} pixels, got {actual}")]
    InvalidPixelBufferLength { expected: usize, actual: usize },
    #[error("image {width}x{height} is too large")]
    ImageTooLarge { width: u32, height: u32 },
    #[error("can't resample an image with no pixels")]
    EmptyImage,
    #[error("invalid target dimensions: {width}x{height}")]
    InvalidTargetDimensions { width: u32, height: u32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Number of pixels in a `width` x `height` image, or `ImageTooLarge` if a
/// buffer of that many pixels couldn't be allocated.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&count| {
            count
                .checked_mul(std::mem::size_of::<Pixel>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(PngError::ImageTooLarge { width, height })
}

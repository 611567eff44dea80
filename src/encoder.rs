use std::io::Write;

use log::debug;

use crate::{
    chunks::{idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, ParseableChunk, SIGNATURE},
    error::Result,
    image_data::compress_data,
    pixel::{check_length, Pixel, PixelBuffer},
    scanlines::build_scanlines,
};

/// Encodes `pixels` as an 8 bit RGBA PNG. The pixel count is checked against
/// `width * height` before anything else happens.
pub fn encode_pixels(width: u32, height: u32, pixels: &[Pixel]) -> Result<Vec<u8>> {
    check_length(width, height, pixels)?;
    let header = IHDRChunk::rgba(width, height);
    let compressed = compress_data(&build_scanlines(width, height, pixels));
    debug!("Encoding {width}x{height} image");

    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(header.to_bytes()?);
    bytes.extend(IDATChunk { data: &compressed }.to_bytes()?);
    bytes.extend(IENDChunk.to_bytes()?);
    Ok(bytes)
}

pub fn encode(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    encode_pixels(buffer.width(), buffer.height(), buffer.pixels())
}

/// Encodes `buffer` completely, then hands the bytes to `writer`.
pub fn write_png<W: Write>(mut writer: W, buffer: &PixelBuffer) -> Result<()> {
    let bytes = encode(buffer)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

use log::debug;
use miniz_oxide::{
    deflate::compress_to_vec_zlib,
    inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus},
};

use crate::error::{PngError, Result};

/// zlib's default trade-off between speed and size.
const COMPRESSION_LEVEL: u8 = 6;

pub(crate) fn compress_data(data: &[u8]) -> Vec<u8> {
    let compressed = compress_to_vec_zlib(data, COMPRESSION_LEVEL);
    debug!(
        "Compressed {} bytes of scanlines into {} bytes",
        data.len(),
        compressed.len()
    );
    compressed
}

/// Inflates `compressed_data`, failing once the output would pass `limit` bytes.
pub(crate) fn decompress_data(compressed_data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let data = decompress_to_vec_zlib_with_limit(compressed_data, limit).map_err(|e| {
        if e.status == TINFLStatus::HasMoreOutput {
            PngError::DecompressionError(format!("image data inflates past {limit} bytes"))
        } else {
            PngError::DecompressionError(e.to_string())
        }
    })?;
    debug!(
        "Decompressed {} bytes of image data into {} bytes",
        compressed_data.len(),
        data.len()
    );
    Ok(data)
}

use log::warn;

use crate::{
    chunks::{
        ihdr::{ColorType, IHDRChunk},
        plte::PLTEChunk,
    },
    error::{pixel_count, PngError, Result},
    pixel::Pixel,
};

/// Filter type byte written in front of every scanline. No other filter is
/// produced or reversed.
const FILTER_NONE: u8 = 0;

/// Lays out RGBA pixels as unfiltered scanlines. `pixels` must already hold
/// exactly `width * height` entries.
pub(crate) fn build_scanlines(width: u32, height: u32, pixels: &[Pixel]) -> Vec<u8> {
    let width = width as usize;
    let mut data = Vec::with_capacity(height as usize * (width * 4 + 1));
    for y in 0..height as usize {
        data.push(FILTER_NONE);
        for pixel in &pixels[y * width..(y + 1) * width] {
            data.extend(pixel.to_rgba());
        }
    }
    data
}

/// Bytes of decompressed scanline data an image described by `header` holds.
pub(crate) fn image_data_len(header: &IHDRChunk) -> Result<usize> {
    header
        .scanline_size()
        .and_then(|size| size.checked_mul(header.height as usize))
        .ok_or(PngError::ImageTooLarge {
            width: header.width,
            height: header.height,
        })
}

/// Expands decompressed scanlines into RGBA pixels, row by row.
pub(crate) fn expand_scanlines(
    data: &[u8],
    header: &IHDRChunk,
    palette: Option<&PLTEChunk>,
) -> Result<Vec<Pixel>> {
    let color_type = header.color_type();
    if color_type == ColorType::IndexedColor && palette.is_none() {
        return Err(PngError::MissingPalette);
    }
    let expected = image_data_len(header)?;
    if data.len() < expected {
        return Err(PngError::ImageDataTooShort {
            expected,
            actual: data.len(),
        });
    }
    if data.len() > expected {
        warn!(
            "Ignoring {} bytes after the last scanline",
            data.len() - expected
        );
    }

    let mut pixels = Vec::with_capacity(pixel_count(header.width, header.height)?);
    let mut filtered_rows = 0;
    let scanline_size = header.scanline_size().ok_or(PngError::ImageTooLarge {
        width: header.width,
        height: header.height,
    })?;
    for scanline in data[..expected].chunks_exact(scanline_size) {
        let (&filter_type, row) = scanline
            .split_first()
            .ok_or(PngError::Truncated("scanline"))?;
        if filter_type != FILTER_NONE {
            filtered_rows += 1;
        }
        for sample in row.chunks_exact(color_type.bytes_per_pixel()) {
            pixels.push(expand_pixel(color_type, sample, palette)?);
        }
    }
    if filtered_rows > 0 {
        warn!("{filtered_rows} scanlines use a filter; they are read as if unfiltered");
    }
    Ok(pixels)
}

fn expand_pixel(
    color_type: ColorType,
    sample: &[u8],
    palette: Option<&PLTEChunk>,
) -> Result<Pixel> {
    let pixel = match (color_type, sample) {
        (ColorType::Greyscale, &[g]) => Pixel::grey(g, u8::MAX),
        (ColorType::Truecolor, &[r, g, b]) => Pixel::opaque(r, g, b),
        (ColorType::IndexedColor, &[index]) => {
            let palette = palette.ok_or(PngError::MissingPalette)?;
            palette
                .get_color(index)
                .ok_or(PngError::PaletteIndexOutOfRange {
                    index,
                    len: palette.len(),
                })?
        }
        (ColorType::GreyscaleWithAlpha, &[g, a]) => Pixel::grey(g, a),
        (ColorType::TruecolorWithAlpha, &[r, g, b, a]) => Pixel::new(r, g, b, a),
        _ => return Err(PngError::Truncated("pixel")),
    };
    Ok(pixel)
}

use std::path::{Path, PathBuf};

use crate::{
    error::{pixel_count, PngError, Result},
    pixel::PixelBuffer,
};

/// Nearest neighbour resize. Target pixel `(x, y)` copies source pixel
/// `(x * old_width / width, y * old_height / height)`, rounded down.
pub fn resize(source: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(PngError::InvalidTargetDimensions { width, height });
    }
    if source.pixels().is_empty() {
        return Err(PngError::EmptyImage);
    }
    let (old_width, old_height) = (u64::from(source.width()), u64::from(source.height()));
    let (new_width, new_height) = (u64::from(width), u64::from(height));
    let src = source.pixels();

    let mut pixels = Vec::with_capacity(pixel_count(width, height)?);
    for i in 0..new_height {
        let source_row = (i * old_height / new_height) * old_width;
        for j in 0..new_width {
            let sx = j * old_width / new_width;
            pixels.push(src[(source_row + sx) as usize]);
        }
    }
    PixelBuffer::new(width, height, pixels)
}

/// `dir/name.png` becomes `dir/name_<width>x<height>.png`.
pub fn resized_path(path: &Path, width: u32, height: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_{width}x{height}.png"))
}

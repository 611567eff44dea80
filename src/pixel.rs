use crate::error::{pixel_count, PngError, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}
impl Pixel {
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, u8::MAX)
    }

    pub fn grey(value: u8, alpha: u8) -> Self {
        Self::new(value, value, value, alpha)
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}
impl From<[u8; 4]> for Pixel {
    fn from([red, green, blue, alpha]: [u8; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

/// Row-major RGBA pixels of a `width` x `height` image.
///
/// The pixel count always equals `width * height`; the only way to build one
/// is through [`PixelBuffer::new`], which checks that.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}
impl PixelBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        check_length(width, height, &pixels)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

pub(crate) fn check_length(width: u32, height: u32, pixels: &[Pixel]) -> Result<()> {
    let expected = pixel_count(width, height)?;
    if pixels.len() != expected {
        return Err(PngError::InvalidPixelBufferLength {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

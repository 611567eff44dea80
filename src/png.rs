use crate::{
    chunks::ihdr::{ColorType, IHDRChunk},
    decoder::{decode, DecodeOptions},
    encoder::encode,
    error::Result,
    pixel::{Pixel, PixelBuffer},
};

/// A decoded image: its header as found in the file and the pixels expanded
/// to RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PNG {
    header: IHDRChunk,
    pixels: PixelBuffer,
}

impl PNG {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, &DecodeOptions::default())
    }

    pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        let (header, pixels) = decode(bytes, options)?;
        Ok(Self { header, pixels })
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Color type the file was stored with. The pixels are always RGBA.
    pub fn color_type(&self) -> ColorType {
        self.header.color_type()
    }

    pub fn header(&self) -> &IHDRChunk {
        &self.header
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.pixels.get(x, y)
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    /// Re-encodes as 8 bit RGBA, whatever the source color type was.
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode(&self.pixels)
    }
}

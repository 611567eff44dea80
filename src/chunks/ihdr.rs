use nom::{
    number::complete::{be_u32, u8},
    sequence::tuple,
    IResult,
};

use super::ParseableChunk;
use crate::error::{PngError, Result};

const IHDR_LENGTH: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub(crate) bit_depth: u8,
    pub(crate) color_type: ColorType,
    pub(crate) compression_method: u8,
    pub(crate) filter_method: u8,
    pub(crate) interlace_method: u8,
}
impl IHDRChunk {
    /// Header for the only layout the encoder writes: 8 bit RGBA, no interlacing.
    pub(crate) fn rgba(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::TruecolorWithAlpha,
            compression_method: 0,
            filter_method: 0,
            interlace_method: 0,
        }
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    pub fn interlace_method(&self) -> u8 {
        self.interlace_method
    }

    /// Fails unless the pixel data is laid out the way the scanline expander
    /// reads it.
    pub(crate) fn check_supported(&self) -> Result<()> {
        if self.bit_depth != 8 {
            return Err(PngError::UnsupportedBitDepth(self.bit_depth));
        }
        if self.interlace_method != 0 {
            return Err(PngError::UnsupportedInterlace(self.interlace_method));
        }
        Ok(())
    }

    /// Bytes in one scanline, including the leading filter type byte.
    pub(crate) fn scanline_size(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.color_type.bytes_per_pixel())?
            .checked_add(1)
    }
}
impl<'a> ParseableChunk<'a> for IHDRChunk {
    type Output = [u8; IHDR_LENGTH];

    const HEADER: &'static [u8; 4] = b"IHDR";

    fn from_data(chunk_data: &'a [u8]) -> Result<Self> {
        if chunk_data.len() != IHDR_LENGTH {
            return Err(PngError::MalformedHeader(chunk_data.len()));
        }
        let (_, (width, height, bit_depth, color_type, compression, filter, interlace)) =
            header_fields(chunk_data).map_err(|_| PngError::MalformedHeader(chunk_data.len()))?;
        Ok(IHDRChunk {
            width,
            height,
            bit_depth,
            color_type: color_type.try_into()?,
            compression_method: compression,
            filter_method: filter,
            interlace_method: interlace,
        })
    }

    fn payload(&self) -> Self::Output {
        let mut bytes = [0; IHDR_LENGTH];
        bytes[0..4].copy_from_slice(&self.width.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.height.to_be_bytes());
        bytes[8..].copy_from_slice(&[
            self.bit_depth,
            self.color_type as u8,
            self.compression_method,
            self.filter_method,
            self.interlace_method,
        ]);
        bytes
    }
}

#[allow(clippy::type_complexity)]
fn header_fields(input: &[u8]) -> IResult<&[u8], (u32, u32, u8, u8, u8, u8, u8)> {
    tuple((be_u32, be_u32, u8, u8, u8, u8, u8))(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale = 0,
    Truecolor = 2,
    IndexedColor = 3,
    GreyscaleWithAlpha = 4,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = PngError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleWithAlpha),
            6 => Ok(Self::TruecolorWithAlpha),
            i => Err(PngError::UnsupportedColorType(i)),
        }
    }
}
impl ColorType {
    /// Bytes per pixel at a bit depth of 8.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Greyscale => 1,
            Self::IndexedColor => 1,
            Self::GreyscaleWithAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }
}

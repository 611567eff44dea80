use nom::{bytes::complete::take, combinator::map, multi::count, IResult};

use super::ParseableChunk;
use crate::{
    error::{PngError, Result},
    pixel::Pixel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry(pub u8, pub u8, pub u8);

/// Colour table for indexed images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PLTEChunk {
    colors: Vec<Entry>,
}
impl PLTEChunk {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub(crate) fn get_color(&self, index: u8) -> Option<Pixel> {
        let Entry(red, green, blue) = *self.colors.get(index as usize)?;
        Some(Pixel::opaque(red, green, blue))
    }
}
impl<'a> ParseableChunk<'a> for PLTEChunk {
    type Output = Vec<u8>;

    const HEADER: &'static [u8; 4] = b"PLTE";

    fn from_data(chunk_data: &'a [u8]) -> Result<Self> {
        if chunk_data.len() % 3 != 0 {
            return Err(PngError::MalformedPalette(chunk_data.len()));
        }
        let (_, colors) = entries(chunk_data, chunk_data.len() / 3)
            .map_err(|_| PngError::MalformedPalette(chunk_data.len()))?;
        Ok(PLTEChunk { colors })
    }

    fn payload(&self) -> Self::Output {
        self.colors
            .iter()
            .flat_map(|Entry(r, g, b)| [*r, *g, *b])
            .collect()
    }
}

fn entries(input: &[u8], entry_count: usize) -> IResult<&[u8], Vec<Entry>> {
    count(
        map(take(3usize), |i: &[u8]| Entry(i[0], i[1], i[2])),
        entry_count,
    )(input)
}

use super::ParseableChunk;
use crate::error::Result;

/// One fragment of the zlib stream. A stream may be split over many of these.
#[derive(Debug)]
pub(crate) struct IDATChunk<'a> {
    pub(crate) data: &'a [u8],
}
impl<'a> ParseableChunk<'a> for IDATChunk<'a> {
    type Output = &'a [u8];

    const HEADER: &'static [u8; 4] = b"IDAT";

    fn from_data(chunk_data: &'a [u8]) -> Result<Self> {
        Ok(IDATChunk { data: chunk_data })
    }

    fn payload(&self) -> Self::Output {
        self.data
    }
}

use super::ParseableChunk;
use crate::error::{PngError, Result};

pub(crate) struct IENDChunk;
impl<'a> ParseableChunk<'a> for IENDChunk {
    type Output = [u8; 0];

    const HEADER: &'static [u8; 4] = b"IEND";

    fn from_data(chunk_data: &'a [u8]) -> Result<Self> {
        if !chunk_data.is_empty() {
            return Err(PngError::MalformedEnd(chunk_data.len()));
        }
        Ok(Self)
    }

    fn payload(&self) -> Self::Output {
        []
    }
}

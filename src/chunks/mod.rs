use nom::{
    bytes::complete::{tag, take},
    combinator::map_res,
    number::complete::be_u32,
    sequence::tuple,
    IResult,
};

use crate::error::{PngError, Result};

pub mod idat;
pub mod iend;
pub mod ihdr;
pub mod plte;

pub const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

/// Bytes a chunk adds around its payload: length, type and CRC.
pub(crate) const CHUNK_OVERHEAD: usize = 12;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub(crate) enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    PLTE(plte::PLTEChunk),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}
impl<'a> Chunk<'a> {
    pub(crate) fn parse(raw: RawChunk<'a>) -> Result<Self> {
        match &raw.chunk_type {
            b"IHDR" => Ok(Chunk::IHDR(ihdr::IHDRChunk::from_data(raw.data)?)),
            b"PLTE" => Ok(Chunk::PLTE(plte::PLTEChunk::from_data(raw.data)?)),
            b"IDAT" => Ok(Chunk::IDAT(idat::IDATChunk::from_data(raw.data)?)),
            b"IEND" => {
                iend::IENDChunk::from_data(raw.data)?;
                Ok(Chunk::IEND)
            }
            _ => Ok(Chunk::Unknown(raw)),
        }
    }
}

/// A chunk as it sits on the wire, before its payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'a> {
    pub chunk_type: [u8; 4],
    pub data: &'a [u8],
    pub crc: u32,
}
impl RawChunk<'_> {
    pub fn chunk_type_str(&self) -> String {
        String::from_utf8_lossy(&self.chunk_type).into_owned()
    }

    /// Critical chunks have an uppercase first letter.
    pub fn is_critical(&self) -> bool {
        self.chunk_type[0].is_ascii_uppercase()
    }

    pub fn computed_crc(&self) -> u32 {
        chunk_crc(&self.chunk_type, self.data)
    }
}

pub fn parse_signature(input: &[u8]) -> Result<&[u8]> {
    let (rest, _) = signature(input).map_err(|_| PngError::InvalidSignature)?;
    Ok(rest)
}

fn signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(SIGNATURE)(input)
}

/// Frames `data` as a chunk of type `chunk_type`: length, type, data, CRC.
/// Fails with `ChunkTooLarge` if `data` is longer than `u32::MAX` bytes.
pub fn encode_chunk(chunk_type: &[u8; 4], data: &[u8]) -> Result<Vec<u8>> {
    let length = payload_length(data.len())?;
    let mut bytes = Vec::with_capacity(data.len() + CHUNK_OVERHEAD);
    bytes.extend(length.to_be_bytes());
    bytes.extend(chunk_type);
    bytes.extend(data);
    bytes.extend(chunk_crc(chunk_type, data).to_be_bytes());
    Ok(bytes)
}

fn payload_length(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| PngError::ChunkTooLarge(len))
}

pub(crate) fn chunk_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    hasher.finalize()
}

/// Reads one chunk off the front of `input`, returning it with the bytes that
/// follow it. With `verify_crc` the trailer is checked against the type and
/// payload.
pub fn decode_chunk(input: &[u8], verify_crc: bool) -> Result<(&[u8], RawChunk<'_>)> {
    let (rest, chunk) = raw_chunk(input).map_err(|_| PngError::Truncated("chunk"))?;
    if verify_crc {
        let actual = chunk.computed_crc();
        if actual != chunk.crc {
            return Err(PngError::ChecksumMismatch {
                chunk_type: chunk.chunk_type_str(),
                expected: chunk.crc,
                actual,
            });
        }
    }
    Ok((rest, chunk))
}

fn raw_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let (input, length) = be_u32(input)?;
    let (input, (chunk_type, data, crc)) = tuple((
        map_res(take(4usize), |v: &[u8]| <[u8; 4]>::try_from(v)),
        take(length),
        be_u32,
    ))(input)?;
    Ok((
        input,
        RawChunk {
            chunk_type,
            data,
            crc,
        },
    ))
}

/// Iterates the chunks that follow the signature. Stops after IEND, after the
/// first error, or when the input runs out.
pub fn iter_chunks(source: &[u8], verify_crc: bool) -> ChunkIter<'_> {
    ChunkIter {
        source,
        verify_crc,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    verify_crc: bool,
    finished: bool,
}
impl<'a> ChunkIter<'a> {
    /// Bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.source
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<RawChunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.source.is_empty() {
            return None;
        }
        match decode_chunk(self.source, self.verify_crc) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if &chunk.chunk_type == iend::IENDChunk::HEADER {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// A chunk type with a known payload layout.
pub trait ParseableChunk<'a>: Sized {
    type Output: AsRef<[u8]>;
    const HEADER: &'static [u8; 4];

    fn from_data(chunk_data: &'a [u8]) -> Result<Self>;
    fn payload(&self) -> Self::Output;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_chunk(Self::HEADER, self.payload().as_ref())
    }
}

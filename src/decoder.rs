use log::{debug, trace, warn};

use crate::{
    chunks::{
        idat::IDATChunk, ihdr::IHDRChunk, iter_chunks, parse_signature, plte::PLTEChunk, Chunk,
        ChunkIter, ParseableChunk,
    },
    error::{PngError, Result},
    image_data::decompress_data,
    pixel::PixelBuffer,
    scanlines::{expand_scanlines, image_data_len},
};

/// How far decompressed image data may run past the last scanline before
/// decoding gives up.
const MAX_TRAILING_DATA: usize = 64 * 1024;

/// Knobs for [`crate::PNG::decode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Compare each chunk's CRC trailer against its contents. Turning this off
    /// lets files with corrupt checksums through.
    pub verify_checksums: bool,
}
impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            verify_checksums: true,
        }
    }
}

pub(crate) struct PNGDecoder<'a, State> {
    chunks: ChunkIter<'a>,
    state: State,
}

pub(crate) struct Start;
pub(crate) struct Chunks {
    header: IHDRChunk,
}

/// Everything gathered from the chunk stream, ready to be expanded.
pub(crate) struct ImageData {
    pub(crate) header: IHDRChunk,
    pub(crate) palette: Option<PLTEChunk>,
    pub(crate) compressed: Vec<u8>,
}

impl<'a> PNGDecoder<'a, Start> {
    pub(crate) fn new(data: &'a [u8], options: &DecodeOptions) -> Result<Self> {
        let rest = parse_signature(data)?;
        Ok(Self {
            chunks: iter_chunks(rest, options.verify_checksums),
            state: Start,
        })
    }

    pub(crate) fn parse_ihdr(mut self) -> Result<PNGDecoder<'a, Chunks>> {
        let raw = self
            .chunks
            .next()
            .ok_or(PngError::Truncated("IHDR chunk"))??;
        if &raw.chunk_type != IHDRChunk::HEADER {
            return Err(PngError::MissingHeader);
        }
        let header = IHDRChunk::from_data(raw.data)?;
        debug!("{header:?}");
        header.check_supported()?;
        Ok(PNGDecoder {
            chunks: self.chunks,
            state: Chunks { header },
        })
    }
}

impl PNGDecoder<'_, Chunks> {
    /// Scans the remaining chunks up to IEND, concatenating IDAT payloads in
    /// file order. The palette is frozen once the first IDAT has been seen.
    pub(crate) fn collect_image_data(mut self) -> Result<ImageData> {
        let mut palette = None;
        let mut compressed = Vec::new();
        let mut idat_count = 0;
        let mut found_end = false;

        for raw in self.chunks.by_ref() {
            let raw = raw?;
            trace!(
                "Chunk {} ({} bytes)",
                raw.chunk_type_str(),
                raw.data.len()
            );
            match Chunk::parse(raw)? {
                Chunk::IHDR(_) => return Err(PngError::DuplicateHeader),
                Chunk::PLTE(_) if idat_count > 0 => {
                    warn!("Ignoring PLTE chunk after image data");
                }
                Chunk::PLTE(plte) => {
                    debug!("Palette with {} entries", plte.len());
                    palette = Some(plte);
                }
                Chunk::IDAT(IDATChunk { data }) => {
                    idat_count += 1;
                    compressed.extend_from_slice(data);
                }
                Chunk::IEND => {
                    found_end = true;
                    break;
                }
                Chunk::Unknown(raw) => {
                    debug!("Skipping {} chunk", raw.chunk_type_str());
                }
            }
        }
        if !found_end {
            return Err(PngError::Truncated("IEND chunk"));
        }
        let trailing = self.chunks.remaining().len();
        if trailing > 0 {
            warn!("Ignoring {trailing} bytes after IEND");
        }
        debug!(
            "Collected {} bytes of image data from {idat_count} IDAT chunks",
            compressed.len()
        );

        Ok(ImageData {
            header: self.state.header,
            palette,
            compressed,
        })
    }
}

impl ImageData {
    pub(crate) fn expand(self) -> Result<PixelBuffer> {
        let limit = image_data_len(&self.header)?.saturating_add(MAX_TRAILING_DATA);
        let data = decompress_data(&self.compressed, limit)?;
        let pixels = expand_scanlines(&data, &self.header, self.palette.as_ref())?;
        PixelBuffer::new(self.header.width, self.header.height, pixels)
    }
}

pub(crate) fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<(IHDRChunk, PixelBuffer)> {
    let image_data = PNGDecoder::new(bytes, options)?
        .parse_ihdr()?
        .collect_image_data()?;
    let header = image_data.header;
    Ok((header, image_data.expand()?))
}

pub mod chunks;
mod decoder;
mod encoder;
mod error;
mod image_data;
mod pixel;
mod png;
pub mod progress;
mod resize;
mod scanlines;

pub use chunks::{
    decode_chunk, encode_chunk,
    ihdr::{ColorType, IHDRChunk},
    iter_chunks, parse_signature, RawChunk,
};
pub use decoder::DecodeOptions;
pub use encoder::{encode, encode_pixels, write_png};
pub use error::{PngError, Result};
pub use pixel::{Pixel, PixelBuffer};
pub use png::PNG;
pub use resize::{resize, resized_path};

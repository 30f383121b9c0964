//! Incremental extraction of JPEG frames out of `multipart/x-mixed-replace` bodies.
//!
//! ```txt
//! --boundary\r\n
//! Content-Type: image/jpeg\r\n
//! Content-Length: 500\r\n
//! \r\n
//! <500 bytes starting with FF D8>\r\n
//! --boundary\r\n
//! ...
//! ```
//!
//! Bytes can arrive in chunks of any size. [`Demultiplexer`] buffers whatever doesn't yet form a
//! complete part and hands out one [`FramePayload`] per complete JPEG.

mod boundary;
mod demultiplexer;
mod frame_extractor;
mod frame_payload;
mod jpeg_scanner;
mod multipart_error;
mod parser_state;
mod stream_buffer;
#[cfg(test)]
mod tests;

pub use boundary::Boundary;
pub use demultiplexer::Demultiplexer;
pub use frame_payload::FramePayload;
pub use multipart_error::MultipartError;
pub use parser_state::ParserState;

/// JPEG end-of-image marker.
pub const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];
/// JPEG start-of-image marker.
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
/// Maximum number of bytes of a boundary token.
pub const MAX_BOUNDARY_LEN: usize = 256;

const MAX_PART_HEADERS: usize = 16;

//! The HTTP/1.1 subset needed to open an MJPEG stream.

mod body_decoder;
mod chunked_decoder;
mod http_error;
mod request;
mod response_head;

pub use body_decoder::BodyDecoder;
pub use chunked_decoder::ChunkedDecoder;
pub use http_error::HttpError;
pub use request::write_request;
pub use response_head::{read_response_head, ResponseHead};

/// Media types sent in the `Accept` header.
pub const ACCEPT: &str = "multipart/x-mixed-replace, image/jpeg";
/// Ceiling of the status line plus headers of a response.
pub const MAX_RESPONSE_HEAD_LEN: usize = 16 * 1024;
/// Sent in the `User-Agent` header.
pub const USER_AGENT: &str = concat!("mjpeg-reader/", env!("CARGO_PKG_VERSION"));

const MAX_RESPONSE_HEADERS: usize = 32;

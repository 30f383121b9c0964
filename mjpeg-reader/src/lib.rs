#![doc = include_str!("../README.md")]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod decoder;
#[cfg(feature = "tokio")]
pub mod dispatcher;
mod error;
pub mod http;
pub mod misc;
pub mod multipart;
#[cfg(feature = "tokio")]
pub mod reader;
pub mod stream;

pub use error::Error;

/// Default ceiling of buffered bytes that don't yet form a complete frame (4 MiB).
pub const DFLT_MAX_BUFFER_LEN: usize = 4 * 1024 * 1024;
/// Default ceiling of the header block of a single multipart part (8 KiB).
pub const DFLT_MAX_HEADER_LEN: usize = 8 * 1024;

/// Shortcut of [`core::result::Result<T, Error>`].
pub type Result<T> = core::result::Result<T, Error>;

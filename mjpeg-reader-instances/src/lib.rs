//! mjpeg-reader instances

#![allow(
  clippy::arithmetic_side_effects,
  clippy::as_conversions,
  clippy::cast_possible_truncation,
  clippy::missing_inline_in_public_items,
  clippy::use_debug,
  missing_docs
)]

use image::{codecs::jpeg::JpegEncoder, ExtendedColorType};

/// Height of the frames of [`test_pattern`].
pub const FRAME_HEIGHT: u32 = 120;
/// Width of the frames of [`test_pattern`].
pub const FRAME_WIDTH: u32 = 160;

/// Host from arguments
#[inline]
pub fn host_from_args() -> String {
  std::env::args().nth(1).unwrap_or_else(|| "127.0.0.1:9000".to_owned())
}

/// Uri from arguments
#[inline]
pub fn uri_from_args() -> String {
  std::env::args().nth(1).unwrap_or_else(|| "http://127.0.0.1:9000/video.mjpg".to_owned())
}

/// A single `multipart/x-mixed-replace` part that wraps `jpeg`.
#[inline]
pub fn multipart_part(boundary: &str, jpeg: &[u8]) -> Vec<u8> {
  let mut rslt = format!(
    "--{boundary}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
    jpeg.len()
  )
  .into_bytes();
  rslt.extend_from_slice(jpeg);
  rslt.extend_from_slice(b"\r\n");
  rslt
}

/// Diagonal gradient that moves a little at each `idx`.
#[inline]
pub fn test_pattern(idx: u32) -> mjpeg_reader::Result<Vec<u8>> {
  let mut pixels = Vec::with_capacity((FRAME_WIDTH * FRAME_HEIGHT * 3) as usize);
  for y in 0..FRAME_HEIGHT {
    for x in 0..FRAME_WIDTH {
      let value = (x + y + idx.wrapping_mul(4)) as u8;
      pixels.extend_from_slice(&[value, value.wrapping_add(85), value.wrapping_add(170)]);
    }
  }
  let mut rslt = Vec::new();
  JpegEncoder::new_with_quality(&mut rslt, 80).encode(
    &pixels,
    FRAME_WIDTH,
    FRAME_HEIGHT,
    ExtendedColorType::Rgb8,
  )?;
  Ok(rslt)
}

//! Turns frame payloads into images.
//!
//! Decoding is delegated to a [`FrameDecoder`]. Any closure with the right signature works and,
//! with the `image` feature, [`JpegDecoder`] produces [`image::DynamicImage`]s.

mod decoded_image;
mod decoder_error;
#[cfg(feature = "image")]
mod jpeg_decoder;

use crate::multipart::FramePayload;
pub use decoded_image::DecodedImage;
pub use decoder_error::DecoderError;
#[cfg(feature = "image")]
pub use jpeg_decoder::JpegDecoder;

/// Converts the bytes of a single JPEG into an image.
///
/// Failures only affect the frame being decoded.
pub trait FrameDecoder {
  /// Decoded bitmap
  type Image;

  /// `scale` is the rendering scale attached to the resulting image.
  fn decode(&self, bytes: &[u8], scale: f64) -> crate::Result<Self::Image>;
}

impl<F, I> FrameDecoder for F
where
  F: Fn(&[u8], f64) -> crate::Result<I>,
{
  type Image = I;

  #[inline]
  fn decode(&self, bytes: &[u8], scale: f64) -> crate::Result<Self::Image> {
    self(bytes, scale)
  }
}

/// Decodes `payload`, which is consumed, and wraps the result with its scale and sequence.
#[inline]
pub fn decode_payload<D>(
  decoder: &D,
  payload: FramePayload,
  scale: f64,
) -> crate::Result<DecodedImage<D::Image>>
where
  D: FrameDecoder + ?Sized,
{
  if payload.is_empty() {
    return Err(DecoderError::EmptyPayload.into());
  }
  if !scale.is_finite() || scale <= 0.0 {
    return Err(DecoderError::InvalidScale.into());
  }
  let sequence = payload.sequence();
  let image = decoder.decode(payload.bytes(), scale)?;
  Ok(DecodedImage::new(image, scale, sequence))
}

#[cfg(test)]
mod tests {
  use crate::{
    decoder::{decode_payload, DecoderError},
    multipart::FramePayload,
  };
  use bytes::Bytes;

  fn payload(bytes: &'static [u8], sequence: u64) -> FramePayload {
    FramePayload::new(Bytes::from_static(bytes), sequence)
  }

  #[test]
  fn closures_are_decoders() {
    let decoder = |bytes: &[u8], _: f64| -> crate::Result<usize> { Ok(bytes.len()) };
    let image = decode_payload(&decoder, payload(b"\xFF\xD8\xFF\xD9", 7), 2.0).unwrap();
    assert_eq!(*image.image(), 4);
    assert_eq!(image.scale(), 2.0);
    assert_eq!(image.sequence(), 7);
  }

  #[test]
  fn rejects_empty_payloads_and_bad_scales() {
    let decoder = |bytes: &[u8], _: f64| -> crate::Result<usize> { Ok(bytes.len()) };
    assert!(matches!(
      decode_payload(&decoder, payload(b"", 0), 1.0),
      Err(crate::Error::DecoderError(DecoderError::EmptyPayload))
    ));
    assert!(matches!(
      decode_payload(&decoder, payload(b"\xFF\xD8", 0), f64::NAN),
      Err(crate::Error::DecoderError(DecoderError::InvalidScale))
    ));
  }
}

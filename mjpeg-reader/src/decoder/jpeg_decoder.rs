use crate::decoder::{DecoderError, FrameDecoder};
use image::{DynamicImage, ImageFormat};

/// Decodes JPEGs into [`DynamicImage`]s using the `image` crate.
///
/// The scale doesn't resize the bitmap, it is only carried alongside it.
#[derive(Clone, Copy, Debug, Default)]
pub struct JpegDecoder;

impl FrameDecoder for JpegDecoder {
  type Image = DynamicImage;

  #[inline]
  fn decode(&self, bytes: &[u8], _: f64) -> crate::Result<Self::Image> {
    if image::guess_format(bytes).ok() != Some(ImageFormat::Jpeg) {
      return Err(DecoderError::UnsupportedFormat.into());
    }
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)?)
  }
}

#[cfg(test)]
mod tests {
  use crate::decoder::{DecoderError, FrameDecoder, JpegDecoder};
  use alloc::vec::Vec;
  use image::{codecs::jpeg::JpegEncoder, ExtendedColorType, GenericImageView};

  #[test]
  fn decodes_encoded_images() {
    let pixels: Vec<u8> = (0..8u8 * 6 * 3).collect();
    let mut jpeg = Vec::new();
    JpegEncoder::new(&mut jpeg).encode(&pixels, 8, 6, ExtendedColorType::Rgb8).unwrap();
    let image = JpegDecoder.decode(&jpeg, 1.0).unwrap();
    assert_eq!(image.dimensions(), (8, 6));
  }

  #[test]
  fn rejects_other_formats() {
    assert!(matches!(
      JpegDecoder.decode(b"\x89PNG\r\n\x1a\n", 1.0),
      Err(crate::Error::DecoderError(DecoderError::UnsupportedFormat))
    ));
    assert!(matches!(
      JpegDecoder.decode(b"\xFF\xD8\xFF\xE0\x00", 1.0),
      Err(crate::Error::ImageError(_))
    ));
  }
}

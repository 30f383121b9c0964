/// A decoded frame ready to be presented.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage<I> {
  image: I,
  scale: f64,
  sequence: u64,
}

impl<I> DecodedImage<I> {
  #[inline]
  pub(crate) fn new(image: I, scale: f64, sequence: u64) -> Self {
    Self { image, scale, sequence }
  }

  /// Decoded bitmap
  #[inline]
  pub fn image(&self) -> &I {
    &self.image
  }

  /// Unwraps the decoded bitmap.
  #[inline]
  pub fn into_image(self) -> I {
    self.image
  }

  /// Rendering scale that was active when the frame was decoded.
  #[inline]
  pub fn scale(&self) -> f64 {
    self.scale
  }

  /// Extraction order of the originating payload.
  #[inline]
  pub fn sequence(&self) -> u64 {
    self.sequence
  }
}

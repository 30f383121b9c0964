use bytes::Bytes;

/// Exactly one complete JPEG image extracted from the stream.
///
/// Ownership is meant to move to a decoder, which is why this structure isn't `Clone`.
#[derive(Debug, Eq, PartialEq)]
pub struct FramePayload {
  bytes: Bytes,
  sequence: u64,
}

impl FramePayload {
  #[inline]
  pub(crate) fn new(bytes: Bytes, sequence: u64) -> Self {
    Self { bytes, sequence }
  }

  /// JPEG bytes, from the start-of-image marker onwards.
  #[inline]
  pub fn bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Unwraps the underlying bytes.
  #[inline]
  pub fn into_bytes(self) -> Bytes {
    self.bytes
  }

  /// Shortcut for `self.bytes().is_empty()`.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// Shortcut for `self.bytes().len()`.
  #[inline]
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  /// Zero-based position of this frame in the extraction order of its stream.
  #[inline]
  pub fn sequence(&self) -> u64 {
    self.sequence
  }
}

impl AsRef<[u8]> for FramePayload {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    &self.bytes
  }
}

use bytes::{Buf, Bytes, BytesMut};

/// Bytes received from the network that weren't turned into frames yet.
///
/// Between parsing attempts it holds nothing, a partial boundary/header or a partial payload.
#[derive(Debug, Default)]
pub(crate) struct StreamBuffer {
  bytes: BytesMut,
}

impl StreamBuffer {
  pub(crate) fn bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Drops everything, including the allocated capacity.
  pub(crate) fn clear(&mut self) {
    self.bytes = BytesMut::new();
  }

  /// Removes the first `len` bytes.
  pub(crate) fn consume(&mut self, len: usize) {
    self.bytes.advance(len.min(self.bytes.len()));
  }

  pub(crate) fn extend(&mut self, chunk: &[u8]) {
    self.bytes.extend_from_slice(chunk);
  }

  pub(crate) fn len(&self) -> usize {
    self.bytes.len()
  }

  /// Detaches the first `len` bytes without copying them.
  pub(crate) fn split_frame(&mut self, len: usize) -> Bytes {
    self.bytes.split_to(len.min(self.bytes.len())).freeze()
  }
}

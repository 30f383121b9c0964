/// Position of the extraction cycle of a [`crate::multipart::Demultiplexer`].
///
/// Persists across chunks, which is what allows a frame to be assembled from any number of
/// network reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParserState {
  /// Scanning for the next boundary marker.
  AwaitingBoundary,
  /// The marker was consumed, waiting for the end of the part headers.
  ReadingHeader,
  /// Headers were consumed, waiting for the JPEG payload.
  ReadingPayload {
    /// Declared `Content-Length`, if any. Without it, the payload ends at the JPEG
    /// end-of-image marker or at the next boundary.
    content_length: Option<usize>,
  },
  /// The buffer ceiling was exceeded. Terminal until the demultiplexer is reset.
  Failed,
}

impl ParserState {
  /// Shortcut for [`ParserState::Failed`].
  #[inline]
  pub fn is_failed(self) -> bool {
    matches!(self, Self::Failed)
  }
}

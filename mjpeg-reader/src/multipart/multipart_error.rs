/// Multipart Error
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MultipartError {
  /// More than `limit` bytes were buffered without completing a part. Fatal.
  BufferOverflow {
    /// Configured ceiling
    limit: usize,
  },
  /// A previous fatal error left the demultiplexer unusable until it is reset.
  FailedDemultiplexer,
  /// Boundary token is empty, contains line breaks or is too long.
  InvalidBoundary,
  /// `Content-Length` of a part isn't a decimal number.
  InvalidContentLength,
  /// The header block of a part couldn't be parsed.
  MalformedPartHeader,
  /// A part payload doesn't start with the JPEG start-of-image marker.
  MissingJpegStart,
  /// `Content-Length` of a part exceeds the buffer ceiling.
  VeryLargeContentLength {
    /// Declared length
    received: usize,
  },
  /// The header block of a part exceeds its ceiling.
  VeryLargePartHeader,
}

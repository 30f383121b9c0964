/// Http error
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HttpError {
  /// Chunk sizes or chunk terminators don't follow the transfer coding grammar.
  InvalidChunkedEncoding,
  /// Received response does not contain a status code field
  MissingResponseStatusCode,
  /// The server refused the provided credentials or their absence.
  Unauthorized {
    /// Received status code, 401 or 403.
    status: u16,
  },
  /// Content-Type isn't `multipart/*`
  UnexpectedContentType,
  /// Status code other than 200.
  UnexpectedStatusCode {
    /// Received status code
    received: u16,
  },
  /// Response status line and headers exceeded their ceiling.
  VeryLargeResponseHead {
    /// Configured ceiling
    limit: usize,
  },
}

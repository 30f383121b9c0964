/// Decoder Error
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecoderError {
  /// A frame without bytes can't be decoded.
  EmptyPayload,
  /// Scales must be finite and positive.
  InvalidScale,
  /// The decoded image doesn't have the expected format.
  UnsupportedFormat,
}

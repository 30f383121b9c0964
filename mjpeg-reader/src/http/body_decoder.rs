use crate::http::ChunkedDecoder;
use alloc::vec::Vec;

/// Removes the transfer coding of a response body.
#[derive(Debug)]
pub enum BodyDecoder {
  /// `Transfer-Encoding: chunked`
  Chunked(ChunkedDecoder),
  /// Bytes are forwarded as they are.
  Identity,
}

impl BodyDecoder {
  /// Instance that matches the transfer coding of a response.
  #[inline]
  pub fn new(is_chunked: bool) -> Self {
    if is_chunked {
      Self::Chunked(ChunkedDecoder::default())
    } else {
      Self::Identity
    }
  }

  /// Returns the decoded content of `input`. `buffer` is only used by codings that need to
  /// rewrite bytes.
  #[inline]
  pub fn decode<'any>(
    &mut self,
    input: &'any [u8],
    buffer: &'any mut Vec<u8>,
  ) -> crate::Result<&'any [u8]> {
    match self {
      Self::Chunked(decoder) => {
        buffer.clear();
        decoder.decode(input, buffer)?;
        Ok(buffer.as_slice())
      }
      Self::Identity => Ok(input),
    }
  }

  /// Called when the connection was closed. Chunked bodies must have received their last
  /// chunk, otherwise the stream was cut.
  #[inline]
  pub fn finish(&self) -> crate::Result<()> {
    match self {
      Self::Chunked(decoder) if !decoder.is_finished() => {
        Err(crate::Error::UnexpectedStreamReadEOF)
      }
      Self::Chunked(_) | Self::Identity => Ok(()),
    }
  }

  /// If the body was completely received, which only chunked bodies are able to tell.
  #[inline]
  pub fn is_finished(&self) -> bool {
    match self {
      Self::Chunked(decoder) => decoder.is_finished(),
      Self::Identity => false,
    }
  }
}

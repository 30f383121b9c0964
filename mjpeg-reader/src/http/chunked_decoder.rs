use crate::{http::HttpError, misc::bytes_pos1};
use alloc::vec::Vec;

const MAX_SIZE_LINE_LEN: usize = 1024;

/// Incremental decoder of the chunked transfer coding.
///
/// Input can be split at any position, including inside chunk-size lines.
#[derive(Debug, Default)]
pub struct ChunkedDecoder {
  size_line: Vec<u8>,
  state: ChunkedState,
}

impl ChunkedDecoder {
  /// Appends the data carried by `input` into `out`.
  #[inline]
  pub fn decode(&mut self, mut input: &[u8], out: &mut Vec<u8>) -> crate::Result<()> {
    loop {
      match self.state {
        ChunkedState::Data { remaining } => {
          let len = remaining.min(input.len());
          let (data, rest) = input.split_at(len);
          out.extend_from_slice(data);
          input = rest;
          let remaining = remaining.wrapping_sub(len);
          if remaining > 0 {
            self.state = ChunkedState::Data { remaining };
            return Ok(());
          }
          self.state = ChunkedState::DataEnd;
        }
        ChunkedState::DataEnd => {
          let [first, rest @ ..] = input else {
            return Ok(());
          };
          match first {
            b'\r' => {}
            b'\n' => self.state = ChunkedState::Size,
            _ => return Err(HttpError::InvalidChunkedEncoding.into()),
          }
          input = rest;
        }
        ChunkedState::Last => return Ok(()),
        ChunkedState::Size => {
          let Some(idx) = bytes_pos1(input, b'\n') else {
            self.size_line.extend_from_slice(input);
            if self.size_line.len() > MAX_SIZE_LINE_LEN {
              return Err(HttpError::InvalidChunkedEncoding.into());
            }
            return Ok(());
          };
          let (line, rest) = input.split_at(idx.wrapping_add(1));
          self.size_line.extend_from_slice(line);
          input = rest;
          let size = match httparse::parse_chunk_size(&self.size_line) {
            Ok(httparse::Status::Complete((_, size))) => size,
            Ok(httparse::Status::Partial) | Err(_) => {
              return Err(HttpError::InvalidChunkedEncoding.into());
            }
          };
          self.size_line.clear();
          if size == 0 {
            _debug!("Received last chunk");
            self.state = ChunkedState::Last;
          } else {
            let remaining =
              usize::try_from(size).map_err(|_err| HttpError::InvalidChunkedEncoding)?;
            self.state = ChunkedState::Data { remaining };
          }
        }
      }
    }
  }

  /// If the zero-sized chunk that ends the body was received.
  #[inline]
  pub fn is_finished(&self) -> bool {
    matches!(self.state, ChunkedState::Last)
  }
}

#[derive(Clone, Copy, Debug, Default)]
enum ChunkedState {
  Data { remaining: usize },
  DataEnd,
  Last,
  #[default]
  Size,
}

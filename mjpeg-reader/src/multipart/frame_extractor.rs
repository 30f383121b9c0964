use crate::{
  misc::{bytes_find, bytes_pos1, FromRadix10},
  multipart::{
    jpeg_scanner::JpegScanner, stream_buffer::StreamBuffer, Boundary, MultipartError,
    ParserState, JPEG_SOI, MAX_BOUNDARY_LEN, MAX_PART_HEADERS,
  },
};
use bytes::Bytes;

/// Outcome of a single parsing step.
#[derive(Debug)]
pub(crate) enum Transition {
  /// More bytes are needed.
  Await,
  /// The state changed and parsing can go on.
  Continue,
  /// A complete payload was detached from the buffer.
  Emit(Bytes),
  /// The current part was malformed and the extractor went back to boundary scanning.
  Resync(MultipartError),
}

/// State machine that turns buffered bytes into frame payloads.
///
/// Scan positions are remembered between steps so that a marker is never searched twice over
/// the same bytes, regardless of how the stream is chunked.
#[derive(Debug)]
pub(crate) struct FrameExtractor {
  boundary: Option<Boundary>,
  boundary_cursor: usize,
  jpeg_scanner: JpegScanner,
  max_header_len: usize,
  max_payload_len: usize,
  state: ParserState,
}

impl FrameExtractor {
  pub(crate) fn new(boundary: Option<Boundary>, max_header_len: usize, max_payload_len: usize) -> Self {
    Self {
      boundary,
      boundary_cursor: 0,
      jpeg_scanner: JpegScanner::default(),
      max_header_len,
      max_payload_len,
      state: ParserState::AwaitingBoundary,
    }
  }

  pub(crate) fn boundary(&self) -> Option<&Boundary> {
    self.boundary.as_ref()
  }

  pub(crate) fn fail(&mut self) {
    self.state = ParserState::Failed;
  }

  pub(crate) fn reset(&mut self, boundary: Option<Boundary>) {
    self.boundary = boundary;
    self.restart();
  }

  /// Goes back to boundary scanning, keeping the current boundary.
  pub(crate) fn restart(&mut self) {
    self.boundary_cursor = 0;
    self.jpeg_scanner = JpegScanner::default();
    self.state = ParserState::AwaitingBoundary;
  }

  pub(crate) fn set_max_header_len(&mut self, max_header_len: usize) {
    self.max_header_len = max_header_len;
  }

  pub(crate) fn set_max_payload_len(&mut self, max_payload_len: usize) {
    self.max_payload_len = max_payload_len;
  }

  pub(crate) fn state(&self) -> ParserState {
    self.state
  }

  pub(crate) fn step(&mut self, buffer: &mut StreamBuffer) -> Transition {
    match self.state {
      ParserState::AwaitingBoundary => {
        if self.boundary.is_some() {
          self.await_boundary(buffer)
        } else {
          self.detect_boundary(buffer)
        }
      }
      ParserState::ReadingHeader => self.read_header(buffer),
      ParserState::ReadingPayload { content_length: Some(len) } => {
        self.read_declared_payload(buffer, len)
      }
      ParserState::ReadingPayload { content_length: None } => self.read_undeclared_payload(buffer),
      ParserState::Failed => Transition::Await,
    }
  }

  fn await_boundary(&mut self, buffer: &mut StreamBuffer) -> Transition {
    let Some(boundary) = &self.boundary else {
      return Transition::Await;
    };
    let bytes = buffer.bytes();
    let marker = boundary.marker();
    let from = self.boundary_cursor.min(bytes.len());
    let Some(idx) = bytes_find(bytes.get(from..).unwrap_or_default(), marker) else {
      self.boundary_cursor = bytes.len().saturating_sub(marker.len().saturating_sub(1));
      return Transition::Await;
    };
    let skipped = from.wrapping_add(idx);
    if skipped > 0 {
      _trace!(skipped, "Discarding bytes before boundary");
    }
    buffer.consume(skipped.wrapping_add(marker.len()));
    self.boundary_cursor = 0;
    self.state = ParserState::ReadingHeader;
    Transition::Continue
  }

  // Without a declared boundary, the first line that starts with `--` is taken as one.
  fn detect_boundary(&mut self, buffer: &mut StreamBuffer) -> Transition {
    let bytes = buffer.bytes();
    let mut from = self.boundary_cursor.min(bytes.len());
    loop {
      let Some(idx) = bytes_find(bytes.get(from..).unwrap_or_default(), b"--") else {
        self.boundary_cursor = bytes.len().saturating_sub(1);
        return Transition::Await;
      };
      let start = from.wrapping_add(idx);
      let is_line_start = start == 0 || bytes.get(start.wrapping_sub(1)) == Some(&b'\n');
      if !is_line_start {
        from = start.wrapping_add(1);
        continue;
      }
      let line = bytes.get(start..).unwrap_or_default();
      let Some(line_len) = bytes_pos1(line, b'\n') else {
        if line.len() > MAX_BOUNDARY_LEN.wrapping_add(2) {
          from = start.wrapping_add(1);
          continue;
        }
        self.boundary_cursor = start;
        return Transition::Await;
      };
      let marker = line.get(..line_len).unwrap_or_default().trim_ascii_end();
      match Boundary::new(marker) {
        Ok(boundary) if marker.len() > 2 => {
          _debug!(boundary = ?core::str::from_utf8(marker), "Detected boundary");
          buffer.consume(start.wrapping_add(marker.len()));
          self.boundary = Some(boundary);
          self.boundary_cursor = 0;
          self.state = ParserState::ReadingHeader;
          return Transition::Continue;
        }
        _ => from = start.wrapping_add(line_len),
      }
    }
  }

  fn read_header(&mut self, buffer: &mut StreamBuffer) -> Transition {
    let bytes = buffer.bytes();
    let [first, second, ..] = bytes else {
      return Transition::Await;
    };
    if [*first, *second] == *b"--" {
      _debug!("Received closing delimiter");
      buffer.consume(2);
      self.state = ParserState::AwaitingBoundary;
      return Transition::Continue;
    }
    // Remaining of the boundary line, usually only a line break.
    let Some(line_end) = bytes_pos1(bytes, b'\n') else {
      return self.await_header(bytes.len());
    };
    let header_start = line_end.wrapping_add(1);
    let mut headers = [httparse::EMPTY_HEADER; MAX_PART_HEADERS];
    let (header_len, content_length) =
      match httparse::parse_headers(bytes.get(header_start..).unwrap_or_default(), &mut headers) {
        Ok(httparse::Status::Complete((header_len, parsed))) => match content_length(parsed) {
          Ok(elem) => (header_len, elem),
          Err(err) => return self.resync(err),
        },
        Ok(httparse::Status::Partial) => return self.await_header(bytes.len()),
        Err(_err) => {
          _debug!("Invalid part header: {_err}");
          return self.resync(MultipartError::MalformedPartHeader);
        }
      };
    if header_start.wrapping_add(header_len) > self.max_header_len {
      return self.resync(MultipartError::VeryLargePartHeader);
    }
    if let Some(received) = content_length {
      if received > self.max_payload_len {
        return self.resync(MultipartError::VeryLargeContentLength { received });
      }
    }
    buffer.consume(header_start.wrapping_add(header_len));
    self.boundary_cursor = 0;
    self.jpeg_scanner = JpegScanner::default();
    self.state = ParserState::ReadingPayload { content_length };
    Transition::Continue
  }

  fn read_declared_payload(&mut self, buffer: &mut StreamBuffer, len: usize) -> Transition {
    let bytes = buffer.bytes();
    if len < JPEG_SOI.len() {
      return self.resync(MultipartError::MissingJpegStart);
    }
    if let Some(prefix) = bytes.get(..JPEG_SOI.len()) {
      if prefix != JPEG_SOI {
        return self.resync(MultipartError::MissingJpegStart);
      }
    }
    if bytes.len() < len {
      return Transition::Await;
    }
    let payload = buffer.split_frame(len);
    self.restart();
    Transition::Emit(payload)
  }

  // Ends at the JPEG end-of-image marker or at the next boundary, whatever comes first.
  fn read_undeclared_payload(&mut self, buffer: &mut StreamBuffer) -> Transition {
    let bytes = buffer.bytes();
    let Some(prefix) = bytes.get(..JPEG_SOI.len()) else {
      return Transition::Await;
    };
    if prefix != JPEG_SOI {
      return self.resync(MultipartError::MissingJpegStart);
    }
    let jpeg_end = self.jpeg_scanner.advance(bytes);
    let boundary_start = match &self.boundary {
      Some(boundary) => {
        let marker = boundary.marker();
        let from = self.boundary_cursor.min(bytes.len());
        let found =
          bytes_find(bytes.get(from..).unwrap_or_default(), marker).map(|idx| from.wrapping_add(idx));
        if found.is_none() {
          self.boundary_cursor = bytes.len().saturating_sub(marker.len().saturating_sub(1));
        }
        found
      }
      None => None,
    };
    let end = match (jpeg_end, boundary_start) {
      (Some(jpeg), Some(boundary)) if boundary < jpeg => without_line_break(bytes, boundary),
      (Some(jpeg), _) => jpeg,
      (None, Some(boundary)) => without_line_break(bytes, boundary),
      (None, None) => return Transition::Await,
    };
    let payload = buffer.split_frame(end);
    self.restart();
    Transition::Emit(payload)
  }

  fn await_header(&mut self, buffered: usize) -> Transition {
    if buffered > self.max_header_len {
      return self.resync(MultipartError::VeryLargePartHeader);
    }
    Transition::Await
  }

  fn resync(&mut self, err: MultipartError) -> Transition {
    self.restart();
    Transition::Resync(err)
  }
}

fn content_length(headers: &[httparse::Header<'_>]) -> Result<Option<usize>, MultipartError> {
  for header in headers {
    if header.name.eq_ignore_ascii_case("content-length") {
      return usize::from_radix_10(header.value.trim_ascii())
        .map(Some)
        .map_err(|_err| MultipartError::InvalidContentLength);
    }
  }
  Ok(None)
}

// The line break that precedes a boundary belongs to the delimiter.
fn without_line_break(bytes: &[u8], end: usize) -> usize {
  match bytes.get(..end) {
    Some([.., b'\r', b'\n']) => end.wrapping_sub(2),
    Some([.., b'\n']) => end.wrapping_sub(1),
    _ => end,
  }
}

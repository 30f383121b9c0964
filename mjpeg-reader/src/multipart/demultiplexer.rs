use crate::{
  multipart::{
    frame_extractor::{FrameExtractor, Transition},
    stream_buffer::StreamBuffer,
    Boundary, FramePayload, MultipartError, ParserState,
  },
  DFLT_MAX_BUFFER_LEN, DFLT_MAX_HEADER_LEN,
};

/// Splits a `multipart/x-mixed-replace` body into JPEG frames.
///
/// Chunks of any size can be provided and frames are returned in stream order. Malformed parts
/// are skipped by resynchronizing at the next boundary. If more than `max_buffer_len` bytes
/// accumulate without completing a part, the instance fails and must be [`Self::reset`].
///
/// ```rust
/// use mjpeg_reader::multipart::{Boundary, Demultiplexer};
///
/// let mut demux = Demultiplexer::new(Some(Boundary::new(b"frame").unwrap()));
/// let mut frames = Vec::new();
/// let body = b"--frame\r\nContent-Length: 4\r\n\r\n\xFF\xD8\xFF\xD9\r\n--frame\r\n";
/// for chunk in body.chunks(3) {
///   demux.feed(chunk, |frame| Ok(frames.push(frame))).unwrap();
/// }
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].bytes(), b"\xFF\xD8\xFF\xD9");
/// ```
#[derive(Debug)]
pub struct Demultiplexer {
  buffer: StreamBuffer,
  extractor: FrameExtractor,
  frames: u64,
  max_buffer_len: usize,
  resyncs: u64,
}

impl Demultiplexer {
  /// If `boundary` is `None`, the first line of the body that starts with `--` is used.
  #[inline]
  pub fn new(boundary: Option<Boundary>) -> Self {
    Self {
      buffer: StreamBuffer::default(),
      extractor: FrameExtractor::new(boundary, DFLT_MAX_HEADER_LEN, DFLT_MAX_BUFFER_LEN),
      frames: 0,
      max_buffer_len: DFLT_MAX_BUFFER_LEN,
      resyncs: 0,
    }
  }

  /// Negotiated or detected boundary.
  #[inline]
  pub fn boundary(&self) -> Option<&Boundary> {
    self.extractor.boundary()
  }

  /// Number of bytes waiting to form a frame.
  #[inline]
  pub fn buffered_len(&self) -> usize {
    self.buffer.len()
  }

  /// Appends received bytes without parsing them.
  #[inline]
  pub fn extend(&mut self, chunk: &[u8]) -> crate::Result<()> {
    if self.extractor.state().is_failed() {
      return Err(MultipartError::FailedDemultiplexer.into());
    }
    self.buffer.extend(chunk);
    Ok(())
  }

  /// Appends `chunk` and calls `cb` with every frame that became complete. Returns the number
  /// of emitted frames.
  #[inline]
  pub fn feed<F>(&mut self, chunk: &[u8], mut cb: F) -> crate::Result<usize>
  where
    F: FnMut(FramePayload) -> crate::Result<()>,
  {
    self.extend(chunk)?;
    let mut emitted: usize = 0;
    while let Some(frame) = self.next_frame()? {
      cb(frame)?;
      emitted = emitted.wrapping_add(1);
    }
    Ok(emitted)
  }

  /// Signals the end of the stream. Whatever incomplete part is buffered is discarded and its
  /// length is returned.
  #[inline]
  pub fn finish(&mut self) -> usize {
    let discarded = self.buffer.len();
    if discarded > 0 {
      _debug!(discarded, "Discarding incomplete part at the end of the stream");
    }
    self.buffer.clear();
    if !self.extractor.state().is_failed() {
      self.extractor.restart();
    }
    discarded
  }

  /// Total number of emitted frames.
  #[inline]
  pub fn frames(&self) -> u64 {
    self.frames
  }

  /// Maximum number of bytes that can be buffered without completing a part.
  #[inline]
  pub fn max_buffer_len(&self) -> usize {
    self.max_buffer_len
  }

  /// Parses the buffered bytes until a frame is emitted or more bytes are needed.
  #[inline]
  pub fn next_frame(&mut self) -> crate::Result<Option<FramePayload>> {
    if self.extractor.state().is_failed() {
      return Err(MultipartError::FailedDemultiplexer.into());
    }
    loop {
      match self.extractor.step(&mut self.buffer) {
        Transition::Await => {
          if self.buffer.len() > self.max_buffer_len {
            _warn!(
              buffered = self.buffer.len(),
              limit = self.max_buffer_len,
              "Buffer ceiling exceeded without a complete part"
            );
            self.buffer.clear();
            self.extractor.fail();
            return Err(MultipartError::BufferOverflow { limit: self.max_buffer_len }.into());
          }
          return Ok(None);
        }
        Transition::Continue => {}
        Transition::Emit(bytes) => {
          let sequence = self.frames;
          self.frames = self.frames.wrapping_add(1);
          _trace!(len = bytes.len(), sequence, "Extracted frame");
          return Ok(Some(FramePayload::new(bytes, sequence)));
        }
        Transition::Resync(_err) => {
          self.resyncs = self.resyncs.wrapping_add(1);
          _debug!("Skipping malformed part: {_err:?}");
        }
      }
    }
  }

  /// Drops buffered bytes and counters, leaving the instance ready for a new stream.
  #[inline]
  pub fn reset(&mut self, boundary: Option<Boundary>) {
    self.buffer.clear();
    self.extractor.reset(boundary);
    self.frames = 0;
    self.resyncs = 0;
  }

  /// Number of times a malformed part was skipped.
  #[inline]
  pub fn resyncs(&self) -> u64 {
    self.resyncs
  }

  /// Ceiling of buffered bytes, which also bounds declared part lengths. Defaults to
  /// [`DFLT_MAX_BUFFER_LEN`].
  #[inline]
  pub fn set_max_buffer_len(&mut self, max_buffer_len: usize) -> &mut Self {
    self.max_buffer_len = max_buffer_len;
    self.extractor.set_max_payload_len(max_buffer_len);
    self
  }

  /// Ceiling of the header block of a single part. Defaults to [`DFLT_MAX_HEADER_LEN`].
  #[inline]
  pub fn set_max_header_len(&mut self, max_header_len: usize) -> &mut Self {
    self.extractor.set_max_header_len(max_header_len);
    self
  }

  /// Current position of the extraction cycle.
  #[inline]
  pub fn state(&self) -> ParserState {
    self.extractor.state()
  }
}

impl Default for Demultiplexer {
  #[inline]
  fn default() -> Self {
    Self::new(None)
  }
}

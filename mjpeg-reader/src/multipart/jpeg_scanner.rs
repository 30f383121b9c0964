use crate::misc::bytes_pos1;

/// Walks the marker segments of a JPEG looking for the end-of-image marker that closes it.
///
/// Metadata segments can carry whole thumbnails with their own `FF D9`, so segment lengths are
/// honored instead of searching for the first occurrence of the marker.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct JpegScanner {
  idx: usize,
  mode: ScanMode,
}

impl JpegScanner {
  /// Returns the position right after the end-of-image marker.
  ///
  /// `bytes` must start with the start-of-image marker and successive calls must receive the
  /// same prefix, possibly extended with more data.
  pub(crate) fn advance(&mut self, bytes: &[u8]) -> Option<usize> {
    self.idx = self.idx.max(2);
    loop {
      match self.mode {
        ScanMode::Abandoned => return None,
        ScanMode::EntropyCoded => {
          let rest = bytes.get(self.idx..).unwrap_or_default();
          let Some(pos) = bytes_pos1(rest, 0xFF) else {
            self.idx = self.idx.max(bytes.len());
            return None;
          };
          let ff_idx = self.idx.wrapping_add(pos);
          let Some(&marker) = bytes.get(ff_idx.wrapping_add(1)) else {
            self.idx = ff_idx;
            return None;
          };
          match marker {
            0x00 | 0xD0..=0xD7 => self.idx = ff_idx.wrapping_add(2),
            0xD9 => return Some(ff_idx.wrapping_add(2)),
            0xFF => self.idx = ff_idx.wrapping_add(1),
            _ => {
              self.idx = ff_idx;
              self.mode = ScanMode::Segments;
            }
          }
        }
        ScanMode::Segments => {
          let rest = bytes.get(self.idx..).unwrap_or_default();
          let [first, marker, ..] = rest else {
            return None;
          };
          if *first != 0xFF {
            return self.abandon();
          }
          match marker {
            0x00 | 0xD8 => return self.abandon(),
            0x01 | 0xD0..=0xD7 => self.idx = self.idx.wrapping_add(2),
            0xD9 => return Some(self.idx.wrapping_add(2)),
            0xFF => self.idx = self.idx.wrapping_add(1),
            _ => {
              let [_, _, hi, lo, ..] = rest else {
                return None;
              };
              let len = usize::from(u16::from_be_bytes([*hi, *lo]));
              if len < 2 {
                return self.abandon();
              }
              if *marker == 0xDA {
                self.mode = ScanMode::EntropyCoded;
              }
              self.idx = self.idx.wrapping_add(2).wrapping_add(len);
            }
          }
        }
      }
    }
  }

  fn abandon(&mut self) -> Option<usize> {
    _trace!("Unrecognized JPEG structure, relying on the next boundary");
    self.mode = ScanMode::Abandoned;
    None
  }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum ScanMode {
  Abandoned,
  EntropyCoded,
  #[default]
  Segments,
}

#[cfg(test)]
mod tests {
  use crate::multipart::jpeg_scanner::JpegScanner;
  use alloc::vec::Vec;

  fn jpeg_with_thumbnail() -> Vec<u8> {
    let mut rslt = Vec::new();
    rslt.extend_from_slice(&[0xFF, 0xD8]);
    // APP1 carrying a complete thumbnail
    rslt.extend_from_slice(&[0xFF, 0xE1, 0x00, 0x0A, 0xFF, 0xD8, 0x01, 0x02, 0xFF, 0xD9, 0x03, 0x04]);
    // SOS header followed by entropy-coded data with stuffed bytes and a restart marker
    rslt.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x04, 0x01, 0x02]);
    rslt.extend_from_slice(&[0x11, 0xFF, 0x00, 0x22, 0xFF, 0xD0, 0x33, 0xFF, 0xFF, 0xD9]);
    rslt
  }

  #[test]
  fn ignores_embedded_end_markers() {
    let jpeg = jpeg_with_thumbnail();
    let mut scanner = JpegScanner::default();
    assert_eq!(scanner.advance(&jpeg), Some(jpeg.len()));
  }

  #[test]
  fn resumes_across_partial_inputs() {
    let mut jpeg = jpeg_with_thumbnail();
    jpeg.extend_from_slice(b"\r\n--frame");
    let mut scanner = JpegScanner::default();
    for len in 0..jpeg.len() - 9 {
      assert_eq!(scanner.advance(&jpeg[..len]), None);
    }
    assert_eq!(scanner.advance(&jpeg), Some(jpeg.len() - 9));
  }

  #[test]
  fn gives_up_on_garbage() {
    let mut scanner = JpegScanner::default();
    assert_eq!(scanner.advance(&[0xFF, 0xD8, 0x12, 0x34, 0xFF, 0xD9]), None);
    assert_eq!(scanner.advance(&[0xFF, 0xD8, 0x12, 0x34, 0xFF, 0xD9, 0xFF, 0xD9]), None);
  }
}

use crate::{
  http::{HttpError, MAX_RESPONSE_HEADERS},
  misc::trim,
  multipart::Boundary,
  stream::Stream,
};
use alloc::vec::Vec;

const READ_LEN: usize = 1024;

/// Status line and headers of a response that is expected to carry an MJPEG stream.
#[derive(Debug)]
pub struct ResponseHead {
  boundary: Option<Boundary>,
  is_chunked: bool,
  status: u16,
}

impl ResponseHead {
  /// Parses a complete response head located at the beginning of `bytes`, returning it along
  /// with its length. `None` means that more bytes are needed.
  ///
  /// Only `200` responses with a `multipart/*` content type are accepted.
  #[inline]
  pub fn parse(bytes: &[u8]) -> crate::Result<Option<(Self, usize)>> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_RESPONSE_HEADERS];
    let mut res = httparse::Response::new(&mut headers);
    let len = match res.parse(bytes)? {
      httparse::Status::Complete(elem) => elem,
      httparse::Status::Partial => return Ok(None),
    };
    let status = res.code.ok_or(HttpError::MissingResponseStatusCode)?;
    match status {
      200 => {}
      401 | 403 => return Err(HttpError::Unauthorized { status }.into()),
      _ => return Err(HttpError::UnexpectedStatusCode { received: status }.into()),
    }
    let mut content_type = None;
    let mut is_chunked = false;
    for header in res.headers.iter() {
      if header.name.eq_ignore_ascii_case("content-type") {
        content_type = Some(header.value);
      } else if header.name.eq_ignore_ascii_case("transfer-encoding") {
        is_chunked = header
          .value
          .split(|el| *el == b',')
          .any(|coding| trim(coding).eq_ignore_ascii_case(b"chunked"));
      }
    }
    let boundary =
      Boundary::from_content_type(content_type.ok_or(HttpError::UnexpectedContentType)?)?;
    Ok(Some((Self { boundary, is_chunked, status }, len)))
  }

  /// Boundary declared in `Content-Type`, if any.
  #[inline]
  pub fn boundary(&self) -> Option<&Boundary> {
    self.boundary.as_ref()
  }

  /// Unwraps the boundary declared in `Content-Type`.
  #[inline]
  pub fn into_boundary(self) -> Option<Boundary> {
    self.boundary
  }

  /// If the body uses the chunked transfer coding.
  #[inline]
  pub fn is_chunked(&self) -> bool {
    self.is_chunked
  }

  /// Status code
  #[inline]
  pub fn status(&self) -> u16 {
    self.status
  }
}

/// Reads from `stream` until a complete response head is available.
///
/// `buffer` is used as a scratch area and, on success, only holds the body bytes that were
/// received along with the head.
#[inline]
pub async fn read_response_head<S>(
  stream: &mut S,
  buffer: &mut Vec<u8>,
  max_len: usize,
) -> crate::Result<ResponseHead>
where
  S: Stream,
{
  loop {
    if let Some((head, len)) = ResponseHead::parse(buffer)? {
      _debug!(status = head.status, is_chunked = head.is_chunked, "Received response head");
      let _ = buffer.drain(..len);
      return Ok(head);
    }
    if buffer.len() >= max_len {
      return Err(HttpError::VeryLargeResponseHead { limit: max_len }.into());
    }
    let start = buffer.len();
    buffer.resize(start.wrapping_add(READ_LEN), 0);
    let read = stream.read(buffer.get_mut(start..).unwrap_or_default()).await?;
    buffer.truncate(start.wrapping_add(read));
    if read == 0 {
      return Err(crate::Error::UnexpectedStreamReadEOF);
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    http::{read_response_head, HttpError, ResponseHead},
    stream::BytesStream,
  };
  use alloc::vec::Vec;

  #[test]
  fn accepts_multipart_responses() {
    let bytes = b"HTTP/1.1 200 OK\r\nContent-Type: multipart/x-mixed-replace;boundary=frame\r\nTransfer-Encoding: gzip, chunked\r\n\r\n--frame";
    let (head, len) = ResponseHead::parse(bytes).unwrap().unwrap();
    assert_eq!(head.status(), 200);
    assert!(head.is_chunked());
    assert_eq!(head.boundary().unwrap().marker(), b"--frame");
    assert_eq!(&bytes[len..], b"--frame");
    assert!(ResponseHead::parse(b"HTTP/1.1 200 OK\r\nContent-Type: multi").unwrap().is_none());
  }

  #[test]
  fn rejects_unexpected_responses() {
    assert!(matches!(
      ResponseHead::parse(b"HTTP/1.1 401 Unauthorized\r\n\r\n"),
      Err(crate::Error::HttpError(HttpError::Unauthorized { status: 401 }))
    ));
    assert!(matches!(
      ResponseHead::parse(b"HTTP/1.0 404 Not Found\r\n\r\n"),
      Err(crate::Error::HttpError(HttpError::UnexpectedStatusCode { received: 404 }))
    ));
    assert!(matches!(
      ResponseHead::parse(b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n"),
      Err(crate::Error::HttpError(HttpError::UnexpectedContentType))
    ));
    assert!(matches!(
      ResponseHead::parse(b"HTTP/1.1 200 OK\r\n\r\n"),
      Err(crate::Error::HttpError(HttpError::UnexpectedContentType))
    ));
  }

  #[tokio::test]
  async fn keeps_body_bytes_read_with_the_head() {
    let data = b"HTTP/1.1 200 OK\r\nContent-Type: multipart/x-mixed-replace\r\n\r\n--myboundary\r\n";
    let mut stream = BytesStream::new(Vec::from(&data[..]), 7);
    let mut buffer = Vec::new();
    let head = read_response_head(&mut stream, &mut buffer, 1024).await.unwrap();
    assert!(head.boundary().is_none());
    assert!(!head.is_chunked());
    assert!(!buffer.is_empty());
    assert!(data[60..].starts_with(&buffer));
    assert_eq!(buffer, b"--m");
  }

  #[tokio::test]
  async fn fails_on_truncated_or_large_heads() {
    let mut stream = BytesStream::new(Vec::from(&b"HTTP/1.1 200 OK\r\n"[..]), 64);
    assert!(matches!(
      read_response_head(&mut stream, &mut Vec::new(), 1024).await,
      Err(crate::Error::UnexpectedStreamReadEOF)
    ));
    let mut data = Vec::from(&b"HTTP/1.1 200 OK\r\nX-Filler: "[..]);
    data.extend_from_slice(&[b'a'; 4096]);
    let mut stream = BytesStream::new(data, 4096);
    assert!(matches!(
      read_response_head(&mut stream, &mut Vec::new(), 1024).await,
      Err(crate::Error::HttpError(HttpError::VeryLargeResponseHead { limit: 1024 }))
    ));
  }
}

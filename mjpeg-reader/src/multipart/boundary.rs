use crate::{
  http::HttpError,
  misc::trim,
  multipart::{MultipartError, MAX_BOUNDARY_LEN},
};
use alloc::vec::Vec;

/// Delimiter that separates the parts of a multipart body.
///
/// The stored marker is `--` followed by the token. Some servers declare a token that already
/// contains the leading dashes and then send it verbatim, so such tokens are kept as they are.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Boundary {
  marker: Vec<u8>,
}

impl Boundary {
  /// Creates an instance from the `boundary` parameter of a `Content-Type` header.
  ///
  /// ```rust
  /// let boundary = mjpeg_reader::multipart::Boundary::new(b"myboundary").unwrap();
  /// assert_eq!(boundary.marker(), b"--myboundary");
  /// ```
  #[inline]
  pub fn new(token: &[u8]) -> crate::Result<Self> {
    if token.is_empty()
      || token.len() > MAX_BOUNDARY_LEN
      || token.iter().any(|el| matches!(el, b'\r' | b'\n'))
    {
      return Err(MultipartError::InvalidBoundary.into());
    }
    let mut marker = Vec::with_capacity(token.len().wrapping_add(2));
    if !token.starts_with(b"--") {
      marker.extend_from_slice(b"--");
    }
    marker.extend_from_slice(token);
    Ok(Self { marker })
  }

  /// Extracts the boundary of a `multipart/*` content type. Returns `None` if the media type
  /// is multipart but the parameter is absent.
  ///
  /// ```rust
  /// let value = b"multipart/x-mixed-replace; boundary=\"frame\"";
  /// let boundary = mjpeg_reader::multipart::Boundary::from_content_type(value).unwrap();
  /// assert_eq!(boundary.unwrap().token(), b"frame");
  /// ```
  #[inline]
  pub fn from_content_type(value: &[u8]) -> crate::Result<Option<Self>> {
    let mut params = value.split(|el| *el == b';');
    let media_type = trim(params.next().unwrap_or_default());
    let is_multipart =
      media_type.get(..10).is_some_and(|el| el.eq_ignore_ascii_case(b"multipart/"));
    if !is_multipart {
      return Err(HttpError::UnexpectedContentType.into());
    }
    for param in params {
      let mut name_value = param.splitn(2, |el| *el == b'=');
      let name = trim(name_value.next().unwrap_or_default());
      let Some(raw_value) = name_value.next() else {
        continue;
      };
      if !name.eq_ignore_ascii_case(b"boundary") {
        continue;
      }
      let token = match trim(raw_value) {
        [b'"', rest @ .., b'"'] => rest,
        elem => elem,
      };
      return Ok(Some(Self::new(token)?));
    }
    Ok(None)
  }

  /// Bytes that are searched in the stream.
  #[inline]
  pub fn marker(&self) -> &[u8] {
    &self.marker
  }

  /// Marker without the leading dashes.
  #[inline]
  pub fn token(&self) -> &[u8] {
    self.marker.get(2..).unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    http::HttpError,
    multipart::{Boundary, MultipartError},
  };

  #[test]
  fn content_type_variants() {
    let boundary =
      Boundary::from_content_type(b"multipart/x-mixed-replace;boundary=myboundary").unwrap();
    assert_eq!(boundary.unwrap().marker(), b"--myboundary");
    let boundary =
      Boundary::from_content_type(b"Multipart/X-Mixed-Replace; charset=utf-8; BOUNDARY=\"a b\"")
        .unwrap();
    assert_eq!(boundary.unwrap().marker(), b"--a b");
    let boundary = Boundary::from_content_type(b"multipart/x-mixed-replace; boundary=--ipcam");
    assert_eq!(boundary.unwrap().unwrap().marker(), b"--ipcam");
    assert_eq!(Boundary::from_content_type(b"multipart/x-mixed-replace").unwrap(), None);
  }

  #[test]
  fn invalid_values() {
    assert!(matches!(
      Boundary::from_content_type(b"image/jpeg"),
      Err(crate::Error::HttpError(HttpError::UnexpectedContentType))
    ));
    assert!(matches!(
      Boundary::new(b""),
      Err(crate::Error::MultipartError(MultipartError::InvalidBoundary))
    ));
    assert!(Boundary::new(b"a\r\nb").is_err());
  }
}

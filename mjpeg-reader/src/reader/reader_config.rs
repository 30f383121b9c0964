use crate::{
  decoder::DecoderError,
  misc::{FromRadix10, FromVars},
  DFLT_MAX_BUFFER_LEN, DFLT_MAX_HEADER_LEN,
};
use alloc::string::String;
use core::time::Duration;

const DFLT_DECODE_QUEUE_LEN: usize = 4;
const DFLT_READ_BUFFER_LEN: usize = 16 * 1024;

/// Parameters of [`crate::reader::MjpegReader`].
///
/// Can be loaded from the environment through [`crate::misc::EnvVars`], in which case absent
/// variables keep their default values.
///
/// | Variable | Field |
/// | --- | --- |
/// | `MJPEG_CONNECT_TIMEOUT_MS` | [`Self::connect_timeout`] |
/// | `MJPEG_DECODE_QUEUE_LEN` | [`Self::decode_queue_len`] |
/// | `MJPEG_IMAGE_SCALE` | [`Self::image_scale`] |
/// | `MJPEG_MAX_BUFFER_LEN` | [`Self::max_buffer_len`] |
/// | `MJPEG_MAX_HEADER_LEN` | [`Self::max_header_len`] |
/// | `MJPEG_READ_BUFFER_LEN` | [`Self::read_buffer_len`] |
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReaderConfig {
  connect_timeout: Option<Duration>,
  decode_queue_len: usize,
  image_scale: f64,
  max_buffer_len: usize,
  max_header_len: usize,
  read_buffer_len: usize,
}

impl ReaderConfig {
  /// Maximum amount of time to establish a connection. Defaults to no limit.
  #[inline]
  pub const fn connect_timeout(&self) -> Option<Duration> {
    self.connect_timeout
  }

  /// Frames that can wait for their decoding before the parsing of the stream is held back.
  /// Defaults to 4.
  #[inline]
  pub const fn decode_queue_len(&self) -> usize {
    self.decode_queue_len
  }

  /// Rendering scale attached to decoded images. Defaults to 1.
  #[inline]
  pub const fn image_scale(&self) -> f64 {
    self.image_scale
  }

  /// See [`crate::multipart::Demultiplexer::set_max_buffer_len`]. Defaults to
  /// [`DFLT_MAX_BUFFER_LEN`].
  #[inline]
  pub const fn max_buffer_len(&self) -> usize {
    self.max_buffer_len
  }

  /// See [`crate::multipart::Demultiplexer::set_max_header_len`]. Defaults to
  /// [`DFLT_MAX_HEADER_LEN`].
  #[inline]
  pub const fn max_header_len(&self) -> usize {
    self.max_header_len
  }

  /// Number of bytes requested from the socket in each read. Defaults to 16 KiB.
  #[inline]
  pub const fn read_buffer_len(&self) -> usize {
    self.read_buffer_len
  }

  /// Mutable version of [`Self::connect_timeout`].
  #[inline]
  pub fn set_connect_timeout(&mut self, value: Option<Duration>) -> &mut Self {
    self.connect_timeout = value;
    self
  }

  /// Mutable version of [`Self::decode_queue_len`]. Zero is treated as one.
  #[inline]
  pub fn set_decode_queue_len(&mut self, value: usize) -> &mut Self {
    self.decode_queue_len = value.max(1);
    self
  }

  /// Mutable version of [`Self::image_scale`]. The scale must be finite and positive.
  #[inline]
  pub fn set_image_scale(&mut self, value: f64) -> crate::Result<&mut Self> {
    if !value.is_finite() || value <= 0.0 {
      return Err(DecoderError::InvalidScale.into());
    }
    self.image_scale = value;
    Ok(self)
  }

  /// Mutable version of [`Self::max_buffer_len`].
  #[inline]
  pub fn set_max_buffer_len(&mut self, value: usize) -> &mut Self {
    self.max_buffer_len = value;
    self
  }

  /// Mutable version of [`Self::max_header_len`].
  #[inline]
  pub fn set_max_header_len(&mut self, value: usize) -> &mut Self {
    self.max_header_len = value;
    self
  }

  /// Mutable version of [`Self::read_buffer_len`]. Zero is treated as one.
  #[inline]
  pub fn set_read_buffer_len(&mut self, value: usize) -> &mut Self {
    self.read_buffer_len = value.max(1);
    self
  }
}

impl Default for ReaderConfig {
  #[inline]
  fn default() -> Self {
    Self {
      connect_timeout: None,
      decode_queue_len: DFLT_DECODE_QUEUE_LEN,
      image_scale: 1.0,
      max_buffer_len: DFLT_MAX_BUFFER_LEN,
      max_header_len: DFLT_MAX_HEADER_LEN,
      read_buffer_len: DFLT_READ_BUFFER_LEN,
    }
  }
}

impl FromVars for ReaderConfig {
  #[inline]
  fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> crate::Result<Self> {
    let mut this = Self::default();
    for (key, value) in vars {
      match key.as_str() {
        "MJPEG_CONNECT_TIMEOUT_MS" => {
          let millis = u64::from_radix_10(value.trim().as_bytes())?;
          let _ = this.set_connect_timeout(Some(Duration::from_millis(millis)));
        }
        "MJPEG_DECODE_QUEUE_LEN" => {
          let _ = this.set_decode_queue_len(usize::from_radix_10(value.trim().as_bytes())?);
        }
        "MJPEG_IMAGE_SCALE" => {
          let _ = this.set_image_scale(value.trim().parse()?)?;
        }
        "MJPEG_MAX_BUFFER_LEN" => {
          let _ = this.set_max_buffer_len(usize::from_radix_10(value.trim().as_bytes())?);
        }
        "MJPEG_MAX_HEADER_LEN" => {
          let _ = this.set_max_header_len(usize::from_radix_10(value.trim().as_bytes())?);
        }
        "MJPEG_READ_BUFFER_LEN" => {
          let _ = this.set_read_buffer_len(usize::from_radix_10(value.trim().as_bytes())?);
        }
        _ => {}
      }
    }
    Ok(this)
  }
}

#[cfg(test)]
mod tests {
  use crate::{misc::EnvVars, reader::ReaderConfig, DFLT_MAX_HEADER_LEN};
  use alloc::{string::String, vec};
  use core::time::Duration;

  #[test]
  fn loads_present_variables() {
    let vars = vec![
      (String::from("MJPEG_IMAGE_SCALE"), String::from("2.5")),
      (String::from("MJPEG_MAX_BUFFER_LEN"), String::from("1048576")),
      (String::from("MJPEG_CONNECT_TIMEOUT_MS"), String::from(" 1500 ")),
      (String::from("MJPEG_DECODE_QUEUE_LEN"), String::from("0")),
      (String::from("PATH"), String::from("/usr/bin")),
    ];
    let config = EnvVars::<ReaderConfig>::from_iterator(vars).unwrap().finish();
    assert_eq!(config.image_scale(), 2.5);
    assert_eq!(config.max_buffer_len(), 1_048_576);
    assert_eq!(config.max_header_len(), DFLT_MAX_HEADER_LEN);
    assert_eq!(config.connect_timeout(), Some(Duration::from_millis(1500)));
    assert_eq!(config.decode_queue_len(), 1);
  }

  #[test]
  fn rejects_invalid_values() {
    let vars = vec![(String::from("MJPEG_MAX_HEADER_LEN"), String::from("8k"))];
    assert!(matches!(
      EnvVars::<ReaderConfig>::from_iterator(vars),
      Err(crate::Error::AtoiInvalidBytes)
    ));
    let vars = vec![(String::from("MJPEG_IMAGE_SCALE"), String::from("two"))];
    assert!(matches!(
      EnvVars::<ReaderConfig>::from_iterator(vars),
      Err(crate::Error::ParseFloatError(_))
    ));
    let vars = vec![(String::from("MJPEG_IMAGE_SCALE"), String::from("-1"))];
    assert!(EnvVars::<ReaderConfig>::from_iterator(vars).is_err());
    assert!(ReaderConfig::default().set_image_scale(f64::INFINITY).is_err());
  }
}

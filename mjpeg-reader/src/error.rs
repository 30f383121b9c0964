use crate::{decoder::DecoderError, http::HttpError, multipart::MultipartError};
#[allow(unused_imports, reason = "Depends on the selection of features")]
use alloc::boxed::Box;
use core::fmt::{Debug, Display, Formatter};

/// Grouped individual errors
#[derive(Debug)]
pub enum Error {
  // External - Misc
  //
  /// See [`base64::EncodeSliceError`].
  EncodeSliceError(base64::EncodeSliceError),
  /// See [`httparse::Error`].
  HttpParse(httparse::Error),
  /// See [`image::ImageError`].
  #[cfg(feature = "image")]
  ImageError(Box<image::ImageError>),
  /// See [`tokio::task::JoinError`].
  #[cfg(feature = "tokio")]
  TokioJoinError(Box<tokio::task::JoinError>),
  /// See [`tracing_subscriber::util::TryInitError`].
  #[cfg(feature = "_tracing-subscriber")]
  TryInitError(tracing_subscriber::util::TryInitError),

  // External - Std
  //
  /// See [`std::io::Error`].
  #[cfg(feature = "std")]
  IoError(std::io::Error),
  /// See [`core::num::ParseFloatError`].
  ParseFloatError(core::num::ParseFloatError),

  // Generic
  //
  /// Bytes don't represent a decimal number that fits the expected type.
  AtoiInvalidBytes,
  /// The receiving side of the notifications was dropped.
  ClosedPresenter,
  /// Invalid URI
  InvalidUri,
  /// Tasks can only be spawned inside a Tokio runtime.
  MissingRuntime,
  /// A variant used to transform `Option`s into `Result`s
  NoInnerValue(&'static str),
  /// Unexpected end of file when reading from a stream.
  UnexpectedStreamReadEOF,
  /// The scheme of an URI isn't supported by the set of enabled features.
  UnsupportedScheme,

  // Internal
  //
  /// See [`DecoderError`].
  DecoderError(DecoderError),
  /// See [`HttpError`].
  HttpError(HttpError),
  /// See [`MultipartError`].
  MultipartError(MultipartError),
}

impl Display for Error {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for Error {}

impl From<base64::EncodeSliceError> for Error {
  #[inline]
  fn from(from: base64::EncodeSliceError) -> Self {
    Self::EncodeSliceError(from)
  }
}

impl From<httparse::Error> for Error {
  #[inline]
  fn from(from: httparse::Error) -> Self {
    Self::HttpParse(from)
  }
}

#[cfg(feature = "image")]
impl From<image::ImageError> for Error {
  #[inline]
  fn from(from: image::ImageError) -> Self {
    Self::ImageError(from.into())
  }
}

#[cfg(feature = "tokio")]
impl From<tokio::task::JoinError> for Error {
  #[inline]
  fn from(from: tokio::task::JoinError) -> Self {
    Self::TokioJoinError(from.into())
  }
}

#[cfg(feature = "tokio")]
impl From<tokio::time::error::Elapsed> for Error {
  #[inline]
  fn from(from: tokio::time::error::Elapsed) -> Self {
    Self::IoError(from.into())
  }
}

#[cfg(feature = "_tracing-subscriber")]
impl From<tracing_subscriber::util::TryInitError> for Error {
  #[inline]
  fn from(from: tracing_subscriber::util::TryInitError) -> Self {
    Self::TryInitError(from)
  }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
  #[inline]
  fn from(from: std::io::Error) -> Self {
    Self::IoError(from)
  }
}

impl From<core::num::ParseFloatError> for Error {
  #[inline]
  fn from(from: core::num::ParseFloatError) -> Self {
    Self::ParseFloatError(from)
  }
}

// Internal

impl From<DecoderError> for Error {
  #[inline]
  fn from(from: DecoderError) -> Self {
    Self::DecoderError(from)
  }
}

impl From<HttpError> for Error {
  #[inline]
  fn from(from: HttpError) -> Self {
    Self::HttpError(from)
  }
}

impl From<MultipartError> for Error {
  #[inline]
  fn from(from: MultipartError) -> Self {
    Self::MultipartError(from)
  }
}

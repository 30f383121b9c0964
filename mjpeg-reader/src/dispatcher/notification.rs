use crate::{decoder::DecodedImage, dispatcher::FrameObserver};

/// Something that happened to the active session.
#[derive(Debug)]
pub enum Notification<I> {
  /// Per-frame decoding failure or fatal session error.
  Error(crate::Error),
  /// Decoded frame
  Image(DecodedImage<I>),
}

impl<I> Notification<I> {
  /// Calls the corresponding method of `observer`.
  #[inline]
  pub fn deliver<O>(self, observer: &mut O)
  where
    O: FrameObserver<I> + ?Sized,
  {
    match self {
      Self::Error(error) => observer.on_error(error),
      Self::Image(image) => observer.on_image(image),
    }
  }
}

use crate::decoder::DecodedImage;

/// Receives the outcome of every frame of the active session.
pub trait FrameObserver<I> {
  /// A frame was decoded.
  fn on_image(&mut self, image: DecodedImage<I>);

  /// A frame couldn't be decoded or the session ended with an error.
  fn on_error(&mut self, error: crate::Error);
}

impl<I, T> FrameObserver<I> for &mut T
where
  T: FrameObserver<I>,
{
  #[inline]
  fn on_image(&mut self, image: DecodedImage<I>) {
    (**self).on_image(image);
  }

  #[inline]
  fn on_error(&mut self, error: crate::Error) {
    (**self).on_error(error);
  }
}

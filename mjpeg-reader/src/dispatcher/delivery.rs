use crate::{
  decoder::{decode_payload, DecodedImage, FrameDecoder},
  dispatcher::{Envelope, Notification, PresentationSender},
  multipart::FramePayload,
};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};
use tokio::{sync::mpsc, task::JoinHandle};

/// Decodes the frames of a single session and forwards the results in extraction order.
#[derive(Debug)]
pub(crate) struct Dispatcher<D>
where
  D: FrameDecoder,
{
  decoder: Arc<D>,
  pending: mpsc::Sender<Pending<D::Image>>,
  scale: Arc<AtomicU64>,
}

impl<D> Dispatcher<D>
where
  D: FrameDecoder + Send + Sync + 'static,
  D::Image: Send + 'static,
{
  /// Spawns the task that forwards notifications of `session`. At most `queue_len` frames wait
  /// for their decoding, which is where the parsing task starts to be held back.
  pub(crate) fn new(
    decoder: Arc<D>,
    presentation: PresentationSender<D::Image>,
    queue_len: usize,
    scale: Arc<AtomicU64>,
    session: u64,
  ) -> (Self, JoinHandle<()>) {
    let (pending, receiver) = mpsc::channel(queue_len.max(1));
    let forwarder = tokio::spawn(forward(receiver, presentation, session));
    (Self { decoder, pending, scale }, forwarder)
  }

  /// Queues an error after every frame that was already dispatched.
  pub(crate) async fn dispatch_error(&self, error: crate::Error) {
    let _rslt = self.pending.send(Pending::Error(error)).await;
  }

  /// Starts decoding `payload` in the blocking pool.
  pub(crate) async fn dispatch_frame(&self, payload: FramePayload) -> crate::Result<()> {
    let decoder = Arc::clone(&self.decoder);
    let scale = f64::from_bits(self.scale.load(Ordering::Relaxed));
    let handle = tokio::task::spawn_blocking(move || decode_payload(&*decoder, payload, scale));
    self.pending.send(Pending::Decode(handle)).await.map_err(|_err| crate::Error::ClosedPresenter)
  }
}

#[derive(Debug)]
enum Pending<I> {
  Decode(JoinHandle<crate::Result<DecodedImage<I>>>),
  Error(crate::Error),
}

async fn forward<I>(
  mut receiver: mpsc::Receiver<Pending<I>>,
  presentation: PresentationSender<I>,
  session: u64,
) {
  while let Some(pending) = receiver.recv().await {
    let notification = match pending {
      Pending::Decode(handle) => match handle.await {
        Ok(Ok(image)) => Notification::Image(image),
        Ok(Err(err)) => {
          _debug!("Frame couldn't be decoded: {err}");
          Notification::Error(err)
        }
        Err(err) => Notification::Error(err.into()),
      },
      Pending::Error(err) => Notification::Error(err),
    };
    if presentation.send(Envelope { notification, session }).is_err() {
      _debug!(session, "Presenter was dropped");
      return;
    }
  }
}

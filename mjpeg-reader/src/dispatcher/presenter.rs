use crate::dispatcher::{Envelope, FrameObserver, Notification};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Receiving end of the notifications of a reader.
///
/// Notifications of sessions that were stopped or replaced are silently dropped.
#[derive(Debug)]
pub struct Presenter<I> {
  active: Arc<AtomicU64>,
  receiver: mpsc::UnboundedReceiver<Envelope<I>>,
}

impl<I> Presenter<I> {
  pub(crate) fn new(active: Arc<AtomicU64>, receiver: mpsc::UnboundedReceiver<Envelope<I>>) -> Self {
    Self { active, receiver }
  }

  /// Blocks the current thread until a notification of the active session arrives. Returns
  /// `None` when the reader and all its sessions are gone.
  ///
  /// Panics if called within an asynchronous execution context.
  #[inline]
  pub fn blocking_recv(&mut self) -> Option<Notification<I>> {
    loop {
      let envelope = self.receiver.blocking_recv()?;
      if let Some(elem) = self.filter(envelope) {
        return Some(elem);
      }
    }
  }

  /// Delivers every notification that is already available and returns how many of them were
  /// delivered. Useful inside the event loop of a user interface.
  #[inline]
  pub fn dispatch_pending<O>(&mut self, observer: &mut O) -> usize
  where
    O: FrameObserver<I> + ?Sized,
  {
    let mut delivered: usize = 0;
    while let Some(notification) = self.try_recv() {
      notification.deliver(observer);
      delivered = delivered.wrapping_add(1);
    }
    delivered
  }

  /// Waits for the next notification of the active session. Returns `None` when the reader and
  /// all its sessions are gone.
  #[inline]
  pub async fn recv(&mut self) -> Option<Notification<I>> {
    loop {
      let envelope = self.receiver.recv().await?;
      if let Some(elem) = self.filter(envelope) {
        return Some(elem);
      }
    }
  }

  /// Delivers notifications to `observer` until the reader is dropped.
  #[inline]
  pub async fn run<O>(&mut self, observer: &mut O)
  where
    O: FrameObserver<I> + ?Sized,
  {
    while let Some(notification) = self.recv().await {
      notification.deliver(observer);
    }
  }

  /// Returns a notification of the active session if one is immediately available.
  #[inline]
  pub fn try_recv(&mut self) -> Option<Notification<I>> {
    loop {
      let envelope = self.receiver.try_recv().ok()?;
      if let Some(elem) = self.filter(envelope) {
        return Some(elem);
      }
    }
  }

  fn filter(&self, envelope: Envelope<I>) -> Option<Notification<I>> {
    if envelope.session == self.active.load(Ordering::Acquire) {
      Some(envelope.notification)
    } else {
      _trace!(session = envelope.session, "Dropping notification of an inactive session");
      None
    }
  }
}

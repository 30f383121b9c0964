//! Ordered delivery of decoded frames to a presentation context.
//!
//! Frames are decoded in parallel on the blocking pool of the runtime but notifications always
//! leave in the order their payloads were extracted. Whatever task or thread drives the
//! [`Presenter`] becomes the presentation context.

mod delivery;
mod frame_observer;
mod notification;
mod presenter;

use alloc::sync::Arc;
use core::sync::atomic::AtomicU64;
pub(crate) use delivery::Dispatcher;
pub use frame_observer::FrameObserver;
pub use notification::Notification;
pub use presenter::Presenter;
use tokio::sync::mpsc;

/// Notification tagged with the session that produced it.
#[derive(Debug)]
pub(crate) struct Envelope<I> {
  pub(crate) notification: Notification<I>,
  pub(crate) session: u64,
}

pub(crate) type PresentationSender<I> = mpsc::UnboundedSender<Envelope<I>>;

/// `active` holds the number of the session whose notifications are delivered. Zero means none.
pub(crate) fn presentation_channel<I>(
  active: Arc<AtomicU64>,
) -> (PresentationSender<I>, Presenter<I>) {
  let (sender, receiver) = mpsc::unbounded_channel();
  (sender, Presenter::new(active, receiver))
}

//! Presents frames on a dedicated thread while the runtime takes care of the network.
//!
//! The thread that calls `Presenter::blocking_recv` is the only one that sees images, as it
//! happens with the main thread of graphical toolkits.

extern crate image;
extern crate mjpeg_reader;
extern crate mjpeg_reader_instances;
extern crate tokio;

use core::time::Duration;
use image::GenericImageView;
use mjpeg_reader::{
  decoder::JpegDecoder,
  dispatcher::Notification,
  reader::{MjpegReader, ReaderConfig},
};

const FRAMES: u64 = 50;

fn main() -> mjpeg_reader::Result<()> {
  let runtime = tokio::runtime::Runtime::new()?;
  let (mut reader, mut presenter) = MjpegReader::new(ReaderConfig::default(), JpegDecoder);
  {
    let _guard = runtime.enter();
    reader.start(&mjpeg_reader_instances::uri_from_args(), None, None)?;
  }
  let presentation = std::thread::spawn(move || {
    let mut presented: u64 = 0;
    while let Some(notification) = presenter.blocking_recv() {
      match notification {
        Notification::Error(err) => eprintln!("{err}"),
        Notification::Image(image) => {
          let (width, height) = image.image().dimensions();
          println!("#{}: {width}x{height}", image.sequence());
          presented = presented.wrapping_add(1);
          if presented >= FRAMES {
            break;
          }
        }
      }
    }
    presented
  });
  while !presentation.is_finished() && reader.is_running() {
    std::thread::sleep(Duration::from_millis(50));
  }
  // Closes the notification channel, which also releases a presenter that is still waiting.
  drop(reader);
  if let Ok(presented) = presentation.join() {
    println!("Presented {presented} frame(s)");
  }
  Ok(())
}

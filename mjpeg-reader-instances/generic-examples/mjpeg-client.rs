//! Logs the frames of an MJPEG stream until `Ctrl-C` is pressed.
//!
//! Parameters are read from `MJPEG_*` environment variables and `RUST_LOG` controls the
//! verbosity of the reader.

extern crate image;
extern crate mjpeg_reader;
extern crate mjpeg_reader_instances;
extern crate tokio;

use image::{DynamicImage, GenericImageView};
use mjpeg_reader::{
  decoder::{DecodedImage, JpegDecoder},
  dispatcher::FrameObserver,
  misc::{tracing_tree_init, EnvVars},
  reader::{MjpegReader, ReaderConfig},
};

#[tokio::main]
async fn main() -> mjpeg_reader::Result<()> {
  tracing_tree_init(Some("mjpeg_reader=debug"))?;
  let config = EnvVars::<ReaderConfig>::from_process()?.finish();
  let (mut reader, mut presenter) = MjpegReader::new(config, JpegDecoder);
  reader.start(&mjpeg_reader_instances::uri_from_args(), None, None)?;
  let mut observer = Logger::default();
  tokio::select! {
    () = presenter.run(&mut observer) => {}
    rslt = tokio::signal::ctrl_c() => rslt?,
  }
  reader.stop();
  println!("Received {} frame(s) and {} error(s)", observer.images, observer.errors);
  Ok(())
}

#[derive(Debug, Default)]
struct Logger {
  errors: u64,
  images: u64,
}

impl FrameObserver<DynamicImage> for Logger {
  fn on_image(&mut self, image: DecodedImage<DynamicImage>) {
    self.images = self.images.wrapping_add(1);
    let (width, height) = image.image().dimensions();
    println!("#{}: {width}x{height} at scale {}", image.sequence(), image.scale());
  }

  fn on_error(&mut self, error: mjpeg_reader::Error) {
    self.errors = self.errors.wrapping_add(1);
    eprintln!("{error}");
  }
}

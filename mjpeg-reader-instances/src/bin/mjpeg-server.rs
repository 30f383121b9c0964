//! Serves an endless MJPEG stream of generated frames to every connected client.
//!
//! Useful to exercise readers without a camera. Requests aren't inspected beyond their head.

extern crate mjpeg_reader;
extern crate mjpeg_reader_instances;
extern crate tokio;

use core::time::Duration;
use tokio::{
  io::{AsyncReadExt, AsyncWriteExt},
  net::{TcpListener, TcpStream},
};

const BOUNDARY: &str = "frame";
const INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> mjpeg_reader::Result<()> {
  let listener = TcpListener::bind(mjpeg_reader_instances::host_from_args()).await?;
  loop {
    let (stream, peer) = listener.accept().await?;
    let _jh = tokio::spawn(async move {
      if let Err(err) = serve(stream).await {
        eprintln!("{peer}: {err}");
      }
    });
  }
}

async fn serve(mut stream: TcpStream) -> mjpeg_reader::Result<()> {
  let mut request = Vec::new();
  let mut buffer = [0; 1024];
  while !request.windows(4).any(|elem| elem == b"\r\n\r\n") {
    let read = stream.read(&mut buffer).await?;
    if read == 0 {
      return Ok(());
    }
    request.extend_from_slice(buffer.get(..read).unwrap_or_default());
  }
  let head = format!(
    "HTTP/1.1 200 OK\r\nCache-Control: no-cache\r\nConnection: close\r\nContent-Type: multipart/x-mixed-replace; boundary={BOUNDARY}\r\n\r\n"
  );
  stream.write_all(head.as_bytes()).await?;
  let mut idx: u32 = 0;
  loop {
    let jpeg = mjpeg_reader_instances::test_pattern(idx)?;
    stream.write_all(&mjpeg_reader_instances::multipart_part(BOUNDARY, &jpeg)).await?;
    idx = idx.wrapping_add(1);
    tokio::time::sleep(INTERVAL).await;
  }
}

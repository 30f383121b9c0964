#[cfg(feature = "tokio-rustls")]
use crate::misc::tls_client;
use crate::{
  decoder::FrameDecoder,
  dispatcher::Dispatcher,
  http::{read_response_head, write_request, BodyDecoder, MAX_RESPONSE_HEAD_LEN},
  misc::UriString,
  multipart::Demultiplexer,
  reader::ReaderConfig,
  stream::Stream,
};
use alloc::{string::String, vec, vec::Vec};
use tokio::net::TcpStream;

/// Connection task of a single `start` call.
pub(crate) struct Session<D>
where
  D: FrameDecoder,
{
  pub(crate) config: ReaderConfig,
  pub(crate) credentials: Option<(String, String)>,
  pub(crate) dispatcher: Dispatcher<D>,
  pub(crate) id: u64,
  pub(crate) uri: UriString,
}

impl<D> Session<D>
where
  D: FrameDecoder + Send + Sync + 'static,
  D::Image: Send + 'static,
{
  /// Reads the stream until it ends, fails or the task is aborted. Errors are delivered after
  /// all frames that were extracted before them.
  pub(crate) async fn run(self) {
    let _id = self.id;
    match self.connect().await {
      Ok(()) => {
        _debug!(session = _id, "Stream ended");
      }
      Err(crate::Error::ClosedPresenter) => {
        _debug!(session = _id, "Nobody is listening to notifications");
      }
      Err(err) => {
        _warn!(session = _id, "Session ended with an error: {err}");
        self.dispatcher.dispatch_error(err).await;
      }
    }
  }

  async fn connect(&self) -> crate::Result<()> {
    let (hostname, port) = self.uri.hostname_with_implied_port();
    let connect = TcpStream::connect((hostname, port));
    let tcp_stream = match self.config.connect_timeout() {
      Some(timeout) => tokio::time::timeout(timeout, connect).await??,
      None => connect.await?,
    };
    _debug!(session = self.id, hostname, port, "Connected");
    match self.uri.scheme() {
      "http" => self.read_stream(tcp_stream).await,
      #[cfg(feature = "tokio-rustls")]
      "https" => self.read_stream(tls_client(hostname, tcp_stream).await?).await,
      _ => Err(crate::Error::UnsupportedScheme),
    }
  }

  async fn read_stream<S>(&self, mut stream: S) -> crate::Result<()>
  where
    S: Stream,
  {
    let mut buffer = Vec::new();
    let credentials =
      self.credentials.as_ref().map(|(user, password)| (user.as_str(), password.as_str()));
    write_request(&mut buffer, &self.uri.to_ref(), credentials)?;
    stream.write_all(&buffer).await?;
    buffer.clear();
    let head = read_response_head(&mut stream, &mut buffer, MAX_RESPONSE_HEAD_LEN).await?;
    let mut body_decoder = BodyDecoder::new(head.is_chunked());
    let mut demux = Demultiplexer::new(head.into_boundary());
    let _ = demux
      .set_max_buffer_len(self.config.max_buffer_len())
      .set_max_header_len(self.config.max_header_len());
    match demux.boundary() {
      Some(_boundary) => {
        _debug!(marker = ?core::str::from_utf8(_boundary.marker()), "Negotiated boundary");
      }
      None => {
        _debug!("Boundary will be detected from the body");
      }
    }
    let rslt = self.read_body(&mut stream, &mut body_decoder, &mut demux, buffer).await;
    let _discarded = demux.finish();
    rslt
  }

  async fn read_body<S>(
    &self,
    stream: &mut S,
    body_decoder: &mut BodyDecoder,
    demux: &mut Demultiplexer,
    leftover: Vec<u8>,
  ) -> crate::Result<()>
  where
    S: Stream,
  {
    let mut decoded = Vec::new();
    self.feed(body_decoder, demux, &leftover, &mut decoded).await?;
    let mut read_buffer = vec![0; self.config.read_buffer_len()];
    while !body_decoder.is_finished() {
      let read = stream.read(&mut read_buffer).await?;
      if read == 0 {
        return body_decoder.finish();
      }
      self.feed(body_decoder, demux, read_buffer.get(..read).unwrap_or_default(), &mut decoded).await?;
    }
    Ok(())
  }

  async fn feed(
    &self,
    body_decoder: &mut BodyDecoder,
    demux: &mut Demultiplexer,
    input: &[u8],
    decoded: &mut Vec<u8>,
  ) -> crate::Result<()> {
    demux.extend(body_decoder.decode(input, decoded)?)?;
    while let Some(frame) = demux.next_frame()? {
      self.dispatcher.dispatch_frame(frame).await?;
    }
    Ok(())
  }
}

//! Byte sources that feed the reader.

use alloc::vec::Vec;
use core::{cmp::Ordering, future::Future};

/// A connection that produces and accepts bytes asynchronously.
///
/// Returned futures are `Send` so that sessions can be spawned into multi-threaded runtimes.
pub trait Stream {
  /// Pulls some bytes from this source into the specified buffer, returning how many bytes
  /// were read. Zero means that the source was closed.
  fn read(&mut self, bytes: &mut [u8]) -> impl Future<Output = crate::Result<usize>> + Send;

  /// Attempts to write all elements of `bytes`.
  fn write_all(&mut self, bytes: &[u8]) -> impl Future<Output = crate::Result<()>> + Send;
}

impl<T> Stream for &mut T
where
  T: Send + Stream,
{
  #[inline]
  async fn read(&mut self, bytes: &mut [u8]) -> crate::Result<usize> {
    (**self).read(bytes).await
  }

  #[inline]
  async fn write_all(&mut self, bytes: &[u8]) -> crate::Result<()> {
    (**self).write_all(bytes).await
  }
}

/// Replays previously stored data. Written bytes are kept separately.
#[derive(Debug, Default)]
pub struct BytesStream {
  idx: usize,
  max_read_len: usize,
  read_data: Vec<u8>,
  written: Vec<u8>,
}

impl BytesStream {
  /// Instance that returns the elements of `read_data` in reads of at most `max_read_len` bytes.
  #[inline]
  pub fn new(read_data: Vec<u8>, max_read_len: usize) -> Self {
    Self { idx: 0, max_read_len: max_read_len.max(1), read_data, written: Vec::new() }
  }

  /// Bytes provided by [`Stream::write_all`].
  #[inline]
  pub fn written(&self) -> &[u8] {
    &self.written
  }
}

impl Stream for BytesStream {
  #[inline]
  async fn read(&mut self, bytes: &mut [u8]) -> crate::Result<usize> {
    let remaining = self.read_data.get(self.idx..).unwrap_or_default();
    let working_buffer = remaining.get(..self.max_read_len).unwrap_or(remaining);
    let working_buffer_len = working_buffer.len();
    let read = match working_buffer_len.cmp(&bytes.len()) {
      Ordering::Less | Ordering::Equal => {
        bytes.get_mut(..working_buffer_len).unwrap_or_default().copy_from_slice(working_buffer);
        working_buffer_len
      }
      Ordering::Greater => {
        bytes.copy_from_slice(working_buffer.get(..bytes.len()).unwrap_or_default());
        bytes.len()
      }
    };
    self.idx = self.idx.wrapping_add(read);
    Ok(read)
  }

  #[inline]
  async fn write_all(&mut self, bytes: &[u8]) -> crate::Result<()> {
    self.written.extend_from_slice(bytes);
    Ok(())
  }
}

#[cfg(feature = "tokio")]
mod tokio {
  use crate::stream::Stream;
  use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
  };

  impl Stream for TcpStream {
    #[inline]
    async fn read(&mut self, bytes: &mut [u8]) -> crate::Result<usize> {
      Ok(<Self as AsyncReadExt>::read(self, bytes).await?)
    }

    #[inline]
    async fn write_all(&mut self, bytes: &[u8]) -> crate::Result<()> {
      <Self as AsyncWriteExt>::write_all(self, bytes).await?;
      Ok(())
    }
  }
}

#[cfg(feature = "tokio-rustls")]
mod tokio_rustls {
  use crate::stream::Stream;
  use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

  impl<T> Stream for tokio_rustls::client::TlsStream<T>
  where
    T: AsyncRead + AsyncWrite + Send + Unpin,
  {
    #[inline]
    async fn read(&mut self, bytes: &mut [u8]) -> crate::Result<usize> {
      Ok(<Self as AsyncReadExt>::read(self, bytes).await?)
    }

    #[inline]
    async fn write_all(&mut self, bytes: &[u8]) -> crate::Result<()> {
      <Self as AsyncWriteExt>::write_all(self, bytes).await?;
      Ok(())
    }
  }
}

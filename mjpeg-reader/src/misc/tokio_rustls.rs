use alloc::{boxed::Box, string::String, vec};
use rustls_pki_types::ServerName;
use std::sync::{Arc, OnceLock};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_rustls::{
  client::TlsStream,
  rustls::{ClientConfig, RootCertStore},
  TlsConnector,
};

/// Wraps `stream` with a TLS session that trusts the roots of the `webpki-roots` project.
///
/// Cameras only speak HTTP/1.1, which is the only advertised ALPN protocol.
#[inline]
pub async fn tls_client<S>(hostname: &str, stream: S) -> crate::Result<TlsStream<S>>
where
  S: AsyncRead + AsyncWrite + Unpin,
{
  static CONFIG: OnceLock<Arc<ClientConfig>> = OnceLock::new();
  let config = CONFIG.get_or_init(|| {
    let mut store = RootCertStore::empty();
    store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let mut config = ClientConfig::builder().with_root_certificates(store).with_no_client_auth();
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    Arc::new(config)
  });
  let connector = TlsConnector::from(Arc::clone(config));
  Ok(connector.connect(server_name(hostname)?, stream).await?)
}

fn server_name(hostname: &str) -> crate::Result<ServerName<'static>> {
  Ok(ServerName::try_from(String::from(hostname)).map_err(invalid_input_err)?)
}

fn invalid_input_err<E>(err: E) -> std::io::Error
where
  E: Into<Box<dyn core::error::Error + Send + Sync>>,
{
  std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
}

#[cfg(test)]
mod tests {
  use crate::misc::tokio_rustls::server_name;

  #[test]
  fn validates_hostnames() {
    assert!(server_name("camera.local").is_ok());
    assert!(server_name("192.168.0.10").is_ok());
    assert!(matches!(server_name("not a hostname"), Err(crate::Error::IoError(_))));
  }
}

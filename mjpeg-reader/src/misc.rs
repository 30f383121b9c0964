//! Miscellaneous

mod env_vars;
mod from_radix_10;
#[cfg(feature = "tokio-rustls")]
mod tokio_rustls;
mod uri;

#[cfg(feature = "tokio-rustls")]
pub use self::tokio_rustls::tls_client;
use core::any::type_name;
pub use env_vars::{EnvVars, FromVars};
pub use from_radix_10::FromRadix10;
pub use uri::{Uri, UriRef, UriString};

/// Useful when a request returns an optional field but the actual usage is within a
/// [`core::result::Result`] context.
#[track_caller]
#[inline]
pub fn into_rslt<T>(opt: Option<T>) -> crate::Result<T> {
  opt.ok_or(crate::Error::NoInnerValue(type_name::<T>()))
}

/// A tracing register with optioned parameters.
#[cfg(feature = "_tracing-subscriber")]
pub fn tracing_tree_init(
  fallback_opt: Option<&str>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
  use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
  };
  let fallback = fallback_opt.unwrap_or("");
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  let tracing_tree = tracing_tree::HierarchicalLayer::default()
    .with_deferred_spans(true)
    .with_indent_amount(2)
    .with_indent_lines(true)
    .with_span_retrace(true)
    .with_targets(true)
    .with_thread_ids(true)
    .with_thread_names(true)
    .with_verbose_entry(false)
    .with_verbose_exit(false)
    .with_writer(std::io::stderr);
  tracing_subscriber::Registry::default().with(env_filter).with(tracing_tree).try_init()
}

/// Position of the first `byte` in `bytes`.
#[inline]
pub(crate) fn bytes_pos1(bytes: &[u8], byte: u8) -> Option<usize> {
  memchr::memchr(byte, bytes)
}

/// Position of the first occurrence of `needle` in `haystack`.
#[inline]
pub(crate) fn bytes_find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
  memchr::memmem::find(haystack, needle)
}

/// Splits `str` at the first `byte` occurrence, excluding the byte itself.
#[inline]
pub(crate) fn str_split_once1(str: &str, byte: u8) -> Option<(&str, &str)> {
  let idx = bytes_pos1(str.as_bytes(), byte)?;
  Some((str.get(..idx)?, str.get(idx.wrapping_add(1)..)?))
}

/// Removes leading and trailing ASCII whitespaces.
#[inline]
pub(crate) fn trim(bytes: &[u8]) -> &[u8] {
  bytes.trim_ascii()
}

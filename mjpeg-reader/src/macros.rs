macro_rules! _debug {
  ($($tt:tt)+) => {
    #[cfg(feature = "tracing")]
    tracing::debug!($($tt)+);
  };
}

macro_rules! _trace {
  ($($tt:tt)+) => {
    #[cfg(feature = "tracing")]
    tracing::trace!($($tt)+);
  };
}

macro_rules! _warn {
  ($($tt:tt)+) => {
    #[cfg(feature = "tracing")]
    tracing::warn!($($tt)+);
  };
}

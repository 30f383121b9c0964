/// Converts sequences of bytes into numbers.
pub trait FromRadix10: Sized {
  /// Parses the whole sequence of `bytes`. Leading signs are only accepted by signed types.
  fn from_radix_10(bytes: &[u8]) -> crate::Result<Self>;
}

impl<T> FromRadix10 for T
where
  T: atoi::FromRadix10SignedChecked,
{
  #[inline]
  fn from_radix_10(bytes: &[u8]) -> crate::Result<Self> {
    match atoi::FromRadix10SignedChecked::from_radix_10_signed_checked(bytes) {
      (Some(elem), read) if read == bytes.len() && read > 0 => Ok(elem),
      _ => Err(crate::Error::AtoiInvalidBytes),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::misc::FromRadix10;

  #[test]
  fn rejects_partial_input() {
    assert_eq!(usize::from_radix_10(b"500").unwrap(), 500);
    assert!(usize::from_radix_10(b"").is_err());
    assert!(usize::from_radix_10(b"50x").is_err());
    assert!(u8::from_radix_10(b"256").is_err());
  }
}

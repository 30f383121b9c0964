use crate::misc::{str_split_once1, EnvVars, FromVars};
use alloc::{string::String, vec::Vec};
use std::{
  env, fs,
  io::{BufRead as _, BufReader, Read},
  path::Path,
};

impl<T> EnvVars<T>
where
  T: FromVars,
{
  /// Constructs `T` through the deserialization of a literal `.env` data.
  ///
  /// Intended for debugging or tests.
  #[inline]
  pub fn from_env_data(data: &[u8]) -> crate::Result<Self> {
    Ok(Self(T::from_vars(env(data)?)?))
  }

  /// Constructs `T` through the deserialization of the passed `.env` file.
  #[inline]
  pub fn from_env_path<P>(path: P) -> crate::Result<Self>
  where
    P: AsRef<Path>,
  {
    Ok(Self(T::from_vars(env(fs::File::open(path)?)?)?))
  }

  /// Constructs `T` according to all the environment variables of the current process.
  #[inline]
  pub fn from_process() -> crate::Result<Self> {
    Ok(Self(T::from_vars(env::vars())?))
  }
}

fn env<R>(read: R) -> crate::Result<Vec<(String, String)>>
where
  R: Read,
{
  let mut buf_reader = BufReader::new(read);
  let mut buffer = String::new();
  let mut vars = Vec::new();
  loop {
    if buf_reader.read_line(&mut buffer)? == 0 {
      break;
    }
    let buffer_ref = buffer.trim();
    if buffer_ref.is_empty() || buffer_ref.starts_with('#') {
      buffer.clear();
      continue;
    }
    let Some((key, value)) = str_split_once1(buffer_ref, b'=') else {
      buffer.clear();
      continue;
    };
    vars.push((into_string(key), into_string(value)));
    buffer.clear();
  }
  Ok(vars)
}

fn into_string(str: &str) -> String {
  let trimmed = str.trim();
  let unquoted = trimmed
    .strip_prefix('\'')
    .and_then(|el| el.strip_suffix('\''))
    .or_else(|| trimmed.strip_prefix('"').and_then(|el| el.strip_suffix('"')))
    .unwrap_or(trimmed);
  String::from(unquoted)
}

#[cfg(test)]
mod tests {
  use crate::misc::env_vars::std::env;

  #[test]
  fn basic_env() {
    let data = "MJPEG_IMAGE_SCALE='2'\nMJPEG_MAX_BUFFER_LEN=1024\n Comment\nMJPEG_URI=\"http://cam\"";
    let result = env(data.as_bytes()).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result[0], ("MJPEG_IMAGE_SCALE".into(), "2".into()));
    assert_eq!(result[1], ("MJPEG_MAX_BUFFER_LEN".into(), "1024".into()));
    assert_eq!(result[2], ("MJPEG_URI".into(), "http://cam".into()));
  }
}

//! Command-line resolution: `--model <path> --input <path>`, any order.
//!
//! Unknown flags are skipped. A flag with no following value is ignored.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::RunnerError;

/// The two required paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
  pub model: PathBuf,
  pub input: PathBuf,
}

/// Scan argv (program name excluded) for `--model` and `--input`.
/// Values are kept as OS strings, so non-UTF-8 paths survive unchanged.
pub fn resolve<I, S>(args: I) -> Result<RunArgs, RunnerError>
where
  I: IntoIterator<Item = S>,
  S: Into<OsString>,
{
  let mut model = OsString::new();
  let mut input = OsString::new();

  let mut it = args.into_iter().map(Into::<OsString>::into);
  while let Some(arg) = it.next() {
    let slot = match arg.to_str() {
      Some("--model") => &mut model,
      Some("--input") => &mut input,
      _ => continue,
    };
    if let Some(value) = it.next() {
      *slot = value;
    }
  }

  if model.is_empty() || input.is_empty() {
    return Err(RunnerError::InvalidArgs);
  }
  Ok(RunArgs {
    model: PathBuf::from(model),
    input: PathBuf::from(input),
  })
}

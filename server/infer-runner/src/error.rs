//! Structured error types for the inference runner.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
  #[error("invalid args: --model and --input are required")]
  InvalidArgs,

  #[error("read failed: {path}: {source}")]
  ReadFailed {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("features missing: no key or unbalanced brackets")]
  FeaturesMissing,

  #[error("features empty: no numeric values")]
  FeaturesEmpty,

  #[error("malformed feature token: {token:?}")]
  MalformedFeature { token: String },

  #[error("engine: {0}")]
  Engine(String),

  #[error("invalid output: {0}")]
  InvalidOutput(String),
}

impl RunnerError {
  pub fn engine(msg: impl Into<String>) -> Self {
    Self::Engine(msg.into())
  }

  pub fn invalid_output(msg: impl Into<String>) -> Self {
    Self::InvalidOutput(msg.into())
  }

  /// Stable machine tag for this failure.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::InvalidArgs => "invalid_args",
      Self::ReadFailed { .. } => "read_failed",
      Self::FeaturesMissing => "features_missing",
      Self::FeaturesEmpty => "features_empty",
      Self::MalformedFeature { .. } => "malformed_feature",
      Self::Engine(_) => "native_inference_error",
      Self::InvalidOutput(_) => "invalid_output",
    }
  }
}

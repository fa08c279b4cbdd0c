//! Runner configuration with sane defaults.

/// Tunables for payload extraction and the engine session.
#[derive(Debug, Clone)]
pub struct Config {
  /// Keys searched for the identifier, first match wins.
  pub uid_keys: Vec<String>,
  /// Keys searched for the feature list, first key present wins.
  pub feature_keys: Vec<String>,
  /// Treat a payload that is itself a `[...]` list as the feature list.
  pub allow_bare_array: bool,
  /// Identifier emitted when none can be recovered.
  pub placeholder_uid: String,
  /// Environment variable holding the stderr log filter. Unset = silent.
  pub log_env: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      uid_keys: vec!["uid".into(), "app_uid".into()],
      feature_keys: vec!["features".into(), "vector".into()],
      allow_bare_array: true,
      placeholder_uid: "-".into(),
      log_env: "INFER_RUNNER_LOG".into(),
    }
  }
}

//! Opt-in diagnostics on stderr. Silent unless the configured env var is set,
//! so stdout carries only the verdict and stderr stays empty by default.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub fn init(config: &Config) {
  let directive = match std::env::var(&config.log_env) {
    Ok(d) if !d.trim().is_empty() => d,
    _ => return,
  };
  let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

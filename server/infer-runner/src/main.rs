//! Binary entrypoint: `infer-runner --model <path> --input <path>`.
//!
//! Always writes exactly one verdict line to stdout and exits 0, whatever
//! happened. Failures are carried in the `reason` field.

use infer_runner::{emit, logging, run, Config, OnnxSession};
use std::io;

fn main() {
  let config = Config::default();
  logging::init(&config);

  // Panics inside the engine are turned into a verdict by the runner;
  // keep the default hook from writing to stderr.
  std::panic::set_hook(Box::new(|info| {
    tracing::error!("panic: {}", info);
  }));

  let verdict = run(std::env::args_os().skip(1), &config, OnnxSession::load);

  let stdout = io::stdout();
  let _ = emit(&mut stdout.lock(), &verdict);
}

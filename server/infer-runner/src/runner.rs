//! Orchestration: args -> payload -> uid -> features -> model -> adapt ->
//! run -> reduce -> verdict.
//!
//! Every path ends in exactly one [`Verdict`]. Argument errors are reported
//! as `invalid_args`; an empty or non-float model output as `invalid_output`;
//! every other failure after argument resolution as `native_inference_error`.

use std::ffi::OsString;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, warn};

use crate::adapt::adapt_width;
use crate::args;
use crate::config::Config;
use crate::engine::ModelSession;
use crate::error::RunnerError;
use crate::payload;
use crate::reduce::reduce;
use crate::verdict::{Reason, Verdict};

/// Run once over `argv` (program name excluded) and produce the verdict.
///
/// `load` opens the model; the binary passes `OnnxSession::load`.
pub fn run<I, A, L, S>(argv: I, config: &Config, load: L) -> Verdict
where
  I: IntoIterator<Item = A>,
  A: Into<OsString>,
  L: FnOnce(&Path) -> Result<S, RunnerError>,
  S: ModelSession,
{
  let args = match args::resolve(argv) {
    Ok(a) => a,
    Err(e) => {
      warn!(error = %e, "rejecting arguments");
      return Verdict::failure(&config.placeholder_uid, Reason::InvalidArgs);
    }
  };
  debug!(model = %args.model.display(), input = %args.input.display(), "args resolved");

  let text = match payload::read_payload(&args.input) {
    Ok(t) => t,
    Err(e) => return failed(e, &config.placeholder_uid),
  };
  let uid = payload::extract_uid(&text, config);
  debug!(%uid, bytes = text.len(), "payload read");

  let guarded = catch_unwind(AssertUnwindSafe(|| score_payload(&text, &args.model, config, load)));
  match guarded {
    Ok(Ok(score)) => {
      let verdict = Verdict::new(score, &uid, Reason::ModelInference);
      debug!(score = verdict.score, "inference complete");
      verdict
    }
    Ok(Err(e)) => failed(e, &uid),
    Err(_) => failed(RunnerError::engine("engine panicked"), &uid),
  }
}

fn score_payload<L, S>(text: &str, model: &Path, config: &Config, load: L) -> Result<f32, RunnerError>
where
  L: FnOnce(&Path) -> Result<S, RunnerError>,
  S: ModelSession,
{
  let features = payload::extract_features(text, config)?;
  debug!(count = features.len(), "features parsed");

  let session = load(model)?;
  let expected = session.input_width();
  let features = adapt_width(features, expected);
  debug!(?expected, width = features.len(), "features adapted");

  let output = session.run(features)?;
  if output.is_empty() {
    return Err(RunnerError::invalid_output("empty output vector"));
  }
  Ok(reduce(&output))
}

fn failed(e: RunnerError, uid: &str) -> Verdict {
  let reason = match e {
    RunnerError::InvalidOutput(_) => Reason::InvalidOutput,
    _ => Reason::NativeInferenceError,
  };
  warn!(kind = e.kind(), error = %e, reason = reason.as_str(), "run failed");
  Verdict::failure(uid, reason)
}

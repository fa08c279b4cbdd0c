//! The single output line: `{"score":..,"uid":"..","reason":".."}`.

use std::io::{self, Write};

use serde::Serialize;

/// Terminal outcome tag. Callers branch on this, not on exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
  ModelInference,
  InvalidArgs,
  InvalidOutput,
  NativeInferenceError,
}

impl Reason {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::ModelInference => "model_inference",
      Self::InvalidArgs => "invalid_args",
      Self::InvalidOutput => "invalid_output",
      Self::NativeInferenceError => "native_inference_error",
    }
  }
}

/// One verdict per run. Construct through [`Verdict::new`] so the score is
/// bounded and the uid is single-line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
  pub score: f32,
  pub uid: String,
  pub reason: Reason,
}

impl Verdict {
  pub fn new(score: f32, uid: &str, reason: Reason) -> Self {
    Self {
      score: clamp_score(score),
      uid: single_line(uid),
      reason,
    }
  }

  pub fn failure(uid: &str, reason: Reason) -> Self {
    Self::new(0.0, uid, reason)
  }
}

/// Bound to [0, 1]. NaN has no meaningful position and becomes 0.
pub fn clamp_score(score: f32) -> f32 {
  if score.is_nan() {
    0.0
  } else {
    score.clamp(0.0, 1.0)
  }
}

/// Newlines and carriage returns become a single space each.
fn single_line(s: &str) -> String {
  s.replace(['\n', '\r'], " ")
}

/// Write the verdict as one JSON line and flush.
pub fn emit<W: Write>(out: &mut W, verdict: &Verdict) -> io::Result<()> {
  serde_json::to_writer(&mut *out, verdict)?;
  writeln!(out)?;
  out.flush()
}

//! Reduce the raw model output to one score.

/// Index 1 for two-or-more outputs (positive class), the only value for a
/// single output, 0.0 for none.
pub fn reduce(output: &[f32]) -> f32 {
  match output {
    [] => 0.0,
    [only] => *only,
    [_, positive, ..] => *positive,
  }
}

//! Width adaptation between the caller's feature vector and the model input.

/// Resize `features` to `expected` when the width is known and positive:
/// zero-pad on the right when short, drop trailing values when long.
pub fn adapt_width(mut features: Vec<f32>, expected: Option<i64>) -> Vec<f32> {
  match expected {
    Some(width) if width > 0 => {
      features.resize(width as usize, 0.0);
      features
    }
    _ => features,
  }
}

//! Inference boundary: a loaded model that takes one `[1, width]` f32 row
//! and returns a flat f32 vector.

use std::path::Path;

use tract_onnx::prelude::*;
use tract_onnx::tract_hir::infer::GenericFactoid;
use tracing::debug;

use crate::error::RunnerError;

/// A loaded model, ready for one forward pass.
pub trait ModelSession {
  /// Declared width of the single input (dimension 1), when concrete.
  fn input_width(&self) -> Option<i64>;

  /// Run one forward pass and return output slot 0 flattened.
  fn run(&self, features: Vec<f32>) -> Result<Vec<f32>, RunnerError>;
}

/// ONNX model executed by tract on the calling thread.
pub struct OnnxSession {
  model: InferenceModel,
  width: Option<i64>,
}

impl OnnxSession {
  pub fn load(path: &Path) -> Result<Self, RunnerError> {
    debug!(model = %path.display(), "loading model");
    let model = tract_onnx::onnx()
      .model_for_path(path)
      .map_err(engine_error)?;
    let fact = model.input_fact(0).map_err(engine_error)?;
    let width = declared_width(fact);
    debug!(?width, "model input width");
    Ok(Self { model, width })
  }
}

impl ModelSession for OnnxSession {
  fn input_width(&self) -> Option<i64> {
    self.width
  }

  fn run(&self, features: Vec<f32>) -> Result<Vec<f32>, RunnerError> {
    let n = features.len();
    let plan = self
      .model
      .clone()
      .with_input_fact(0, f32::fact([1, n]).into())
      .and_then(|m| m.into_optimized())
      .and_then(|m| m.into_runnable())
      .map_err(engine_error)?;

    let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, n), features)
      .map_err(|e| RunnerError::engine(e.to_string()))?
      .into();
    let outputs = plan.run(tvec!(input.into())).map_err(engine_error)?;

    let first = outputs
      .first()
      .ok_or_else(|| RunnerError::invalid_output("model produced no outputs"))?;
    if !first.datum_type().is_float() {
      return Err(RunnerError::invalid_output(format!(
        "output 0 is {:?}, expected float",
        first.datum_type()
      )));
    }
    let values = first.cast_to::<f32>().map_err(engine_error)?;
    let values = values.as_slice::<f32>().map_err(engine_error)?;
    Ok(values.to_vec())
  }
}

fn declared_width(fact: &InferenceFact) -> Option<i64> {
  match fact.shape.dims().nth(1)? {
    GenericFactoid::Only(dim) => dim.to_i64().ok(),
    GenericFactoid::Any => None,
  }
}

fn engine_error(e: TractError) -> RunnerError {
  RunnerError::engine(format!("{:#}", e))
}

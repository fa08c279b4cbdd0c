//! End-to-end runs through the library runner with a scripted model.

use std::io::Write;
use std::path::Path;

use infer_runner::{emit, run, Config, ModelSession, Reason, RunnerError, Verdict};

/// Stands in for a loaded model with a fixed input width and output.
struct Scripted {
  width: Option<i64>,
  output: Vec<f32>,
}

impl ModelSession for Scripted {
  fn input_width(&self) -> Option<i64> {
    self.width
  }

  fn run(&self, features: Vec<f32>) -> Result<Vec<f32>, RunnerError> {
    if let Some(w) = self.width {
      assert_eq!(features.len() as i64, w, "runner must adapt to the declared width");
    }
    Ok(self.output.clone())
  }
}

fn loader(width: Option<i64>, output: Vec<f32>) -> impl FnOnce(&Path) -> Result<Scripted, RunnerError> {
  move |_| Ok(Scripted { width, output })
}

fn payload(body: &str) -> tempfile::NamedTempFile {
  let mut f = tempfile::NamedTempFile::new().unwrap();
  f.write_all(body.as_bytes()).unwrap();
  f
}

fn argv(input: &Path) -> Vec<String> {
  vec![
    "--model".into(),
    "m.onnx".into(),
    "--input".into(),
    input.display().to_string(),
  ]
}

fn line(v: &Verdict) -> String {
  let mut buf = Vec::new();
  emit(&mut buf, v).unwrap();
  String::from_utf8(buf).unwrap()
}

#[test]
fn scored_payload_emits_model_inference() {
  let f = payload(r#"{"uid":"abc123","features":[0.1, 0.2, 0.3]}"#);
  let v = run(argv(f.path()), &Config::default(), loader(Some(3), vec![0.2, 0.91]));
  assert_eq!(
    line(&v),
    "{\"score\":0.91,\"uid\":\"abc123\",\"reason\":\"model_inference\"}\n"
  );
}

#[test]
fn missing_features_without_uid() {
  let f = payload(r#"{"name":"x"}"#);
  let v = run(argv(f.path()), &Config::default(), loader(None, vec![1.0]));
  assert_eq!(
    line(&v),
    "{\"score\":0.0,\"uid\":\"-\",\"reason\":\"native_inference_error\"}\n"
  );
}

#[test]
fn missing_features_keeps_recovered_uid() {
  let f = payload(r#"{"uid":"u-9"}"#);
  let v = run(argv(f.path()), &Config::default(), loader(None, vec![1.0]));
  assert_eq!(v, Verdict::failure("u-9", Reason::NativeInferenceError));
}

#[test]
fn missing_input_flag_is_invalid_args() {
  let v = run(["--model", "m.onnx"], &Config::default(), loader(None, vec![1.0]));
  assert_eq!(
    line(&v),
    "{\"score\":0.0,\"uid\":\"-\",\"reason\":\"invalid_args\"}\n"
  );
}

#[test]
fn empty_token_between_commas_is_skipped() {
  let f = payload(r#"{"uid":"d","features":[1,2,,3]}"#);
  let session = Scripted {
    width: None,
    output: vec![0.4],
  };
  let seen = std::cell::RefCell::new(Vec::new());
  let v = run(argv(f.path()), &Config::default(), |_: &Path| {
    Ok::<_, RunnerError>(Recording {
      inner: &session,
      seen: &seen,
    })
  });
  assert_eq!(v, Verdict::new(0.4, "d", Reason::ModelInference));
  assert_eq!(*seen.borrow(), vec![1.0, 2.0, 3.0]);
}

struct Recording<'a> {
  inner: &'a Scripted,
  seen: &'a std::cell::RefCell<Vec<f32>>,
}

impl ModelSession for Recording<'_> {
  fn input_width(&self) -> Option<i64> {
    self.inner.input_width()
  }

  fn run(&self, features: Vec<f32>) -> Result<Vec<f32>, RunnerError> {
    *self.seen.borrow_mut() = features.clone();
    self.inner.run(features)
  }
}

#[test]
fn width_mismatch_is_reconciled_both_ways() {
  let short = payload(r#"{"uid":"s","features":[1]}"#);
  let v = run(argv(short.path()), &Config::default(), loader(Some(5), vec![0.7]));
  assert_eq!(v.reason, Reason::ModelInference);

  let long = payload(r#"{"uid":"l","features":[1,2,3,4,5,6]}"#);
  let v = run(argv(long.path()), &Config::default(), loader(Some(2), vec![0.7]));
  assert_eq!(v.reason, Reason::ModelInference);
}

#[test]
fn output_shapes_map_to_scores() {
  let f = payload(r#"{"uid":"o","features":[1]}"#);

  let v = run(argv(f.path()), &Config::default(), loader(None, vec![]));
  assert_eq!(v, Verdict::failure("o", Reason::InvalidOutput));

  let v = run(argv(f.path()), &Config::default(), loader(None, vec![1.8]));
  assert_eq!(v, Verdict::new(1.0, "o", Reason::ModelInference));

  let v = run(argv(f.path()), &Config::default(), loader(None, vec![0.9, -2.0]));
  assert_eq!(v, Verdict::new(0.0, "o", Reason::ModelInference));
}

#[test]
fn repeated_runs_are_byte_identical() {
  let f = payload("{\"uid\": \"rep\",\n \"features\": [\n 0.5,\t0.25\n]}");
  let a = run(argv(f.path()), &Config::default(), loader(Some(2), vec![0.1, 0.66]));
  let b = run(argv(f.path()), &Config::default(), loader(Some(2), vec![0.1, 0.66]));
  assert_eq!(line(&a), line(&b));
}

#[test]
fn every_output_is_a_single_valid_json_line() {
  let cases = [
    r#"{"uid":"a","features":[1,2]}"#,
    r#"{"uid":"b","features":[]}"#,
    r#"{"uid":"c","features":[1,"#,
    r#"[0.3, 0.4]"#,
    "",
  ];
  for body in cases {
    let f = payload(body);
    let v = run(argv(f.path()), &Config::default(), loader(Some(2), vec![0.5, 0.5]));
    let out = line(&v);
    assert_eq!(out.matches('\n').count(), 1, "one line for {:?}", body);
    let parsed: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    let score = parsed["score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));
    assert!(parsed["uid"].is_string());
    assert!(parsed["reason"].is_string());
  }
}

#[test]
fn uid_with_specials_is_escaped_on_output() {
  let f = payload(r#"{"uid":"a\b","features":[1]}"#);
  let v = run(argv(f.path()), &Config::default(), loader(None, vec![0.5]));
  assert!(line(&v).contains(r#""uid":"a\\b""#));

  let v = Verdict::new(0.5, "x\"y\nz", Reason::ModelInference);
  let parsed: serde_json::Value = serde_json::from_str(line(&v).trim_end()).unwrap();
  assert_eq!(parsed["uid"], "x\"y z");
}

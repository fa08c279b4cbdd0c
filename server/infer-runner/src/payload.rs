//! Tolerant payload extraction.
//!
//! The payload is expected to look like JSON but is produced by another
//! component with loose formatting, so only the two fields we need are
//! scanned for: an identifier and a flat numeric feature list.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::RunnerError;

/// Read the payload file as text. Invalid UTF-8 is replaced, not rejected.
pub fn read_payload(path: &Path) -> Result<String, RunnerError> {
  let bytes = fs::read(path).map_err(|source| RunnerError::ReadFailed {
    path: path.display().to_string(),
    source,
  })?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Recover the identifier, or the placeholder when no key yields a value.
pub fn extract_uid(text: &str, config: &Config) -> String {
  config
    .uid_keys
    .iter()
    .find_map(|key| find_token_value(text, key))
    .unwrap_or_else(|| config.placeholder_uid.clone())
}

/// Recover the feature list in payload order.
pub fn extract_features(text: &str, config: &Config) -> Result<Vec<f32>, RunnerError> {
  let body = locate_feature_body(text, config).ok_or(RunnerError::FeaturesMissing)?;
  let features = parse_number_list(body)?;
  if features.is_empty() {
    return Err(RunnerError::FeaturesEmpty);
  }
  Ok(features)
}

/// Find `"key" : value` and capture the value up to a quote, comma, closing
/// brace or whitespace. The value may be quoted or bare. Occurrences that
/// don't fit (e.g. the key used as a string value) are skipped.
fn find_token_value(text: &str, key: &str) -> Option<String> {
  let needle = format!("\"{}\"", key);
  let mut from = 0;
  while let Some(rel) = text[from..].find(&needle) {
    let after_key = from + rel + needle.len();
    if let Some(v) = capture_after_colon(&text[after_key..]) {
      return Some(v.to_string());
    }
    from = after_key;
  }
  None
}

fn capture_after_colon(rest: &str) -> Option<&str> {
  let rest = rest.trim_start().strip_prefix(':')?.trim_start();
  let rest = rest.strip_prefix('"').unwrap_or(rest);
  let end = rest
    .find(|c: char| c == '"' || c == ',' || c == '}' || c.is_whitespace())
    .unwrap_or(rest.len());
  if end == 0 {
    return None;
  }
  Some(&rest[..end])
}

/// Text strictly between the feature list's `[` and its balanced `]`.
fn locate_feature_body<'a>(text: &'a str, config: &Config) -> Option<&'a str> {
  let key_pos = config
    .feature_keys
    .iter()
    .find_map(|key| text.find(&format!("\"{}\"", key)));

  let open = match key_pos {
    Some(pos) => pos + text[pos..].find('[')?,
    None if config.allow_bare_array && text.trim_start().starts_with('[') => {
      text.len() - text.trim_start().len()
    }
    None => return None,
  };

  let close = matching_bracket(text, open)?;
  Some(&text[open + 1..close])
}

/// Index of the `]` closing the `[` at `open`, tracking nesting depth.
fn matching_bracket(text: &str, open: usize) -> Option<usize> {
  let mut depth = 0usize;
  for (i, b) in text.bytes().enumerate().skip(open) {
    match b {
      b'[' => depth += 1,
      b']' => {
        depth -= 1;
        if depth == 0 {
          return Some(i);
        }
      }
      _ => {}
    }
  }
  None
}

/// Comma-separated numbers. Empty tokens are skipped; anything else that
/// doesn't parse to a finite f32 fails the whole list.
fn parse_number_list(body: &str) -> Result<Vec<f32>, RunnerError> {
  let body = body.replace(['\n', '\r', '\t'], " ");
  let mut out = Vec::new();
  for token in body.split(',') {
    let token = token.trim();
    if token.is_empty() {
      continue;
    }
    let malformed = || RunnerError::MalformedFeature {
      token: token.to_string(),
    };
    let v: f32 = token.parse().map_err(|_| malformed())?;
    // Overflowing literals parse as inf; the model never sees them.
    if !v.is_finite() {
      return Err(malformed());
    }
    out.push(v);
  }
  Ok(out)
}

//! Native inference runner: one payload in, one JSON verdict out.
//!
//! Reads a loosely formatted payload, recovers `uid` and the feature list,
//! fits the features to the model's input width, runs a single forward pass
//! and reduces the output to a score in [0, 1].
//!
//! The pipeline does no stdout I/O; the binary owns emission.

pub mod adapt;
pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod payload;
pub mod reduce;
pub mod runner;
pub mod verdict;

pub use config::Config;
pub use engine::{ModelSession, OnnxSession};
pub use error::RunnerError;
pub use runner::run;
pub use verdict::{emit, Reason, Verdict};

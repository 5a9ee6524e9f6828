//! Errors surfaced by the lesson store and service.
//!
//! A missing lesson is not an error: the service returns `Ok(None)` for it.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LessonError {
  /// The file exists but is not a JSON object.
  #[error("malformed lesson document {path}: {source}")]
  Malformed {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl LessonError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    LessonError::Io { path: path.into(), source }
  }
}

//! Domain model: the lesson document as authored on disk, plus the listing summary.
//!
//! Lesson files are loosely structured. The keys the quality pipeline cares about
//! are explicit optional fields holding raw JSON, read through accessors that
//! treat a missing or wrongly-shaped value as absent. An explicit `null` is kept
//! as `Some(Value::Null)` so the key is served back as authored. Every other key
//! lands in `extra` and is written back unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::quality::{QualityField, QualityReport};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
  pub id: Option<Value>,
  #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
  pub title: Option<Value>,
  #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
  pub difficulty: Option<Value>,
  #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
  pub pattern: Option<Value>,

  #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
  pub pseudocode: Option<Value>,
  #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
  pub thinking_challenge: Option<Value>,
  #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
  pub approach: Option<Value>,

  #[serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")]
  pub curriculum: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub quality: Option<QualityField>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Lesson {
  pub fn title(&self) -> Option<&str> {
    self.title.as_ref().and_then(Value::as_str)
  }

  pub fn difficulty(&self) -> Option<&str> {
    self.difficulty.as_ref().and_then(Value::as_str)
  }

  pub fn pattern(&self) -> Option<&str> {
    self.pattern.as_ref().and_then(Value::as_str)
  }

  /// The `id` key when it is a string (generated lessons carry their slug there).
  pub fn slug_id(&self) -> Option<&str> {
    self.id.as_ref().and_then(Value::as_str)
  }

  /// Pseudocode lines, only when `pseudocode` is an array.
  pub fn pseudocode_lines(&self) -> Option<&Vec<Value>> {
    self.pseudocode.as_ref().and_then(Value::as_array)
  }

  /// `thinkingChallenge.prompt`, only when it is a string.
  pub fn thinking_prompt(&self) -> Option<&str> {
    self.thinking_challenge
      .as_ref()
      .and_then(|tc| tc.get("prompt"))
      .and_then(Value::as_str)
  }

  pub fn has_bruteforce(&self) -> bool {
    self.approach_part("bruteforce")
  }

  pub fn has_optimized(&self) -> bool {
    self.approach_part("optimized")
  }

  fn approach_part(&self, key: &str) -> bool {
    self.approach
      .as_ref()
      .and_then(|a| a.get(key))
      .is_some_and(is_truthy)
  }

  pub fn lesson_number(&self) -> Option<u64> {
    self.curriculum
      .as_ref()
      .and_then(|c| c.get("lessonNumber"))
      .and_then(Value::as_u64)
  }

  pub fn tier(&self) -> Option<&str> {
    self.curriculum
      .as_ref()
      .and_then(|c| c.get("tier"))
      .and_then(Value::as_str)
  }

  /// The stored quality stamp, if it parses as one.
  pub fn stored_quality(&self) -> Option<&QualityReport> {
    self.quality.as_ref().and_then(QualityField::report)
  }

  pub fn stamp_quality(&mut self, report: QualityReport) {
    self.quality = Some(QualityField::Report(report));
  }
}

/// Present keys always deserialize to `Some`, `null` included.
fn keep_null<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
  Value::deserialize(d).map(Some)
}

/// True for a missing key or an explicit `null`.
pub fn is_absent(v: &Option<Value>) -> bool {
  matches!(v, None | Some(Value::Null))
}

/// JSON truthiness: `null`, `false`, `0`, and `""` count as absent.
pub fn is_truthy(v: &Value) -> bool {
  match v {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// Minimal lesson metadata for the algorithms hub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LessonSummary {
  pub id: u64,
  pub slug: String,
  pub title: String,
  pub difficulty: String,
  pub pattern: String,
  pub tier: String,
  #[serde(rename = "type")]
  pub kind: &'static str,
}

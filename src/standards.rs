//! Lesson standards registry: what a complete lesson must contain.
//!
//! The `version` string is stamped into every quality report. It is the only
//! thing that invalidates previously stamped "PERFECT" documents, so any edit to
//! the required set or thresholds below must come with a new version.

use serde::Serialize;

pub const STANDARDS_VERSION: &str = "2025-12-30";

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LessonStandards {
  pub version: &'static str,
  pub required: RequiredFields,
  pub pseudocode: PseudocodeBounds,
  pub scoring: Scoring,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequiredFields {
  pub pseudocode: bool,
  pub thinking_challenge: bool,
  pub brute_force_logic: bool,
  pub optimized_logic: bool,
}

/// Declared line bounds for pseudocode. Published, not scored.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PseudocodeBounds {
  pub min_lines: usize,
  pub max_lines: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scoring {
  pub perfect: i32,
  /// Declared but not used to gate repair; repair runs for any imperfect score.
  pub autofix_threshold: i32,
}

static CURRENT: LessonStandards = LessonStandards {
  version: STANDARDS_VERSION,
  required: RequiredFields {
    pseudocode: true,
    thinking_challenge: true,
    brute_force_logic: true,
    optimized_logic: true,
  },
  pseudocode: PseudocodeBounds { min_lines: 4, max_lines: 10 },
  scoring: Scoring { perfect: 100, autofix_threshold: 70 },
};

impl LessonStandards {
  /// The registry's single current definition.
  pub fn current() -> &'static LessonStandards {
    &CURRENT
  }
}

//! Quality report model: the verifier's output, stamped onto lessons as `quality`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maturity status of a lesson against the standards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityStatus {
  Perfect,
  NeedsFix,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  High,
  Medium,
}

/// One verifier check. Declaration order is the fixed check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
  MissingPseudocode,
  MissingThinkingChallenge,
  MissingBruteforceLogic,
  MissingOptimizedLogic,
}

impl Rule {
  pub fn penalty(self) -> i32 {
    match self {
      Rule::MissingPseudocode => 30,
      Rule::MissingThinkingChallenge => 25,
      Rule::MissingBruteforceLogic | Rule::MissingOptimizedLogic => 15,
    }
  }

  pub fn severity(self) -> Severity {
    match self {
      Rule::MissingPseudocode | Rule::MissingThinkingChallenge => Severity::High,
      Rule::MissingBruteforceLogic | Rule::MissingOptimizedLogic => Severity::Medium,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRule {
  pub rule: Rule,
  pub severity: Severity,
}

impl From<Rule> for MissingRule {
  fn from(rule: Rule) -> Self {
    MissingRule { rule, severity: rule.severity() }
  }
}

/// Result of verifying one lesson.
///
/// `score`, `missing` and `standardsVersion` default when absent so that older
/// stamps stored in lesson files can still be read back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
  pub status: QualityStatus,
  #[serde(default)]
  pub score: i32,
  #[serde(default)]
  pub missing: Vec<MissingRule>,
  #[serde(default)]
  pub standards_version: String,
}

impl QualityReport {
  pub fn is_perfect(&self) -> bool {
    self.status == QualityStatus::Perfect
  }

  /// True if `rule` failed in this report.
  pub fn flags(&self, rule: Rule) -> bool {
    self.missing.iter().any(|m| m.rule == rule)
  }
}

/// The `quality` key of a lesson document as found on disk.
///
/// Stamps written by this service parse as `Report`; anything else a content
/// author left there is kept verbatim and treated as "not stamped".
/// That includes a PERFECT stamp with a mistyped `score` or `missing` (e.g.
/// `"score": "100"`): it is re-verified rather than trusted by the fast path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QualityField {
  Report(QualityReport),
  Other(Value),
}

impl QualityField {
  pub fn report(&self) -> Option<&QualityReport> {
    match self {
      QualityField::Report(r) => Some(r),
      QualityField::Other(_) => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn rules_serialize_as_screaming_codes() {
    let m = MissingRule::from(Rule::MissingBruteforceLogic);
    assert_eq!(
      serde_json::to_value(m).unwrap(),
      json!({ "rule": "MISSING_BRUTEFORCE_LOGIC", "severity": "medium" })
    );
  }

  #[test]
  fn report_serializes_in_camel_case() {
    let r = QualityReport {
      status: QualityStatus::NeedsFix,
      score: 70,
      missing: vec![Rule::MissingOptimizedLogic.into()],
      standards_version: "2025-12-30".into(),
    };
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["status"], "NEEDS_FIX");
    assert_eq!(v["standardsVersion"], "2025-12-30");
    assert_eq!(v["missing"][0]["severity"], "medium");
  }

  #[test]
  fn partial_stamp_reads_as_report() {
    let f: QualityField = serde_json::from_value(json!({ "status": "PERFECT", "standardsVersion": "v0" })).unwrap();
    let r = f.report().expect("should parse as report");
    assert!(r.is_perfect());
    assert_eq!(r.standards_version, "v0");
    assert!(r.missing.is_empty());
  }

  #[test]
  fn unknown_stamp_is_kept_as_other() {
    let raw = json!({ "status": "GREAT", "notes": ["x"] });
    let f: QualityField = serde_json::from_value(raw.clone()).unwrap();
    assert!(f.report().is_none());
    assert_eq!(serde_json::to_value(&f).unwrap(), raw);
  }

  #[test]
  fn mistyped_score_is_not_a_report() {
    let f: QualityField =
      serde_json::from_value(json!({ "status": "PERFECT", "score": "100", "standardsVersion": "2025-12-30" })).unwrap();
    assert!(f.report().is_none());
  }

  #[test]
  fn penalties_and_severities() {
    assert_eq!(Rule::MissingPseudocode.penalty(), 30);
    assert_eq!(Rule::MissingThinkingChallenge.penalty(), 25);
    assert_eq!(Rule::MissingOptimizedLogic.penalty(), 15);
    assert_eq!(Rule::MissingThinkingChallenge.severity(), Severity::High);
    assert_eq!(Rule::MissingOptimizedLogic.severity(), Severity::Medium);
  }
}

//! Deterministic lesson repair.
//!
//! Fills absent fields flagged by a quality report with fixed placeholder
//! content. Never replaces authored content and never calls out to a model;
//! brute-force and optimized approaches have no template and stay as they are.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::domain::{is_absent, Lesson};
use crate::quality::{QualityReport, Rule};

pub const PSEUDOCODE_TEMPLATE: [&str; 5] = [
  "create memory structure",
  "iterate through list",
  "calculate needed value",
  "check if value exists",
  "return result",
];

pub const THINKING_PROMPT_TEMPLATE: &str =
  "If the list were extremely large, how could you avoid checking every possible pair?";

/// Return a patched copy of `lesson`. The input is left untouched.
pub fn repair(lesson: &Lesson, report: &QualityReport) -> Lesson {
  let mut patched = lesson.clone();

  if report.flags(Rule::MissingPseudocode) && is_absent(&patched.pseudocode) {
    patched.pseudocode = Some(json!(PSEUDOCODE_TEMPLATE));
    debug!(target: "lessons", "Filled pseudocode template");
  }

  if report.flags(Rule::MissingThinkingChallenge) && patched.thinking_prompt().is_none() {
    fill_thinking_prompt(&mut patched.thinking_challenge);
  }

  patched
}

fn fill_thinking_prompt(slot: &mut Option<Value>) {
  match slot {
    // Keep the author's other challenge keys; only the prompt is added.
    Some(Value::Object(tc)) if !tc.contains_key("prompt") => {
      tc.insert("prompt".into(), Value::String(THINKING_PROMPT_TEMPLATE.into()));
      debug!(target: "lessons", "Added prompt to existing thinkingChallenge");
    }
    None | Some(Value::Null) => {
      let mut tc = Map::new();
      tc.insert("prompt".into(), Value::String(THINKING_PROMPT_TEMPLATE.into()));
      *slot = Some(Value::Object(tc));
      debug!(target: "lessons", "Filled thinkingChallenge template");
    }
    _ => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::quality::QualityStatus;
  use crate::verifier::verify;

  fn lesson(v: Value) -> Lesson {
    serde_json::from_value(v).unwrap()
  }

  #[test]
  fn empty_lesson_gets_both_templates() {
    let l = Lesson::default();
    let report = verify(&l);
    let patched = repair(&l, &report);

    let lines: Vec<&str> = patched.pseudocode_lines().unwrap().iter().filter_map(Value::as_str).collect();
    assert_eq!(lines, PSEUDOCODE_TEMPLATE);
    assert_eq!(patched.thinking_prompt(), Some(THINKING_PROMPT_TEMPLATE));
    assert!(patched.approach.is_none());
    assert_eq!(l, Lesson::default(), "input must not be mutated");
  }

  #[test]
  fn repaired_empty_lesson_scores_seventy() {
    let l = Lesson::default();
    let before = verify(&l);
    assert_eq!(before.score, 30);

    let after = verify(&repair(&l, &before));
    assert_eq!(after.score, 70);
    assert_eq!(after.status, QualityStatus::NeedsFix);
    assert_eq!(after.missing.len(), 2);
    assert!(after.flags(Rule::MissingBruteforceLogic));
    assert!(after.flags(Rule::MissingOptimizedLogic));
  }

  #[test]
  fn existing_values_are_never_overwritten() {
    let l = lesson(json!({
      "pseudocode": "one long sentence",
      "thinkingChallenge": { "prompt": "Too short?" },
    }));
    let report = verify(&l);
    assert!(report.flags(Rule::MissingPseudocode));
    assert!(report.flags(Rule::MissingThinkingChallenge));

    let patched = repair(&l, &report);
    assert_eq!(patched.pseudocode, Some(json!("one long sentence")));
    assert_eq!(patched.thinking_prompt(), Some("Too short?"));
  }

  #[test]
  fn prompt_is_added_to_challenge_without_one() {
    let l = lesson(json!({ "thinkingChallenge": { "hint": "think about sorting" } }));
    let patched = repair(&l, &verify(&l));
    assert_eq!(patched.thinking_prompt(), Some(THINKING_PROMPT_TEMPLATE));
    assert_eq!(patched.thinking_challenge.as_ref().unwrap()["hint"], "think about sorting");
  }

  #[test]
  fn explicit_nulls_are_filled_like_absent_keys() {
    let l = lesson(json!({ "pseudocode": null, "thinkingChallenge": null, "approach": null }));
    let patched = repair(&l, &verify(&l));
    assert_eq!(patched.pseudocode, Some(json!(PSEUDOCODE_TEMPLATE)));
    assert_eq!(patched.thinking_prompt(), Some(THINKING_PROMPT_TEMPLATE));
    assert_eq!(patched.approach, Some(Value::Null));
    assert_eq!(verify(&patched).score, 70);
  }

  #[test]
  fn only_flagged_rules_are_repaired() {
    let l = Lesson::default();
    let mut report = verify(&l);
    report.missing.retain(|m| m.rule != Rule::MissingPseudocode);
    let patched = repair(&l, &report);
    assert!(patched.pseudocode.is_none());
    assert!(patched.thinking_prompt().is_some());
  }

  #[test]
  fn repair_is_idempotent() {
    let l = lesson(json!({ "title": "Valid Anagram", "approach": { "bruteforce": "sort both" } }));
    let report = verify(&l);
    let once = repair(&l, &report);
    let twice = repair(&once, &report);
    assert_eq!(once, twice);
  }

  #[test]
  fn approach_absence_is_left_alone() {
    let l = lesson(json!({ "approach": {} }));
    let patched = repair(&l, &verify(&l));
    assert_eq!(patched.approach, Some(json!({})));
  }
}

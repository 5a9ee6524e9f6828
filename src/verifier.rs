//! Lesson verifier: scores a lesson against the standards registry.
//!
//! All checks run, in a fixed order, and each failed check subtracts its
//! penalty from the perfect score. The stored `quality` key is never read here.

use crate::domain::Lesson;
use crate::quality::{MissingRule, QualityReport, QualityStatus, Rule};
use crate::standards::LessonStandards;

/// A thinking-challenge prompt must be longer than this many characters once trimmed.
pub const MIN_PROMPT_CHARS: usize = 30;

pub fn verify(lesson: &Lesson) -> QualityReport {
  verify_against(lesson, LessonStandards::current())
}

pub fn verify_against(lesson: &Lesson, standards: &LessonStandards) -> QualityReport {
  let required = &standards.required;
  let checks = [
    (required.pseudocode, Rule::MissingPseudocode, lesson.pseudocode_lines().is_some()),
    (required.thinking_challenge, Rule::MissingThinkingChallenge, has_thinking_challenge(lesson)),
    (required.brute_force_logic, Rule::MissingBruteforceLogic, lesson.has_bruteforce()),
    (required.optimized_logic, Rule::MissingOptimizedLogic, lesson.has_optimized()),
  ];

  let missing: Vec<MissingRule> = checks
    .iter()
    .filter(|(is_required, _, passed)| *is_required && !*passed)
    .map(|(_, rule, _)| MissingRule::from(*rule))
    .collect();

  let penalty: i32 = missing.iter().map(|m| m.rule.penalty()).sum();
  let score = standards.scoring.perfect - penalty;
  let status = if score == standards.scoring.perfect { QualityStatus::Perfect } else { QualityStatus::NeedsFix };

  QualityReport {
    status,
    score,
    missing,
    standards_version: standards.version.to_string(),
  }
}

fn has_thinking_challenge(lesson: &Lesson) -> bool {
  lesson
    .thinking_prompt()
    .is_some_and(|p| p.trim().chars().count() > MIN_PROMPT_CHARS)
}

//! Lesson service: loads lessons from the store and runs them through the
//! quality pipeline before they are handed to callers.
//!
//! Pipeline for a single lesson:
//!   1. fast path: a trusted PERFECT stamp is returned untouched
//!   2. verify; a perfect result is stamped and returned
//!   3. deterministic repair, then verify again and stamp the final report
//!
//! Nothing is written back to disk; each request recomputes quality.

use std::path::Path;

use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::config::FastPathPolicy;
use crate::domain::{Lesson, LessonSummary};
use crate::error::LessonError;
use crate::repair::repair;
use crate::standards::LessonStandards;
use crate::storage::LessonStore;
use crate::verifier::verify_against;

#[derive(Clone, Debug)]
pub struct LessonService {
  store: LessonStore,
  standards: LessonStandards,
  fast_path: FastPathPolicy,
}

impl LessonService {
  pub fn new(store: LessonStore, fast_path: FastPathPolicy) -> Self {
    Self::with_standards(store, fast_path, LessonStandards::current().clone())
  }

  pub fn with_standards(store: LessonStore, fast_path: FastPathPolicy, standards: LessonStandards) -> Self {
    Self { store, standards, fast_path }
  }

  pub fn standards(&self) -> &LessonStandards {
    &self.standards
  }

  /// Load one lesson with its quality stamp.
  ///
  /// `Ok(None)` when no readable file backs the slug; `Err(Malformed)` when the
  /// file is there but is not a lesson document.
  #[instrument(level = "info", skip(self))]
  pub async fn get_lesson_by_slug(&self, slug: &str) -> Result<Option<Lesson>, LessonError> {
    let Some(path) = self.store.resolve(slug).await else {
      info!(target: "lessons", %slug, root = %self.store.root().display(), "Lesson not found");
      return Ok(None);
    };

    let content = match self.store.read(&path).await {
      Ok(c) => c,
      Err(e) => {
        warn!(target: "lessons", %slug, error = %e, "Lesson file unreadable; reporting not found");
        return Ok(None);
      }
    };

    let lesson = parse_lesson(&path, &content)?;
    Ok(Some(self.ensure_quality(lesson)))
  }

  /// Run the quality pipeline on an already-parsed lesson.
  pub fn ensure_quality(&self, mut lesson: Lesson) -> Lesson {
    if self.trusts_stamp(&lesson) {
      debug!(target: "lessons", "Fast path: stored PERFECT stamp trusted");
      return lesson;
    }

    let report = verify_against(&lesson, &self.standards);
    if report.is_perfect() {
      debug!(target: "lessons", score = report.score, "Lesson verified PERFECT");
      lesson.stamp_quality(report);
      return lesson;
    }

    let mut patched = repair(&lesson, &report);
    let final_report = verify_against(&patched, &self.standards);
    info!(
      target: "lessons",
      initial_score = report.score,
      final_score = final_report.score,
      still_missing = final_report.missing.len(),
      "Lesson repaired"
    );
    patched.stamp_quality(final_report);
    patched
  }

  fn trusts_stamp(&self, lesson: &Lesson) -> bool {
    let Some(q) = lesson.stored_quality() else { return false };
    if !q.is_perfect() || q.standards_version.is_empty() {
      return false;
    }
    match self.fast_path {
      FastPathPolicy::AnyVersion => true,
      FastPathPolicy::CurrentVersion => {
        let current = q.standards_version == self.standards.version;
        if !current {
          debug!(target: "lessons", stamped = %q.standards_version, current = %self.standards.version, "Stale PERFECT stamp; re-verifying");
        }
        current
      }
    }
  }

  /// Summaries of every lesson file in the root, in no particular order.
  ///
  /// Files are read concurrently. A file that cannot be read or parsed is
  /// logged and skipped; only a failure to list the root is an error.
  #[instrument(level = "info", skip(self))]
  pub async fn get_all_algorithms(&self) -> Result<Vec<LessonSummary>, LessonError> {
    let files = self.store.list_root().await?;

    let mut tasks = JoinSet::new();
    for path in files {
      let store = self.store.clone();
      tasks.spawn(async move {
        let content = store.read(&path).await?;
        let lesson = parse_lesson(&path, &content)?;
        Ok::<_, LessonError>(summarize(&path, &lesson))
      });
    }

    let mut summaries = Vec::new();
    let mut skipped = 0usize;
    while let Some(joined) = tasks.join_next().await {
      match joined {
        Ok(Ok(summary)) => summaries.push(summary),
        Ok(Err(e)) => {
          skipped += 1;
          warn!(target: "lessons", error = %e, "Skipping lesson in listing");
        }
        Err(e) => {
          skipped += 1;
          warn!(target: "lessons", error = %e, "Listing task failed; skipping lesson");
        }
      }
    }

    info!(target: "lessons", listed = summaries.len(), skipped, "Listed lessons");
    Ok(summaries)
  }
}

/// Invalid UTF-8 is a parse failure here, like any other bad JSON.
fn parse_lesson(path: &Path, content: &[u8]) -> Result<Lesson, LessonError> {
  serde_json::from_slice(content).map_err(|source| LessonError::Malformed { path: path.to_path_buf(), source })
}

fn summarize(path: &Path, lesson: &Lesson) -> LessonSummary {
  let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
  LessonSummary {
    id: lesson.lesson_number().or_else(|| first_number(stem)).unwrap_or(0),
    slug: lesson.slug_id().unwrap_or(stem).to_string(),
    title: lesson
      .title()
      .map(str::to_string)
      .unwrap_or_else(|| stem.replace('-', " ")),
    difficulty: lesson.difficulty().unwrap_or("medium").to_string(),
    pattern: lesson.pattern().unwrap_or("general").to_string(),
    tier: lesson.tier().unwrap_or("FOUNDATION").to_string(),
    kind: "algorithm",
  }
}

/// First run of ASCII digits in `s`, e.g. `lesson-07-two-sum` → 7.
fn first_number(s: &str) -> Option<u64> {
  let start = s.find(|c: char| c.is_ascii_digit())?;
  let digits: String = s[start..].chars().take_while(char::is_ascii_digit).collect();
  digits.parse().ok()
}

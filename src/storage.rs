//! Lesson store: maps slugs to JSON files under the lesson root.
//!
//! Resolution order for a slug:
//!   1. `{root}/{slug}.json`
//!   2. `{root}/{bucket}/{slug}.json` for each configured bucket, in order
//!   3. the first `*.json` (root first, then buckets; names sorted) whose file name
//!      contains the slug, or whose name without `lesson-` and `.json` does

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::LessonError;

#[derive(Clone, Debug)]
pub struct LessonStore {
  root: PathBuf,
  buckets: Vec<String>,
}

impl LessonStore {
  pub fn new(root: impl Into<PathBuf>, buckets: Vec<String>) -> Self {
    Self { root: root.into(), buckets }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Find the file backing `slug`. Unsafe slugs never resolve.
  #[instrument(level = "debug", skip(self))]
  pub async fn resolve(&self, slug: &str) -> Option<PathBuf> {
    if !is_safe_slug(slug) {
      debug!(target: "lessons", %slug, "Rejected unsafe slug");
      return None;
    }
    let file_name = format!("{slug}.json");

    let direct = self.root.join(&file_name);
    if is_file(&direct).await {
      return Some(direct);
    }

    for bucket in &self.buckets {
      let candidate = self.root.join(bucket).join(&file_name);
      if is_file(&candidate).await {
        debug!(target: "lessons", %slug, %bucket, "Resolved lesson in bucket");
        return Some(candidate);
      }
    }

    let mut dirs = vec![self.root.clone()];
    dirs.extend(self.buckets.iter().map(|b| self.root.join(b)));
    for dir in dirs {
      for path in json_files(&dir).await.unwrap_or_default() {
        let matched = path
          .file_name()
          .and_then(|n| n.to_str())
          .is_some_and(|name| fuzzy_match(name, slug));
        if matched {
          debug!(target: "lessons", %slug, path = %path.display(), "Resolved lesson by fuzzy match");
          return Some(path);
        }
      }
    }
    None
  }

  /// Raw bytes of a lesson file. Decoding is left to the JSON parser so that
  /// bad encodings surface as malformed documents, not IO failures.
  pub async fn read(&self, path: &Path) -> Result<Vec<u8>, LessonError> {
    tokio::fs::read(path)
      .await
      .map_err(|e| LessonError::io(path, e))
  }

  /// All `*.json` files directly under the root, sorted by name.
  pub async fn list_root(&self) -> Result<Vec<PathBuf>, LessonError> {
    json_files(&self.root).await.map_err(|e| LessonError::io(&self.root, e))
  }
}

/// Slugs are single path components.
fn is_safe_slug(slug: &str) -> bool {
  !slug.is_empty()
    && slug != "."
    && !slug.contains("..")
    && !slug.contains(&['/', '\\', '\0'][..])
}

fn fuzzy_match(file_name: &str, slug: &str) -> bool {
  if !file_name.ends_with(".json") {
    return false;
  }
  if file_name.contains(slug) {
    return true;
  }
  let bare = file_name.replacen("lesson-", "", 1).replacen(".json", "", 1);
  bare.contains(slug)
}

async fn is_file(path: &Path) -> bool {
  tokio::fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

async fn json_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
  let mut entries = tokio::fs::read_dir(dir).await?;
  let mut out = Vec::new();
  while let Some(entry) = entries.next_entry().await? {
    let path = entry.path();
    if path.extension().is_some_and(|ext| ext == "json") && is_file(&path).await {
      out.push(path);
    }
  }
  out.sort();
  Ok(out)
}

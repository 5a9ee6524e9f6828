//! Server configuration: optional TOML file, then environment overrides.
//!
//! Environment variables:
//!   LESSON_CONFIG_PATH : path to a TOML file with any of the `ServerConfig` keys
//!   PORT               : u16 (default 3001)
//!   LESSONS_DIR        : lesson JSON root (default "./algo")
//!   STATIC_DIR         : built frontend served as SPA fallback (default "./static")
//!   LESSON_FAST_PATH   : "current_version" (default) or "any_version"
//!
//! Bucket subdirectories are only configurable through TOML.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info, warn};

/// Subdirectories of the lesson root searched when `{slug}.json` is not at the top level.
pub const DEFAULT_BUCKETS: [&str; 3] = ["GOOD_AS_IS", "NEEDS_AI_FIX", "FIXED_BY_AI"];

/// When a stored PERFECT stamp is trusted without re-verifying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FastPathPolicy {
  /// Stamp must carry the registry's current standards version.
  #[default]
  CurrentVersion,
  /// Any non-empty standards version is trusted (legacy behavior).
  AnyVersion,
}

impl FastPathPolicy {
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "current_version" | "current" => Some(FastPathPolicy::CurrentVersion),
      "any_version" | "any" => Some(FastPathPolicy::AnyVersion),
      _ => None,
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub port: u16,
  pub lessons_dir: PathBuf,
  pub static_dir: PathBuf,
  pub buckets: Vec<String>,
  pub fast_path: FastPathPolicy,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      port: 3001,
      lessons_dir: PathBuf::from("./algo"),
      static_dir: PathBuf::from("./static"),
      buckets: DEFAULT_BUCKETS.iter().map(|b| b.to_string()).collect(),
      fast_path: FastPathPolicy::default(),
    }
  }
}

impl ServerConfig {
  /// TOML base (if LESSON_CONFIG_PATH is set and readable), then env overrides.
  pub fn from_env() -> Self {
    let base = std::env::var("LESSON_CONFIG_PATH")
      .ok()
      .and_then(|path| load_toml(&path))
      .unwrap_or_default();
    base.with_overrides(|key| std::env::var(key).ok())
  }

  /// Apply overrides from a key lookup. Unparseable values are logged and ignored.
  pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
    if let Some(p) = lookup("PORT") {
      match p.parse::<u16>() {
        Ok(port) => self.port = port,
        Err(e) => warn!(target: "inpact_backend", value = %p, error = %e, "Ignoring invalid PORT"),
      }
    }
    if let Some(dir) = lookup("LESSONS_DIR") {
      self.lessons_dir = PathBuf::from(dir);
    }
    if let Some(dir) = lookup("STATIC_DIR") {
      self.static_dir = PathBuf::from(dir);
    }
    if let Some(fp) = lookup("LESSON_FAST_PATH") {
      match FastPathPolicy::parse(&fp) {
        Some(policy) => self.fast_path = policy,
        None => warn!(target: "inpact_backend", value = %fp, "Ignoring unknown LESSON_FAST_PATH"),
      }
    }
    self
  }
}

/// Read and parse a TOML config file. On any IO/parse error, logs and returns None.
fn load_toml(path: &str) -> Option<ServerConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<ServerConfig>(&s) {
      Ok(cfg) => {
        info!(target: "inpact_backend", %path, "Loaded server config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "inpact_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "inpact_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

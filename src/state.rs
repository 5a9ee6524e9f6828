//! Application state: built once at startup and shared with every handler.

use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::service::LessonService;
use crate::storage::LessonStore;

pub struct AppState {
    pub config: ServerConfig,
    pub lessons: LessonService,
}

impl AppState {
    #[instrument(level = "info", skip_all)]
    pub fn new(config: ServerConfig) -> Self {
        let store = LessonStore::new(config.lessons_dir.clone(), config.buckets.clone());
        let lessons = LessonService::new(store, config.fast_path);
        info!(
            target: "inpact_backend",
            lessons_dir = %config.lessons_dir.display(),
            buckets = ?config.buckets,
            fast_path = ?config.fast_path,
            standards = %lessons.standards().version,
            "Lesson service ready"
        );
        Self { config, lessons }
    }
}

pub mod lessons;
pub mod progress;
pub mod sync;

pub use lessons::LessonStore;
pub use progress::ProgressStore;
pub use sync::{SyncItem, SyncManager, SyncOutcome, SyncQueue, SyncStatus, SyncSummary};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::warn;

/// Filesystem layout of the data directory. Lessons live in their own
/// subdirectory; everything else is a single JSON file at the root.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lessons_dir(&self) -> PathBuf {
        self.root.join("lessons")
    }

    pub fn progress_file(&self) -> PathBuf {
        self.root.join("progress.json")
    }

    pub fn sync_queue_file(&self) -> PathBuf {
        self.root.join("sync_queue.json")
    }

    pub fn sync_status_file(&self) -> PathBuf {
        self.root.join("sync_status.json")
    }

    pub async fn ensure(&self) -> Result<()> {
        fs::create_dir_all(self.lessons_dir())
            .await
            .with_context(|| format!("Failed to create data directories under {}", self.root.display()))?;
        Ok(())
    }
}

/// Read a JSON file, falling back to the default when the file is missing
/// or damaged. Damage is logged, not surfaced; the app keeps working with
/// fresh state.
pub(crate) async fn load_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match fs::read_to_string(path).await {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable JSON, starting from defaults");
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}

pub(crate) async fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let raw = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, raw)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub(crate) fn now_timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

use anyhow::{Context, Result};
use dashmap::DashMap;
use lesson::Lesson;
use tokio::fs;
use tracing::warn;

use crate::{DataPaths, save_json};

/// Lesson library over a directory of `{id}.json` files, with an in-memory
/// read cache.
pub struct LessonStore {
    paths: DataPaths,
    cache: DashMap<String, Lesson>,
}

impl LessonStore {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            cache: DashMap::new(),
        }
    }

    /// Every parseable lesson on disk, sorted by `order`. Unreadable or
    /// invalid files are skipped with a warning; one bad file must not take
    /// the whole library down.
    pub async fn load_all(&self) -> Result<Vec<Lesson>> {
        self.paths.ensure().await?;

        let dir = self.paths.lessons_dir();
        let mut entries = fs::read_dir(&dir)
            .await
            .with_context(|| format!("Failed to read {}", dir.display()))?;

        let mut lessons = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let raw = match fs::read_to_string(&path).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable lesson file");
                    continue;
                }
            };

            match serde_json::from_str::<Lesson>(&raw) {
                Ok(mut lesson) => {
                    if lesson.id.is_empty() {
                        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                            lesson.id = stem.to_string();
                        }
                    }
                    self.cache.insert(lesson.id.clone(), lesson.clone());
                    lessons.push(lesson);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping invalid lesson file");
                }
            }
        }

        lessons.sort_by_key(|l| l.order);
        Ok(lessons)
    }

    /// A single lesson by id; `Ok(None)` when no such file exists.
    pub async fn load(&self, id: &str) -> Result<Option<Lesson>> {
        if let Some(cached) = self.cache.get(id) {
            return Ok(Some(cached.clone()));
        }

        let path = self.paths.lessons_dir().join(format!("{id}.json"));
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(_) => return Ok(None),
        };

        let mut lesson: Lesson = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if lesson.id.is_empty() {
            lesson.id = id.to_string();
        }

        self.cache.insert(lesson.id.clone(), lesson.clone());
        Ok(Some(lesson))
    }

    pub async fn save(&self, lesson: &Lesson) -> Result<()> {
        let path = self.paths.lessons_dir().join(format!("{}.json", lesson.id));
        save_json(&path, lesson).await?;
        self.cache.insert(lesson.id.clone(), lesson.clone());
        Ok(())
    }
}

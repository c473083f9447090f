use anyhow::Result;
use lesson::{Achievement, Bookmark, Progress, QuizScore, Statistics};
use serde_json::json;

use crate::lessons::LessonStore;
use crate::sync::SyncQueue;
use crate::{DataPaths, load_json_or_default, now_timestamp, save_json};

/// Whole-file read-modify-write over `progress.json`. Completions and quiz
/// scores also land on the sync queue for later upload.
pub struct ProgressStore {
    paths: DataPaths,
    queue: SyncQueue,
}

impl ProgressStore {
    pub fn new(paths: DataPaths) -> Self {
        let queue = SyncQueue::new(paths.clone());
        Self { paths, queue }
    }

    /// Current progress; a missing or damaged file reads as empty progress.
    pub async fn load(&self) -> Progress {
        load_json_or_default(&self.paths.progress_file()).await
    }

    pub async fn save(&self, progress: &mut Progress) -> Result<()> {
        progress.last_updated = Some(now_timestamp());
        save_json(&self.paths.progress_file(), progress).await
    }

    /// Idempotent. Returns whether the lesson was newly completed; only new
    /// completions are queued for sync.
    pub async fn mark_lesson_complete(&self, lesson_id: &str) -> Result<bool> {
        let mut progress = self.load().await;
        if progress.lessons_completed.iter().any(|id| id == lesson_id) {
            return Ok(false);
        }

        progress.lessons_completed.push(lesson_id.to_string());
        self.save(&mut progress).await?;
        self.queue
            .enqueue("lesson_complete", json!({ "lesson_id": lesson_id }))
            .await?;
        Ok(true)
    }

    pub async fn record_quiz_score(&self, mut score: QuizScore) -> Result<()> {
        if score.timestamp.is_empty() {
            score.timestamp = now_timestamp();
        }

        let mut progress = self.load().await;
        progress.quiz_scores.push(score.clone());
        self.save(&mut progress).await?;
        self.queue
            .enqueue("quiz_score", serde_json::to_value(&score)?)
            .await?;
        Ok(())
    }

    pub async fn update_time_spent(&self, lesson_id: &str, seconds: u64) -> Result<()> {
        let mut progress = self.load().await;
        *progress.time_spent.entry(lesson_id.to_string()).or_insert(0) += seconds;
        self.save(&mut progress).await
    }

    pub async fn add_bookmark(&self, lesson_id: &str, position: &str) -> Result<()> {
        let mut progress = self.load().await;
        progress.bookmarks.push(Bookmark {
            lesson_id: lesson_id.to_string(),
            position: position.to_string(),
            created_at: now_timestamp(),
        });
        self.save(&mut progress).await
    }

    /// Idempotent per achievement id.
    pub async fn unlock_achievement(&self, id: &str, title: &str) -> Result<bool> {
        let mut progress = self.load().await;
        if progress.achievements.iter().any(|a| a.id == id) {
            return Ok(false);
        }

        progress.achievements.push(Achievement {
            id: id.to_string(),
            title: title.to_string(),
            unlocked_at: now_timestamp(),
        });
        self.save(&mut progress).await?;
        Ok(true)
    }

    pub async fn statistics(&self, lessons: &LessonStore) -> Result<Statistics> {
        let progress = self.load().await;
        let total_lessons = lessons.load_all().await?.len();
        let completed_lessons = progress.lessons_completed.len();

        let total_quizzes = progress.quiz_scores.len();
        let average_score = if total_quizzes > 0 {
            let sum: f64 = progress.quiz_scores.iter().map(|s| s.score).sum();
            round1(sum / total_quizzes as f64)
        } else {
            0.0
        };

        let total_seconds: u64 = progress.time_spent.values().sum();
        let completion_rate = if total_lessons > 0 {
            completed_lessons as f64 / total_lessons as f64 * 100.0
        } else {
            0.0
        };

        Ok(Statistics {
            total_lessons,
            completed_lessons,
            completion_rate,
            total_quizzes,
            average_score,
            total_time_minutes: round1(total_seconds as f64 / 60.0),
            achievements_count: progress.achievements.len(),
            bookmarks_count: progress.bookmarks.len(),
        })
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

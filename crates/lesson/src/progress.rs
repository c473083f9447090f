use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Everything the app remembers about the learner, persisted as one JSON
/// blob. A missing or corrupt file deserializes to the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub lessons_completed: Vec<String>,
    #[serde(default)]
    pub quiz_scores: Vec<QuizScore>,
    #[serde(default)]
    pub time_spent: HashMap<String, u64>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizScore {
    pub lesson_id: String,
    /// Percentage in [0, 100].
    pub score: f64,
    pub correct: usize,
    pub total: usize,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub lesson_id: String,
    pub position: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub unlocked_at: String,
}

/// Aggregate view over the progress file and the lesson library.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_lessons: usize,
    pub completed_lessons: usize,
    pub completion_rate: f64,
    pub total_quizzes: usize,
    pub average_score: f64,
    pub total_time_minutes: f64,
    pub achievements_count: usize,
    pub bookmarks_count: usize,
}

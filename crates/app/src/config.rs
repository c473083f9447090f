use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub summary: SummaryConfig,
    pub quiz: QuizConfig,
    pub speech: SpeechConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub sentences: usize,
    pub key_points: usize,
    pub as_bullets: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    pub questions: usize,
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub rate: u32,
    pub volume: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub probe_addr: String,
    pub probe_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            summary: SummaryConfig {
                sentences: 5,
                key_points: 7,
                as_bullets: true,
            },
            quiz: QuizConfig {
                questions: 5,
                difficulty: "medium".to_string(),
            },
            speech: SpeechConfig {
                rate: 150,
                volume: 1.0,
            },
            sync: SyncConfig {
                probe_addr: "8.8.8.8:53".to_string(),
                probe_timeout_secs: 3,
            },
        }
    }
}

impl AppConfig {
    /// Short sessions: tighter summaries, smaller quizzes.
    pub fn quick_review() -> Self {
        Self {
            summary: SummaryConfig {
                sentences: 3,
                key_points: 3,
                as_bullets: true,
            },
            quiz: QuizConfig {
                questions: 3,
                difficulty: "easy".to_string(),
            },
            ..Self::default()
        }
    }

    /// Long sessions: fuller summaries, bigger quizzes.
    pub fn exam_prep() -> Self {
        Self {
            summary: SummaryConfig {
                sentences: 7,
                key_points: 10,
                as_bullets: true,
            },
            quiz: QuizConfig {
                questions: 10,
                difficulty: "hard".to_string(),
            },
            ..Self::default()
        }
    }
}

use serde::{Deserialize, Serialize};

/// A single lesson as stored on disk. Lessons are authored as JSON files;
/// missing fields fall back to the defaults below so hand-written content
/// stays forgiving to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_order")]
    pub order: u32,
    #[serde(default)]
    pub content: LessonContent,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub quiz_questions: Vec<Question>,
}

fn default_title() -> String {
    "Untitled".to_string()
}

fn default_difficulty() -> String {
    "intermediate".to_string()
}

fn default_order() -> u32 {
    999
}

impl Lesson {
    /// All section text joined into one document, for ranking and scanning.
    pub fn all_text(&self) -> String {
        self.content
            .sections
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonContent {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Mcq,
    FillBlank,
}

/// A quiz question, either authored in the lesson file or generated.
///
/// For `Mcq` questions `options` holds exactly four entries and `correct`
/// indexes the right one. For `FillBlank` questions `answer` holds the
/// expected text and `options`/`correct` are unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub generated: bool,
}

/// Derived outline of a lesson: one topic per content section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicOutline {
    pub title: String,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub key_concepts: Vec<String>,
}

pub mod model;
pub mod progress;

pub use model::{Lesson, LessonContent, Question, QuestionKind, Section, Topic, TopicOutline};
pub use progress::{Achievement, Bookmark, Progress, QuizScore, Statistics};

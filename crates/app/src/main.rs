mod config;

use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use lesson::{Lesson, QuestionKind, QuizScore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use store::{DataPaths, LessonStore, ProgressStore, SyncManager};
use tracing::info;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "study", about = "Offline study app: lessons, summaries, quizzes")]
struct Cli {
    /// Data directory holding lessons and progress
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Session preset controlling summary and quiz sizes
    #[arg(long, value_enum, default_value = "default")]
    preset: Preset,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    QuickReview,
    ExamPrep,
}

#[derive(Subcommand)]
enum Commands {
    /// List available lessons with completion state
    Lessons,
    /// Print an extractive summary of a lesson
    Summary {
        lesson_id: String,
        #[arg(long)]
        sentences: Option<usize>,
        /// Join sentences as prose instead of bullet points
        #[arg(long)]
        prose: bool,
    },
    /// Print key points for a lesson
    KeyPoints {
        lesson_id: String,
        #[arg(long)]
        max: Option<usize>,
    },
    /// Print the topic outline for a lesson
    Outline { lesson_id: String },
    /// Take an interactive quiz and record the score
    Quiz {
        lesson_id: String,
        #[arg(long)]
        questions: Option<usize>,
        #[arg(long)]
        difficulty: Option<String>,
    },
    /// Show learning statistics
    Progress,
    /// Show sync status and push pending changes
    Sync {
        /// Only report status, do not sync
        #[arg(long)]
        status_only: bool,
    },
    /// Read a lesson summary aloud
    Speak {
        lesson_id: String,
        #[arg(long)]
        rate: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = match cli.preset {
        Preset::Default => AppConfig::default(),
        Preset::QuickReview => AppConfig::quick_review(),
        Preset::ExamPrep => AppConfig::exam_prep(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let paths = DataPaths::new(&config.data_dir);
    let lessons = LessonStore::new(paths.clone());
    let progress = ProgressStore::new(paths.clone());

    match cli.command {
        Commands::Lessons => list_lessons(&lessons, &progress).await,
        Commands::Summary {
            lesson_id,
            sentences,
            prose,
        } => {
            let lesson = require_lesson(&lessons, &lesson_id).await?;
            let count = sentences.unwrap_or(config.summary.sentences);
            let summary = textrank::summarize(&lesson.all_text(), count, !prose);
            if summary.is_empty() {
                println!("(no content to summarize)");
            } else {
                println!("{summary}");
            }
            Ok(())
        }
        Commands::KeyPoints { lesson_id, max } => {
            let lesson = require_lesson(&lessons, &lesson_id).await?;
            let points =
                textrank::extract_key_points(&lesson, max.unwrap_or(config.summary.key_points));
            if points.is_empty() {
                println!("(no key points found)");
            }
            for point in points {
                println!("• {point}");
            }
            Ok(())
        }
        Commands::Outline { lesson_id } => {
            let lesson = require_lesson(&lessons, &lesson_id).await?;
            let outline = textrank::generate_topic_outline(&lesson);
            println!("{}", outline.title);
            for topic in outline.topics {
                println!("  {}", topic.name);
                for concept in topic.key_concepts {
                    println!("    - {concept}");
                }
            }
            Ok(())
        }
        Commands::Quiz {
            lesson_id,
            questions,
            difficulty,
        } => {
            let lesson = require_lesson(&lessons, &lesson_id).await?;
            run_quiz(
                &lesson,
                questions.unwrap_or(config.quiz.questions),
                difficulty.as_deref().unwrap_or(&config.quiz.difficulty),
                &progress,
            )
            .await
        }
        Commands::Progress => {
            let stats = progress.statistics(&lessons).await?;
            println!(
                "Lessons completed: {}/{} ({:.0}%)",
                stats.completed_lessons, stats.total_lessons, stats.completion_rate
            );
            println!("Quizzes taken:     {}", stats.total_quizzes);
            println!("Average score:     {:.0}%", stats.average_score);
            println!("Time studied:      {:.0} min", stats.total_time_minutes);
            println!("Achievements:      {}", stats.achievements_count);
            println!("Bookmarks:         {}", stats.bookmarks_count);
            Ok(())
        }
        Commands::Sync { status_only } => {
            let manager = SyncManager::new(paths.clone()).with_probe(
                config.sync.probe_addr.clone(),
                Duration::from_secs(config.sync.probe_timeout_secs),
            );

            let summary = manager.summary().await;
            println!("{}", summary.status_text);

            if !status_only && summary.can_sync {
                let outcome = manager.sync().await;
                println!("{}", outcome.message);
            }
            Ok(())
        }
        Commands::Speak { lesson_id, rate } => {
            let lesson = require_lesson(&lessons, &lesson_id).await?;
            let summary = textrank::summarize(&lesson.all_text(), config.summary.sentences, false);
            if summary.is_empty() {
                println!("(no content to read)");
                return Ok(());
            }

            let mut engine = speech::SpeechEngine::new();
            engine.set_rate(rate.unwrap_or(config.speech.rate));
            engine.set_volume(config.speech.volume);

            info!(lesson = %lesson.id, "reading summary aloud");
            engine.speak_blocking(&summary).await;
            Ok(())
        }
    }
}

async fn require_lesson(lessons: &LessonStore, id: &str) -> Result<Lesson> {
    match lessons.load(id).await? {
        Some(lesson) => Ok(lesson),
        None => bail!("No lesson with id '{id}'"),
    }
}

async fn list_lessons(lessons: &LessonStore, progress: &ProgressStore) -> Result<()> {
    let all = lessons.load_all().await?;
    if all.is_empty() {
        println!("No lessons found. Add lesson JSON files under the data directory.");
        return Ok(());
    }

    let completed = progress.load().await.lessons_completed;
    for lesson in all {
        let mark = if completed.contains(&lesson.id) { "x" } else { " " };
        println!("[{mark}] {:<20} {} ({})", lesson.id, lesson.title, lesson.difficulty);
    }
    Ok(())
}

async fn run_quiz(
    lesson: &Lesson,
    num_questions: usize,
    difficulty: &str,
    progress: &ProgressStore,
) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    let questions = quizgen::generate_from_lesson(lesson, num_questions, difficulty, &mut rng);

    if questions.is_empty() {
        println!("No questions available for this lesson.");
        return Ok(());
    }

    let mut correct_count = 0;
    for (i, question) in questions.iter().enumerate() {
        println!("\nQ{}: {}", i + 1, question.question);

        let (is_correct, explanation) = match question.kind {
            QuestionKind::Mcq => {
                for (j, option) in question.options.iter().enumerate() {
                    println!("  {}) {option}", option_letter(j));
                }
                let selected = prompt_option(question.options.len())?;
                quizgen::grade_mcq(question, selected)
            }
            QuestionKind::FillBlank => {
                if let Some(hint) = &question.hint {
                    println!("  ({hint})");
                }
                let answer = prompt_line()?;
                quizgen::grade_fill_blank(question, &answer)
            }
        };

        if is_correct {
            correct_count += 1;
            println!("Correct!");
        } else {
            println!("Not quite. {explanation}");
        }
    }

    let total = questions.len();
    let score = correct_count as f64 / total as f64 * 100.0;
    println!("\nScore: {score:.0}% ({correct_count}/{total} correct)");

    progress
        .record_quiz_score(QuizScore {
            lesson_id: lesson.id.clone(),
            score,
            correct: correct_count,
            total,
            timestamp: String::new(),
        })
        .await?;

    if score == 100.0 && progress.unlock_achievement("perfect_score", "Perfect Score").await? {
        println!("Achievement unlocked: Perfect Score");
    }
    if progress.load().await.quiz_scores.len() >= 5
        && progress.unlock_achievement("quiz_master", "Quiz Master").await?
    {
        println!("Achievement unlocked: Quiz Master");
    }

    Ok(())
}

fn option_letter(index: usize) -> char {
    (b'a' + index as u8) as char
}

fn prompt_line() -> Result<String> {
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read answer")?;
    Ok(line.trim().to_string())
}

fn prompt_option(option_count: usize) -> Result<usize> {
    loop {
        let line = prompt_line()?;
        let choice = line.to_lowercase().chars().next();
        match choice {
            Some(c) if c >= 'a' && (c as usize - 'a' as usize) < option_count => {
                return Ok(c as usize - 'a' as usize);
            }
            _ => println!(
                "Please answer a-{}.",
                option_letter(option_count.saturating_sub(1))
            ),
        }
    }
}

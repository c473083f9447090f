use lesson::{Lesson, LessonContent, Question, QuestionKind};
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use tracing::debug;

use crate::distractor::{distractors, modify_formula};

/// Turn a factual statement into an MCQ.
///
/// Patterns are tried in order: "subject is answer", "subject = answer",
/// "subject equals answer"; the first match wins. A question is only
/// emitted when a full set of three distractors could be produced.
pub fn mcq_from_fact(fact: &str, rng: &mut impl Rng) -> Option<Question> {
    let patterns = [
        Regex::new(r"(?i)^(.+?)\s+is\s+(.+)").unwrap(),
        Regex::new(r"(?i)^(.+?)\s*=\s*(.+)").unwrap(),
        Regex::new(r"(?i)^(.+?)\s+equals\s+(.+)").unwrap(),
    ];

    for pattern in &patterns {
        let Some(caps) = pattern.captures(fact) else {
            continue;
        };
        let subject = caps[1].trim().to_string();
        let answer = caps[2].trim().to_string();

        let wrong = distractors(&answer, 3, rng);
        if wrong.len() != 3 {
            return None;
        }

        let mut options = wrong;
        options.push(answer.clone());
        options.shuffle(rng);
        let correct = options.iter().position(|o| *o == answer)?;

        return Some(Question {
            question: format!("What is {subject}?"),
            kind: QuestionKind::Mcq,
            options,
            correct: Some(correct),
            answer: None,
            explanation: fact.to_string(),
            hint: None,
            generated: true,
        });
    }

    None
}

/// Scan text for formula definitions ("v = d/t") and build one MCQ per
/// match. Identifiers longer than three characters are skipped; those are
/// almost always ordinary sentences, not variables.
pub fn formula_questions(text: &str, rng: &mut impl Rng) -> Vec<Question> {
    let formula = Regex::new(r"(\w+)\s*=\s*([^.\n]+)").unwrap();
    let mut questions = Vec::new();

    for caps in formula.captures_iter(text) {
        let var = caps[1].trim().to_string();
        let body = caps[2].trim().to_string();

        if var.chars().count() > 3 {
            continue;
        }

        let mut options = vec![
            body.clone(),
            modify_formula(&body, rng),
            modify_formula(&body, rng),
            modify_formula(&body, rng),
        ];
        options.shuffle(rng);
        let Some(correct) = options.iter().position(|o| *o == body) else {
            continue;
        };

        questions.push(Question {
            question: format!("What is the formula for {var}?"),
            kind: QuestionKind::Mcq,
            options,
            correct: Some(correct),
            answer: None,
            explanation: format!("{var} = {body}"),
            hint: None,
            generated: true,
        });
    }

    questions
}

/// Blank out `key_term` inside `sentence` and ask for it back.
pub fn create_fill_blank(sentence: &str, key_term: &str) -> Question {
    Question {
        question: sentence.replace(key_term, "_____"),
        kind: QuestionKind::FillBlank,
        options: Vec::new(),
        correct: None,
        answer: Some(key_term.to_string()),
        explanation: String::new(),
        hint: key_term.chars().next().map(|c| format!("First letter: {c}")),
        generated: true,
    }
}

/// Assemble a quiz for a lesson.
///
/// Pre-authored questions are taken first, then facts from the key points,
/// then formula matches from the section text, until the quota is filled or
/// the sources run dry. The merged set is shuffled and truncated to
/// `num_questions`. `difficulty` is accepted for future tuning and does not
/// change generation yet.
pub fn generate_from_lesson(
    lesson: &Lesson,
    num_questions: usize,
    _difficulty: &str,
    rng: &mut impl Rng,
) -> Vec<Question> {
    let mut questions: Vec<Question> = lesson
        .quiz_questions
        .iter()
        .take(num_questions)
        .cloned()
        .collect();

    if questions.len() < num_questions {
        let needed = num_questions - questions.len();
        questions.extend(generate_from_content(
            &lesson.content,
            &lesson.key_points,
            needed,
            rng,
        ));
    }

    questions.shuffle(rng);
    questions.truncate(num_questions);

    debug!(lesson = %lesson.id, count = questions.len(), "assembled quiz");
    questions
}

fn generate_from_content(
    content: &LessonContent,
    key_points: &[String],
    needed: usize,
    rng: &mut impl Rng,
) -> Vec<Question> {
    let mut generated = Vec::new();

    for point in key_points {
        if generated.len() >= needed {
            break;
        }
        if let Some(question) = mcq_from_fact(point, rng) {
            generated.push(question);
        }
    }

    for section in &content.sections {
        if generated.len() >= needed {
            break;
        }
        generated.extend(formula_questions(&section.content, rng));
    }

    generated.truncate(needed);
    generated
}

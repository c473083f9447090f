use std::cmp::Ordering;
use std::collections::HashSet;

use lesson::Lesson;
use regex::Regex;
use segment::{split_sentences, tokenize};
use tracing::debug;

use crate::graph::SimilarityGraph;
use crate::rank::rank;

// Substrings that mark a sentence as likely exam-relevant.
static IMPORTANCE_MARKERS: &[&str] = &[
    "important", "key", "main", "primary", "essential", "fundamental",
    "formula", "definition", "defined as", "means", "example",
    "note", "remember", "always", "never", "must",
];

/// Extractive summary of `text`.
///
/// When the text has at most `num_sentences` sentences they all come back
/// verbatim, no ranking. Otherwise the top-scored sentences are selected
/// and then put back into document order before joining; ties keep
/// document order.
pub fn summarize(text: &str, num_sentences: usize, as_bullets: bool) -> String {
    let sentences = split_sentences(text);

    if sentences.len() <= num_sentences {
        return join(&sentences, as_bullets);
    }

    let scores = score_sentences(&sentences);
    debug!(sentences = sentences.len(), selected = num_sentences, "ranked for summary");

    let ranked = by_descending_score(&scores);
    let mut top: Vec<usize> = ranked[..num_sentences].to_vec();
    top.sort_unstable();

    let selected: Vec<String> = top.into_iter().map(|i| sentences[i].clone()).collect();
    join(&selected, as_bullets)
}

/// Key points for a lesson.
///
/// Pre-authored `key_points` win outright and come back verbatim, truncated
/// to `max_points`. Otherwise sentences are ranked over the concatenated
/// section text with a 1.5x boost for the first importance marker found,
/// and returned in descending score order, cleaned up for display. Results
/// of ten characters or fewer after cleanup are dropped.
pub fn extract_key_points(lesson: &Lesson, max_points: usize) -> Vec<String> {
    if !lesson.key_points.is_empty() {
        return lesson.key_points.iter().take(max_points).cloned().collect();
    }

    let text = lesson.all_text();
    let sentences = split_sentences(&text);
    let mut scores = score_sentences(&sentences);

    for (i, sentence) in sentences.iter().enumerate() {
        let lower = sentence.to_lowercase();
        if IMPORTANCE_MARKERS.iter().any(|m| lower.contains(m)) {
            scores[i] *= 1.5;
        }
    }

    let ranked = by_descending_score(&scores);

    let mut points = Vec::new();
    for i in ranked.into_iter().take(max_points) {
        let point = clean_key_point(&sentences[i]);
        if point.chars().count() > 10 {
            points.push(point);
        }
    }
    points
}

pub(crate) fn score_sentences(sentences: &[String]) -> Vec<f64> {
    let sentence_words: Vec<HashSet<String>> =
        sentences.iter().map(|s| tokenize(s)).collect();
    let graph = SimilarityGraph::build(&sentence_words);
    rank(&graph)
}

// Stable sort, so equal scores keep document order.
fn by_descending_score(scores: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    indices
}

fn join(sentences: &[String], as_bullets: bool) -> String {
    if as_bullets {
        sentences
            .iter()
            .map(|s| format!("• {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        sentences.join(" ")
    }
}

/// Strip markdown emphasis and bullet glyphs, capitalize the first letter.
fn clean_key_point(text: &str) -> String {
    let bold = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    let italic = Regex::new(r"\*([^*]+)\*").unwrap();
    let bullet = Regex::new(r"^[•\-\*]\s*").unwrap();

    let text = bold.replace_all(text, "$1");
    let text = italic.replace_all(&text, "$1");
    let text = bullet.replace(&text, "");
    let text = text.trim();

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

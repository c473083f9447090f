use std::collections::HashSet;
use std::sync::OnceLock;

use unicode_segmentation::UnicodeSegmentation;

// Common English function words, filtered out before similarity scoring.
static STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "from", "as", "is", "was", "are", "were", "been",
    "be", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "must", "shall", "can", "need",
    "this", "that", "these", "those", "it", "its", "they", "them",
    "their", "we", "us", "our", "he", "him", "his", "she", "her",
    "you", "your", "i", "me", "my", "what", "which", "who", "whom",
    "when", "where", "why", "how", "all", "each", "every", "both",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "same", "so", "than", "too", "very", "just", "also",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

pub fn is_stop_word(word: &str) -> bool {
    stop_words().contains(word)
}

/// Lowercased content words of a sentence, as a set.
///
/// Stop words and tokens of two characters or fewer are dropped. Duplicates
/// collapse because the similarity computation works on sets; document
/// frequency is counted separately by the graph builder, once per sentence
/// a word appears in.
pub fn tokenize(sentence: &str) -> HashSet<String> {
    let lowered = sentence.to_lowercase();
    lowered
        .unicode_words()
        .filter(|w| w.chars().count() > 2)
        .filter(|w| !is_stop_word(w))
        .map(|w| w.to_string())
        .collect()
}

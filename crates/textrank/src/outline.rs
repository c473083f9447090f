use lesson::{Lesson, Topic, TopicOutline};
use regex::Regex;
use segment::is_stop_word;

const MAX_CONCEPTS_PER_TOPIC: usize = 5;

/// Build a topic outline: one topic per content section, each with up to
/// five extracted concept terms.
pub fn generate_topic_outline(lesson: &Lesson) -> TopicOutline {
    let topics = lesson
        .content
        .sections
        .iter()
        .map(|section| Topic {
            name: section.title.clone(),
            key_concepts: extract_concepts(&section.content),
        })
        .collect();

    TopicOutline {
        title: lesson.title.clone(),
        topics,
    }
}

/// Concept terms from section text: markdown-bold spans first, then
/// Title-Case phrases. First-seen order, deduplicated, stop words and terms
/// of two characters or fewer excluded.
fn extract_concepts(text: &str) -> Vec<String> {
    let patterns = [
        Regex::new(r"\*\*([^*]+)\*\*").unwrap(),
        Regex::new(r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap(),
    ];

    let mut concepts: Vec<String> = Vec::new();
    for pattern in &patterns {
        for caps in pattern.captures_iter(text) {
            let term = caps[1].trim().to_string();
            if term.chars().count() > 2
                && !is_stop_word(&term.to_lowercase())
                && !concepts.contains(&term)
            {
                concepts.push(term);
            }
        }
    }

    concepts.truncate(MAX_CONCEPTS_PER_TOPIC);
    concepts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson_with_section(content: &str) -> Lesson {
        serde_json::from_str(&format!(
            r#"{{
                "id": "l1",
                "title": "Motion",
                "content": {{"sections": [{{"title": "Forces", "type": "text", "content": {}}}]}}
            }}"#,
            serde_json::to_string(content).unwrap()
        ))
        .unwrap()
    }

    #[test]
    fn bold_terms_come_before_title_case_phrases() {
        let lesson = lesson_with_section(
            "A **net force** changes motion. Newton described this in his Second Law of motion.",
        );
        let outline = generate_topic_outline(&lesson);

        assert_eq!(outline.title, "Motion");
        assert_eq!(outline.topics.len(), 1);
        assert_eq!(outline.topics[0].name, "Forces");

        let concepts = &outline.topics[0].key_concepts;
        assert_eq!(concepts[0], "net force");
        assert!(concepts.iter().any(|c| c == "Newton"));
        assert!(concepts.iter().any(|c| c == "Second Law"));
    }

    #[test]
    fn concepts_are_deduplicated_and_capped_at_five() {
        let lesson = lesson_with_section(
            "**Energy** and **Energy** again. Kinetic Energy, Potential Energy, \
             Thermal Energy, Chemical Energy, Nuclear Energy, Elastic Energy.",
        );
        let outline = generate_topic_outline(&lesson);

        let concepts = &outline.topics[0].key_concepts;
        assert!(concepts.len() <= 5);
        let unique: std::collections::HashSet<&String> = concepts.iter().collect();
        assert_eq!(unique.len(), concepts.len());
    }

    #[test]
    fn stop_words_and_short_terms_are_excluded() {
        let lesson = lesson_with_section("**The** quick **ox** pulls. All of it moves.");
        let outline = generate_topic_outline(&lesson);

        let concepts = &outline.topics[0].key_concepts;
        assert!(!concepts.iter().any(|c| c == "The"));
        assert!(!concepts.iter().any(|c| c == "ox"));
        assert!(!concepts.iter().any(|c| c == "All"));
    }

    #[test]
    fn lesson_without_sections_outlines_to_empty_topics() {
        let lesson: Lesson = serde_json::from_str(r#"{"id": "l1", "title": "Empty"}"#).unwrap();
        let outline = generate_topic_outline(&lesson);
        assert_eq!(outline.title, "Empty");
        assert!(outline.topics.is_empty());
    }
}

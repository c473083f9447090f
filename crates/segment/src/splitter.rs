use regex::Regex;

/// Split raw text into sentences.
///
/// Decimal numbers ("3.14") and a fixed set of abbreviations ("Dr.", "e.g.")
/// are protected with sentinels before splitting so their dots are not
/// treated as sentence terminators. Text with no terminator at all comes
/// back as a single trimmed sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let decimal = Regex::new(r"(\d+)\.\s*(\d+)").unwrap();
    let abbrev = Regex::new(r"(Mr|Mrs|Dr|Prof|vs|etc|e\.g|i\.e)\.").unwrap();
    let terminator = Regex::new(r"[.!?]+").unwrap();

    let protected = decimal.replace_all(text, "${1}<DOT>${2}");
    let protected = abbrev.replace_all(&protected, "${1}<ABBR>");

    terminator
        .split(&protected)
        .map(|s| s.replace("<DOT>", ".").replace("<ABBR>", ".").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminators() {
        let sentences = split_sentences("First sentence. Second one! A question? Done.");
        assert_eq!(
            sentences,
            vec!["First sentence", "Second one", "A question", "Done"]
        );
    }

    #[test]
    fn decimal_and_abbreviation_dots_do_not_terminate() {
        let sentences = split_sentences("The ratio is 3.14 and Dr. Smith agrees.");
        assert_eq!(sentences, vec!["The ratio is 3.14 and Dr. Smith agrees"]);
    }

    #[test]
    fn no_terminator_yields_whole_input() {
        let sentences = split_sentences("  a fragment without an ending  ");
        assert_eq!(sentences, vec!["a fragment without an ending"]);
    }

    #[test]
    fn runs_of_terminators_collapse() {
        let sentences = split_sentences("Wait... really?! Yes.");
        assert_eq!(sentences, vec!["Wait", "really", "Yes"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }
}

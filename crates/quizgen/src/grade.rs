use lesson::Question;

/// Grade an MCQ selection against the stored correct index.
///
/// The stored explanation is returned when present; otherwise one is
/// synthesized from the correct option.
pub fn grade_mcq(question: &Question, selected_index: usize) -> (bool, String) {
    let correct = question.correct.unwrap_or(0);
    let is_correct = selected_index == correct;

    let explanation = if question.explanation.is_empty() {
        let option = question.options.get(correct).cloned().unwrap_or_default();
        format!("The correct answer is: {option}")
    } else {
        question.explanation.clone()
    };

    (is_correct, explanation)
}

/// Grade a fill-in-the-blank answer: case-insensitive, whitespace-trimmed
/// exact match.
pub fn grade_fill_blank(question: &Question, answer: &str) -> (bool, String) {
    let correct = question.answer.as_deref().unwrap_or("");
    let is_correct = answer.trim().to_lowercase() == correct.trim().to_lowercase();

    (is_correct, format!("The correct answer is: {correct}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson::QuestionKind;

    fn mcq() -> Question {
        Question {
            question: "Pick one".to_string(),
            kind: QuestionKind::Mcq,
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct: Some(2),
            answer: None,
            explanation: String::new(),
            hint: None,
            generated: false,
        }
    }

    #[test]
    fn correct_selection_passes() {
        let (ok, explanation) = grade_mcq(&mcq(), 2);
        assert!(ok);
        assert_eq!(explanation, "The correct answer is: C");
    }

    #[test]
    fn wrong_selection_fails_with_same_explanation() {
        let (ok, explanation) = grade_mcq(&mcq(), 1);
        assert!(!ok);
        assert_eq!(explanation, "The correct answer is: C");
    }

    #[test]
    fn stored_explanation_wins_over_synthesized() {
        let mut question = mcq();
        question.explanation = "C is right because reasons.".to_string();
        let (_, explanation) = grade_mcq(&question, 0);
        assert_eq!(explanation, "C is right because reasons.");
    }

    #[test]
    fn missing_correct_index_defaults_to_zero() {
        let mut question = mcq();
        question.correct = None;
        let (ok, _) = grade_mcq(&question, 0);
        assert!(ok);
    }

    #[test]
    fn fill_blank_ignores_case_and_whitespace() {
        let question = Question {
            question: "_____ is speed with direction".to_string(),
            kind: QuestionKind::FillBlank,
            options: Vec::new(),
            correct: None,
            answer: Some("Velocity".to_string()),
            explanation: String::new(),
            hint: None,
            generated: true,
        };

        let (ok, explanation) = grade_fill_blank(&question, " velocity ");
        assert!(ok);
        assert_eq!(explanation, "The correct answer is: Velocity");

        let (ok, _) = grade_fill_blank(&question, "speed");
        assert!(!ok);
    }

    #[test]
    fn fill_blank_without_stored_answer_rejects_everything_but_empty() {
        let question = Question {
            question: "_____".to_string(),
            kind: QuestionKind::FillBlank,
            options: Vec::new(),
            correct: None,
            answer: None,
            explanation: String::new(),
            hint: None,
            generated: true,
        };

        let (ok, _) = grade_fill_blank(&question, "anything");
        assert!(!ok);
        let (ok, _) = grade_fill_blank(&question, "   ");
        assert!(ok);
    }
}

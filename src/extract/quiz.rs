//! Quiz extraction and shape validation.

use serde_json::Value;
use tracing::warn;

use super::{extract_json, ExtractionError, JsonShape};
use crate::quiz::QuizQuestion;

// == Quiz Extraction ==
/// Questions recovered from model output.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizExtraction {
    pub questions: Vec<QuizQuestion>,
    /// Questions whose answer was not among the options and was reset to
    /// the first option
    pub corrections: usize,
}

/// Extracts and validates a quiz from raw model text.
///
/// Every element must carry a non-empty `question`, a non-empty `options`
/// array of strings and a non-empty `correctAnswer` string, otherwise the
/// whole batch is rejected. An answer missing from the options is repaired
/// by substituting the first option.
pub fn extract_quiz(raw: &str) -> Result<QuizExtraction, ExtractionError> {
    let value = extract_json(raw, JsonShape::Array)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ExtractionError::invalid_shape("Expected array of questions", raw)),
    };

    if items.is_empty() {
        return Err(ExtractionError::invalid_shape("Quiz contains no questions", raw));
    }

    let mut questions = Vec::with_capacity(items.len());
    let mut corrections = 0;

    for (index, item) in items.iter().enumerate() {
        let mut question = parse_question(item).ok_or_else(|| {
            ExtractionError::invalid_shape(
                format!("Question at index {} has invalid structure", index),
                raw,
            )
        })?;

        if !question.options.contains(&question.correct_answer) {
            warn!(
                question = index + 1,
                answer = %question.correct_answer,
                "correct answer not among options, using first option"
            );
            question.correct_answer = question.options[0].clone();
            corrections += 1;
        }

        questions.push(question);
    }

    Ok(QuizExtraction {
        questions,
        corrections,
    })
}

fn parse_question(item: &Value) -> Option<QuizQuestion> {
    let question = non_empty_str(item.get("question")?)?;
    let correct_answer = non_empty_str(item.get("correctAnswer")?)?;
    let options = item
        .get("options")?
        .as_array()?
        .iter()
        .map(|option| option.as_str().map(str::to_string))
        .collect::<Option<Vec<String>>>()?;

    if options.is_empty() {
        return None;
    }

    Some(QuizQuestion {
        question,
        options,
        correct_answer,
    })
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prose_prefixed_single_question() {
        let raw = r#"Sure! [{"question":"2+2?","options":["3","4","5","6"],"correctAnswer":"4"}]"#;

        let quiz = extract_quiz(raw).unwrap();

        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].question, "2+2?");
        assert_eq!(quiz.questions[0].correct_answer, "4");
        assert_eq!(quiz.corrections, 0);
    }

    #[test]
    fn test_answer_not_in_options_is_corrected() {
        let raw = r#"[{"question":"Pick one","options":["1","2","3","4"],"correctAnswer":"5"}]"#;

        let quiz = extract_quiz(raw).unwrap();

        assert_eq!(quiz.questions[0].correct_answer, "1");
        assert_eq!(quiz.corrections, 1);
    }

    #[test]
    fn test_missing_question_text_rejects_batch() {
        let raw = r#"[
            {"question":"ok?","options":["a","b"],"correctAnswer":"a"},
            {"question":"","options":["a","b"],"correctAnswer":"a"}
        ]"#;

        let err = extract_quiz(raw).unwrap_err();

        assert_eq!(err.to_string(), "Question at index 1 has invalid structure");
    }

    #[test]
    fn test_missing_options_rejects_batch() {
        let raw = r#"[{"question":"q?","correctAnswer":"a"}]"#;
        assert!(matches!(extract_quiz(raw), Err(ExtractionError::InvalidShape { .. })));
    }

    #[test]
    fn test_empty_options_rejects_batch() {
        let raw = r#"[{"question":"q?","options":[],"correctAnswer":"a"}]"#;
        assert!(extract_quiz(raw).is_err());
    }

    #[test]
    fn test_non_string_option_rejects_batch() {
        let raw = r#"[{"question":"q?","options":[1,2,3,4],"correctAnswer":"1"}]"#;
        assert!(extract_quiz(raw).is_err());
    }

    #[test]
    fn test_missing_correct_answer_rejects_batch() {
        let raw = r#"[{"question":"q?","options":["a","b"]}]"#;
        assert!(extract_quiz(raw).is_err());
    }

    #[test]
    fn test_empty_array_rejected() {
        let err = extract_quiz("[]").unwrap_err();
        assert_eq!(err.to_string(), "Quiz contains no questions");
    }

    #[test]
    fn test_no_json_surfaces_sample() {
        let err = extract_quiz("Sorry, I can't make a quiz about that.").unwrap_err();
        assert!(matches!(err, ExtractionError::NoJson { .. }));
        assert!(err.sample().starts_with("Sorry"));
    }

    #[test]
    fn test_five_question_quiz_from_code_fence() {
        let body: Vec<String> = (1..=5)
            .map(|i| {
                format!(
                    r#"{{"question":"Q{i}?","options":["a{i}","b{i}","c{i}","d{i}"],"correctAnswer":"b{i}"}}"#,
                    i = i
                )
            })
            .collect();
        let raw = format!("```json\n[{}]\n```", body.join(","));

        let quiz = extract_quiz(&raw).unwrap();

        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(quiz.questions[4].correct_answer, "b5");
    }
}

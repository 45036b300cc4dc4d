//! Quiz Module
//!
//! Quiz question type and the deterministic answer scorer.

use serde::{Deserialize, Serialize};

// == Quiz Question ==
/// A multiple-choice question.
///
/// When produced by the extractor, `correct_answer` is always one of
/// `options`. Questions echoed back by a client for scoring may omit the
/// text and options; only `correct_answer` matters there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
}

pub type Quiz = Vec<QuizQuestion>;

// == Score ==
/// Counts positions where the submitted answer equals the question's
/// correct answer.
///
/// Only the first `min(answers, questions)` positions are compared; extra
/// entries on either side are ignored. Unanswered positions (`None`) never
/// match. Comparison is exact string equality.
pub fn score(user_answers: &[Option<String>], quiz: &[QuizQuestion]) -> usize {
    user_answers
        .iter()
        .zip(quiz)
        .filter(|(answer, question)| answer.as_deref() == Some(question.correct_answer.as_str()))
        .count()
}

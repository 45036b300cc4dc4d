//! Request DTOs
//!
//! Every field is optional at the serde level so that a missing field is
//! reported as a validation error rather than a deserialization failure.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::quiz::QuizQuestion;
use crate::timetable::{parse_clock_time, TimetableParams};

/// Request body for POST /api/chatbot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// The user's question
    #[serde(default)]
    pub prompt: Option<String>,
    /// Subject category selecting the answer style
    #[serde(default)]
    pub category: Option<String>,
}

impl ChatRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if is_blank(&self.prompt) {
            return Some("Prompt is required".to_string());
        }
        None
    }
}

/// Request body for POST /api/quiz/generate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl QuizRequest {
    pub fn validate(&self) -> Option<String> {
        if is_blank(&self.topic) || is_blank(&self.difficulty) {
            return Some("Topic and difficulty are required".to_string());
        }
        None
    }
}

/// Request body for POST /api/quiz/evaluate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    /// Submitted answers in question order; anything but a string is unanswered
    #[serde(default)]
    pub user_answers: Option<Vec<Value>>,
    /// The quiz being answered, as previously returned by /generate
    #[serde(default)]
    pub quiz: Option<Vec<QuizQuestion>>,
}

/// Request body for POST /api/timetable/generate
///
/// Numeric fields accept either JSON numbers or numeric strings, since the
/// dashboard form posts raw input values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRequest {
    #[serde(default)]
    pub study_hours: Option<Value>,
    #[serde(default)]
    pub break_time: Option<Value>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub days_of_week: Option<Vec<String>>,
}

impl TimetableRequest {
    /// Validates the request and converts it into generation parameters.
    pub fn into_params(self) -> Result<TimetableParams> {
        let missing = || ApiError::Validation("Missing required fields".to_string());

        let study_hours = self.study_hours.as_ref().ok_or_else(missing)?;
        let study_hours = as_number(study_hours)
            .filter(|hours| *hours > 0.0)
            .ok_or_else(|| invalid("studyHours must be a positive number"))?;

        let break_minutes = match &self.break_time {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                as_number(value)
                    .filter(|minutes| {
                        (0.0..=f64::from(u32::MAX)).contains(minutes) && minutes.fract() == 0.0
                    })
                    .map(|minutes| minutes as u32)
                    .ok_or_else(|| invalid("breakTime must be a whole number of minutes"))?,
            ),
        };

        let subjects = non_empty_list(self.subjects).ok_or_else(missing)?;
        let days = non_empty_list(self.days_of_week).ok_or_else(missing)?;
        let start_time = self.start_time.filter(|s| !s.trim().is_empty()).ok_or_else(missing)?;
        let end_time = self.end_time.filter(|s| !s.trim().is_empty()).ok_or_else(missing)?;

        if parse_clock_time(&start_time).is_none() {
            return Err(invalid("startTime must be in HH:MM format"));
        }
        if parse_clock_time(&end_time).is_none() {
            return Err(invalid("endTime must be in HH:MM format"));
        }

        Ok(TimetableParams {
            study_hours,
            break_minutes,
            subjects,
            start_time,
            end_time,
            days,
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn invalid(message: &str) -> ApiError {
    ApiError::Validation(message.to_string())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    let values: Vec<String> = values?
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn timetable_request(body: Value) -> TimetableRequest {
        serde_json::from_value(body).unwrap()
    }

    fn full_timetable_body() -> Value {
        json!({
            "studyHours": 4,
            "breakTime": "15",
            "subjects": ["Mathematics", "Physics"],
            "startTime": "09:00",
            "endTime": "17:00",
            "daysOfWeek": ["Monday", "Tuesday"]
        })
    }

    #[test]
    fn test_chat_request_deserialize() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"prompt": "Explain gravity", "category": "Science"}"#).unwrap();
        assert_eq!(req.prompt.as_deref(), Some("Explain gravity"));
        assert_eq!(req.category.as_deref(), Some("Science"));
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_chat_request_empty_prompt() {
        let req: ChatRequest = serde_json::from_str(r#"{"prompt": "", "category": "Math"}"#).unwrap();
        assert_eq!(req.validate(), Some("Prompt is required".to_string()));
    }

    #[test]
    fn test_chat_request_missing_prompt() {
        let req: ChatRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_quiz_request_requires_both_fields() {
        let req: QuizRequest = serde_json::from_str(r#"{"topic": "Rust"}"#).unwrap();
        assert_eq!(req.validate(), Some("Topic and difficulty are required".to_string()));

        let req: QuizRequest =
            serde_json::from_str(r#"{"topic": "Rust", "difficulty": "easy"}"#).unwrap();
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_evaluate_request_with_nulls() {
        let req: EvaluateRequest = serde_json::from_str(
            r#"{"userAnswers": ["4", null], "quiz": [{"correctAnswer": "4"}, {"correctAnswer": "5"}]}"#,
        )
        .unwrap();
        assert_eq!(req.user_answers.unwrap(), vec![json!("4"), Value::Null]);
        assert_eq!(req.quiz.unwrap().len(), 2);
    }

    #[test]
    fn test_evaluate_request_accepts_mixed_answers() {
        let req: EvaluateRequest = serde_json::from_str(
            r#"{"userAnswers": [4, true, {"a": 1}, "B"], "quiz": []}"#,
        )
        .unwrap();
        assert_eq!(req.user_answers.map(|answers| answers.len()), Some(4));
    }

    #[test]
    fn test_timetable_into_params() {
        let params = timetable_request(full_timetable_body()).into_params().unwrap();

        assert_eq!(params.study_hours, 4.0);
        assert_eq!(params.break_minutes, Some(15));
        assert_eq!(params.subjects, vec!["Mathematics", "Physics"]);
        assert_eq!(params.days, vec!["Monday", "Tuesday"]);
    }

    #[test]
    fn test_timetable_missing_fields() {
        let mut body = full_timetable_body();
        body.as_object_mut().unwrap().remove("daysOfWeek");

        let err = timetable_request(body).into_params().unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields");
    }

    #[test]
    fn test_timetable_break_time_optional() {
        let mut body = full_timetable_body();
        body.as_object_mut().unwrap().remove("breakTime");

        let params = timetable_request(body).into_params().unwrap();
        assert_eq!(params.break_minutes, None);
    }

    #[test]
    fn test_timetable_rejects_bad_start_time() {
        let mut body = full_timetable_body();
        body["startTime"] = json!("9am");

        let err = timetable_request(body).into_params().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_timetable_rejects_out_of_range_break() {
        for break_time in [json!(1e12), json!(-5), json!(12.5)] {
            let mut body = full_timetable_body();
            body["breakTime"] = break_time;

            let err = timetable_request(body).into_params().unwrap_err();
            assert_eq!(err.to_string(), "breakTime must be a whole number of minutes");
        }
    }

    #[test]
    fn test_timetable_accepts_largest_break() {
        let mut body = full_timetable_body();
        body["breakTime"] = json!(u32::MAX);

        let params = timetable_request(body).into_params().unwrap();
        assert_eq!(params.break_minutes, Some(u32::MAX));
    }

    #[test]
    fn test_timetable_rejects_non_positive_hours() {
        let mut body = full_timetable_body();
        body["studyHours"] = json!(0);

        assert!(timetable_request(body).into_params().is_err());
    }
}

//! Response DTOs
//!
//! Bodies returned to the dashboard frontend.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::quiz::QuizQuestion;
use crate::timetable::Timetable;

/// Response body for POST /api/chatbot
///
/// `error` is present only when `response` is the canned fallback.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn answer(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            error: None,
        }
    }

    pub fn fallback(response: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            error: Some(error.into()),
        }
    }
}

/// Response body for POST /api/quiz/generate
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub quiz: Vec<QuizQuestion>,
}

impl QuizResponse {
    pub fn new(quiz: Vec<QuizQuestion>) -> Self {
        Self {
            success: true,
            quiz,
        }
    }
}

/// Response body for POST /api/quiz/evaluate
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateResponse {
    pub success: bool,
    pub score: usize,
}

impl EvaluateResponse {
    pub fn new(score: usize) -> Self {
        Self {
            success: true,
            score,
        }
    }
}

/// Response body for POST /api/timetable/generate
///
/// A fallback timetable is flagged with `generationError`, the cause in
/// `error`, and a bounded sample of the model output in `rawResponse` when
/// the model did answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableResponse {
    pub timetable: Timetable,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub generation_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl TimetableResponse {
    pub fn generated(timetable: Timetable) -> Self {
        Self {
            timetable,
            generation_error: false,
            error: None,
            raw_response: None,
        }
    }

    pub fn fallback(timetable: Timetable, error: impl Into<String>, raw: Option<String>) -> Self {
        Self {
            timetable,
            generation_error: true,
            error: Some(error.into()),
            raw_response: raw,
        }
    }
}

/// Response body for GET /api/cache/stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Name of the configured language model
    pub model: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(model: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            model: model.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body for every non-success status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Short, user-facing summary
    pub message: String,
    /// Underlying cause
    pub error: String,
    /// Bounded sample of unusable model output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: error.into(),
            raw_response: None,
        }
    }

    pub fn with_raw_response(mut self, raw: impl Into<String>) -> Self {
        self.raw_response = Some(raw.into());
        self
    }
}

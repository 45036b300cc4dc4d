//! Request and Response models for the HTTP API
//!
//! DTOs for the JSON bodies exchanged with the dashboard frontend. Field
//! names on the wire are camelCase.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ChatRequest, EvaluateRequest, QuizRequest, TimetableRequest};
pub use responses::{
    ChatResponse, ErrorResponse, EvaluateResponse, HealthResponse, QuizResponse, StatsResponse,
    TimetableResponse,
};

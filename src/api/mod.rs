//! API Module
//!
//! HTTP handlers and routing for the study assistant REST API.
//!
//! # Endpoints
//! - `POST /api/chatbot` - Category-aware chat answer
//! - `POST /api/quiz/generate` - Generate a multiple-choice quiz
//! - `POST /api/quiz/evaluate` - Score submitted answers
//! - `POST /api/timetable/generate` - Generate a weekly study timetable
//! - `GET /api/cache/stats` - Response cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

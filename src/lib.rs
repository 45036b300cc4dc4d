//! Study Assist - AI backend for a student dashboard
//!
//! Chat answers, quiz generation and weekly timetables from a generative
//! language model, with a bounded FIFO response cache, timeout-raced model
//! calls and layered extraction of JSON from free-form model output.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod models;
pub mod prompt;
pub mod quiz;
pub mod timetable;

pub use api::AppState;
pub use config::Config;

//! Configuration Module
//!
//! Loads server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::gateway::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of cached model responses
    pub cache_capacity: usize,
    /// Time budget for a chat answer, in milliseconds
    pub chat_timeout_ms: u64,
    /// Time budget for quiz generation, in milliseconds
    pub quiz_timeout_ms: u64,
    /// Time budget for timetable generation, in milliseconds
    pub timetable_timeout_ms: u64,
    /// Gemini model name
    pub model: String,
    /// Base URL of the Gemini REST API
    pub api_url: String,
    /// Gemini API key; calls fail fast without one
    pub api_key: Option<String>,
    /// Origin allowed by CORS
    pub frontend_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5001)
    /// - `CACHE_CAPACITY` - Cached responses kept (default: 100)
    /// - `CHAT_TIMEOUT_MS` - Chat time budget (default: 7000)
    /// - `QUIZ_TIMEOUT_MS` - Quiz time budget (default: 8000)
    /// - `TIMETABLE_TIMEOUT_MS` - Timetable time budget (default: 8000)
    /// - `GEMINI_MODEL` - Model name (default: gemini-1.5-flash)
    /// - `GEMINI_API_URL` - API base URL
    /// - `GOOGLE_API_KEY` - API key (no default)
    /// - `FRONTEND_URL` - CORS origin (default: http://localhost:5173)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            chat_timeout_ms: parse_var("CHAT_TIMEOUT_MS").unwrap_or(defaults.chat_timeout_ms),
            quiz_timeout_ms: parse_var("QUIZ_TIMEOUT_MS").unwrap_or(defaults.quiz_timeout_ms),
            timetable_timeout_ms: parse_var("TIMETABLE_TIMEOUT_MS")
                .unwrap_or(defaults.timetable_timeout_ms),
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            api_url: env::var("GEMINI_API_URL").unwrap_or(defaults.api_url),
            api_key: env::var("GOOGLE_API_KEY").ok().filter(|key| !key.is_empty()),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
        }
    }

    /// Per-endpoint time budgets.
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            chat: Duration::from_millis(self.chat_timeout_ms),
            quiz: Duration::from_millis(self.quiz_timeout_ms),
            timetable: Duration::from_millis(self.timetable_timeout_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5001,
            cache_capacity: DEFAULT_CAPACITY,
            chat_timeout_ms: 7000,
            quiz_timeout_ms: 8000,
            timetable_timeout_ms: 8000,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

// == Timeouts ==
/// How long each endpoint waits for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub chat: Duration,
    pub quiz: Duration,
    pub timetable: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Config::default().timeouts()
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

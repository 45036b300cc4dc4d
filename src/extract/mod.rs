//! Structured Extraction Module
//!
//! Recovers JSON values from free-form model output.
//!
//! Attempts run in a fixed order and the first success wins:
//! 1. strict parse of the whole text
//! 2. bracket scan for the outermost array/object of the expected shape
//! 3. failure carrying a bounded sample of the raw text
//!
//! Shape validation for quizzes and timetables runs on top of the parsed
//! value in [`quiz`] and [`timetable`].

mod quiz;
mod scan;
mod timetable;

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub use quiz::{extract_quiz, QuizExtraction};
pub use timetable::extract_timetable;

/// Upper bound on the raw-text sample carried by an extraction failure.
pub const RAW_SAMPLE_CHARS: usize = 1000;

// == JSON Shape ==
/// Top-level JSON container the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    fn brackets(self) -> (char, char) {
        match self {
            JsonShape::Array => ('[', ']'),
            JsonShape::Object => ('{', '}'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            JsonShape::Array => value.is_array(),
            JsonShape::Object => value.is_object(),
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonShape::Array => f.write_str("array"),
            JsonShape::Object => f.write_str("object"),
        }
    }
}

// == Extraction Error ==
/// Model output that could not be turned into the expected structure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// No parseable JSON of the expected shape anywhere in the text
    #[error("Could not extract valid JSON {expected} from response")]
    NoJson { expected: JsonShape, sample: String },

    /// JSON was found but does not have the required fields
    #[error("{reason}")]
    InvalidShape { reason: String, sample: String },
}

impl ExtractionError {
    pub(crate) fn invalid_shape(reason: impl Into<String>, raw: &str) -> Self {
        ExtractionError::InvalidShape {
            reason: reason.into(),
            sample: raw_sample(raw),
        }
    }

    /// Bounded prefix of the raw model output, for diagnostics.
    pub fn sample(&self) -> &str {
        match self {
            ExtractionError::NoJson { sample, .. } => sample,
            ExtractionError::InvalidShape { sample, .. } => sample,
        }
    }
}

// == Extract JSON ==
/// Pulls a JSON value of the given shape out of raw model text.
pub fn extract_json(raw: &str, shape: JsonShape) -> Result<Value, ExtractionError> {
    let trimmed = raw.trim();

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) if shape.matches(&value) => return Ok(value),
        Ok(_) => debug!(%shape, "response parsed but has the wrong shape, scanning"),
        Err(e) => debug!(%shape, error = %e, "direct JSON parse failed, scanning"),
    }

    let (open, close) = shape.brackets();
    for candidate in scan::candidates(trimmed, open, close) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            if shape.matches(&value) {
                return Ok(value);
            }
        }
    }

    Err(ExtractionError::NoJson {
        expected: shape,
        sample: raw_sample(raw),
    })
}

/// First [`RAW_SAMPLE_CHARS`] characters of `raw`.
pub fn raw_sample(raw: &str) -> String {
    raw.chars().take(RAW_SAMPLE_CHARS).collect()
}

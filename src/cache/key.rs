//! Cache Key Module
//!
//! Deterministic fingerprints for cached model responses.

use std::fmt;

const SEPARATOR: char = ':';

// == Cache Key ==
/// Address of a cached response.
///
/// Keys are plain concatenations of a domain tag, the request descriptor and
/// the raw input text. Input text is not normalized, so `"Explain gravity"`
/// and `"explain gravity "` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a chat answer: category plus prompt.
    ///
    /// A missing category is keyed the same as an empty one.
    pub fn chat(category: Option<&str>, prompt: &str) -> Self {
        Self::compose("chat", &[category.unwrap_or_default(), prompt])
    }

    /// Key for a generated quiz: topic plus difficulty.
    pub fn quiz(topic: &str, difficulty: &str) -> Self {
        Self::compose("quiz", &[difficulty, topic])
    }

    /// Key for a generated timetable from its already-rendered parameters.
    pub fn timetable(parts: &[&str]) -> Self {
        Self::compose("timetable", parts)
    }

    fn compose(domain: &str, parts: &[&str]) -> Self {
        let mut key = String::from(domain);
        for part in parts {
            key.push(SEPARATOR);
            key.push_str(part);
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

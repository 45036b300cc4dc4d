//! Timetable Module
//!
//! Timetable data types, request parameters and the deterministic fallback
//! schedule used when the model output cannot be used.

mod fallback;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub use fallback::{
    fallback_timetable, FALLBACK_ACTIVITY, FALLBACK_DESCRIPTION, FALLBACK_DURATION_MINUTES,
};

/// Wire format for slot times.
pub const TIME_FORMAT: &str = "%H:%M";

// == Timetable Slot ==
/// One block of a day's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"
    pub end_time: String,
    pub activity: String,
    #[serde(default)]
    pub is_break: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<TimetableSlot> for Value {
    fn from(slot: TimetableSlot) -> Self {
        let mut value = json!({
            "startTime": slot.start_time,
            "endTime": slot.end_time,
            "activity": slot.activity,
            "isBreak": slot.is_break,
        });
        if let (Some(description), Value::Object(fields)) = (slot.description, &mut value) {
            fields.insert("description".to_string(), Value::String(description));
        }
        value
    }
}

/// Day name to that day's slots, keeping the order the days arrived in.
///
/// Model output is kept exactly as parsed; only the fallback builder
/// constructs slots itself.
pub type Timetable = Map<String, Value>;

// == Timetable Params ==
/// Validated inputs for one timetable generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableParams {
    pub study_hours: f64,
    pub break_minutes: Option<u32>,
    pub subjects: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub days: Vec<String>,
}

impl TimetableParams {
    /// Cache fingerprint components, in a fixed order.
    pub fn fingerprint_parts(&self) -> Vec<String> {
        vec![
            self.study_hours.to_string(),
            self.break_minutes
                .map(|minutes| minutes.to_string())
                .unwrap_or_default(),
            self.subjects.join(","),
            self.start_time.clone(),
            self.end_time.clone(),
            self.days.join(","),
        ]
    }
}

// == Time Parsing ==
/// Parses an "HH:MM" clock time.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).ok()
}

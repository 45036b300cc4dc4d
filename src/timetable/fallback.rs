//! Fallback Timetable Builder
//!
//! Produces a minimal, always-renderable schedule when generation fails.

use chrono::{Duration, NaiveTime};
use serde_json::Value;

use super::{Timetable, TimetableSlot, TIME_FORMAT};

pub const FALLBACK_DURATION_MINUTES: i64 = 60;
pub const FALLBACK_ACTIVITY: &str = "Study Session (AI generation failed)";
pub const FALLBACK_DESCRIPTION: &str =
    "Please try generating again. The AI response was not in valid format.";

// == Fallback Timetable ==
/// Builds one 60-minute study slot per requested day, starting at `start`.
///
/// Days keep the requested order. The end time wraps past midnight.
/// Repeated day names collapse into a single key at their first position.
pub fn fallback_timetable(days: &[String], start: NaiveTime) -> Timetable {
    let (end, _) = start.overflowing_add_signed(Duration::minutes(FALLBACK_DURATION_MINUTES));
    let start_time = start.format(TIME_FORMAT).to_string();
    let end_time = end.format(TIME_FORMAT).to_string();

    days.iter()
        .map(|day| {
            let slot = TimetableSlot {
                start_time: start_time.clone(),
                end_time: end_time.clone(),
                activity: FALLBACK_ACTIVITY.to_string(),
                is_break: false,
                description: Some(FALLBACK_DESCRIPTION.to_string()),
            };
            (day.clone(), Value::Array(vec![slot.into()]))
        })
        .collect()
}

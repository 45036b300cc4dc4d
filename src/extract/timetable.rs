//! Timetable extraction.

use serde_json::Value;

use super::{extract_json, ExtractionError, JsonShape};
use crate::timetable::Timetable;

/// Extracts a day-to-slots timetable from raw model text.
///
/// Only the object container is required. Its contents are returned as
/// parsed, in the model's key order; slot fields, stray keys and the set of
/// days are not checked.
pub fn extract_timetable(raw: &str) -> Result<Timetable, ExtractionError> {
    match extract_json(raw, JsonShape::Object)? {
        Value::Object(timetable) => Ok(timetable),
        _ => Err(ExtractionError::invalid_shape(
            "Timetable has invalid structure: expected an object",
            raw,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_wrapped_timetable() {
        let raw = r#"Here is your schedule:
{
  "Monday": [
    {"startTime": "09:00", "endTime": "10:30", "activity": "Mathematics", "isBreak": false},
    {"startTime": "10:30", "endTime": "10:45", "activity": "Break", "isBreak": true}
  ],
  "Tuesday": [
    {"startTime": "09:00", "endTime": "11:00", "activity": "Physics", "isBreak": false}
  ]
}
Good luck!"#;

        let timetable = extract_timetable(raw).unwrap();

        assert_eq!(timetable.len(), 2);
        assert_eq!(timetable["Monday"].as_array().map(Vec::len), Some(2));
        assert_eq!(timetable["Monday"][1]["isBreak"], true);
        assert_eq!(timetable["Tuesday"][0]["activity"], "Physics");
    }

    #[test]
    fn test_extra_keys_and_loose_slots_are_kept() {
        let raw = r#"{
  "Monday": [
    {"startTime": "09:00", "endTime": "10:00", "activity": "Mathematics", "isBreak": "true"},
    {"activity": "Reading"}
  ],
  "note": "Stay hydrated"
}"#;

        let timetable = extract_timetable(raw).unwrap();

        assert_eq!(timetable["note"], "Stay hydrated");
        assert_eq!(timetable["Monday"][0]["isBreak"], "true");
        assert_eq!(timetable["Monday"][1]["activity"], "Reading");
    }

    #[test]
    fn test_keeps_model_day_order() {
        let raw = r#"{"Wednesday": [], "Friday": [], "Monday": []}"#;

        let timetable = extract_timetable(raw).unwrap();

        let order: Vec<&str> = timetable.keys().map(String::as_str).collect();
        assert_eq!(order, ["Wednesday", "Friday", "Monday"]);
    }

    #[test]
    fn test_prose_only_fails() {
        assert!(matches!(
            extract_timetable("I could not build a timetable."),
            Err(ExtractionError::NoJson { .. })
        ));
    }
}

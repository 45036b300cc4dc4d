//! Prompt Builder Module
//!
//! Pure functions that turn user input into the instruction text sent to the
//! language model. Input is embedded verbatim.

use crate::timetable::TimetableParams;

// == Chat Category ==
/// Subject areas with their own chat phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCategory {
    Mathematics,
    Science,
    History,
    Programming,
    General,
}

impl ChatCategory {
    /// Maps a category label to its phrasing. Unknown, empty or missing
    /// labels fall back to `General`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Mathematics") => Self::Mathematics,
            Some("Science") => Self::Science,
            Some("History") => Self::History,
            Some("Programming") => Self::Programming,
            _ => Self::General,
        }
    }
}

// == Chat ==
/// Builds the chat instruction for a question in the given category.
pub fn chat_prompt(input: &str, category: Option<&str>) -> String {
    match ChatCategory::from_label(category) {
        ChatCategory::Mathematics => format!(
            "Explain {} in simple terms with examples. Keep your answer concise.",
            input
        ),
        ChatCategory::Science => format!(
            "Provide a clear explanation about {} with practical applications. Keep your answer concise.",
            input
        ),
        ChatCategory::History => format!(
            "Describe {} with key historical details and significance. Keep your answer concise.",
            input
        ),
        ChatCategory::Programming => format!(
            "Explain {} in a way that helps a beginner understand it, with a brief example. Keep your answer concise.",
            input
        ),
        ChatCategory::General => format!("Provide a concise explanation on {}.", input),
    }
}

// == Quiz ==
/// Number of questions requested per quiz.
pub const QUIZ_QUESTION_COUNT: usize = 5;

/// Builds the quiz-generation instruction. The model is asked for a bare
/// JSON array of `{question, options, correctAnswer}` objects.
pub fn quiz_prompt(topic: &str, difficulty: &str) -> String {
    format!(
        r#"Generate a {difficulty} level quiz on {topic}.
Provide {count} multiple-choice questions with 4 options each, and indicate the correct answer.
Format your response as a clean JSON array with the following structure:
[
  {{
    "question": "Question text here?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correctAnswer": "Option that is correct"
  }}
]
Only return the JSON array and nothing else. No extra text, markdown formatting, code blocks, or explanations."#,
        difficulty = difficulty,
        topic = topic,
        count = QUIZ_QUESTION_COUNT,
    )
}

// == Timetable ==
/// Builds the weekly-timetable instruction, including the exact JSON object
/// layout the response must follow.
pub fn timetable_prompt(params: &TimetableParams) -> String {
    let break_line = match params.break_minutes {
        Some(minutes) => format!("{} minutes", minutes),
        None => "choose a sensible length".to_string(),
    };

    format!(
        r#"Generate a detailed weekly study timetable with the following parameters:
- Total study hours per day: {hours} hours
- Break time between sessions: {breaks}
- Subjects to study: {subjects}
- Study time starts at: {start} and ends at: {end}
- Days of the week: {days}

Format the response STRICTLY as a valid JSON object with this exact structure:
{{
  "Monday": [
    {{"startTime": "09:00", "endTime": "10:30", "activity": "Mathematics", "isBreak": false}},
    {{"startTime": "10:30", "endTime": "10:45", "activity": "Break", "isBreak": true}},
    ...and so on
  ],
  "Tuesday": [...],
  ...other days
}}

IMPORTANT: Only include the days specified in the input. Ensure all time slots are within the start and end times.
Each slot should have startTime, endTime, activity, and isBreak properties."#,
        hours = params.study_hours,
        breaks = break_line,
        subjects = params.subjects.join(", "),
        start = params.start_time,
        end = params.end_time,
        days = params.days.join(", "),
    )
}

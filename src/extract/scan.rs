//! Bracket scanning over free text.

/// Candidate JSON substrings, in the order they should be tried.
///
/// Each opening bracket, from left to right, contributes the balanced span
/// it starts (string literals are skipped so brackets inside them do not
/// count). The greedy span from the first opening bracket to the last
/// closing bracket comes last.
pub(super) fn candidates(text: &str, open: char, close: char) -> Vec<&str> {
    let mut spans: Vec<&str> = text
        .match_indices(open)
        .filter_map(|(start, _)| balanced_span(text, start, open, close))
        .collect();

    if let (Some(start), Some(end)) = (text.find(open), text.rfind(close)) {
        if start < end {
            let greedy = &text[start..end + close.len_utf8()];
            if !spans.contains(&greedy) {
                spans.push(greedy);
            }
        }
    }

    spans
}

/// The span from `start` (an opening bracket) to its matching close.
fn balanced_span(text: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..start + offset + ch.len_utf8()]);
            }
        }
    }

    None
}

//! Search-key cleanup and presence text helpers.

/// Strips parenthesized and bracketed qualifiers ("(Remix)", "[Live]") and
/// collapses whitespace so artist/track names work as metadata search keys.
pub fn clean_search_key(text: &str) -> String {
    let stripped = strip_delimited(&strip_delimited(text, '(', ')'), '[', ']');
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_delimited(text: &str, open: char, close: char) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        match rest[start..].find(close) {
            Some(offset) => {
                result.push_str(&rest[..start]);
                rest = &rest[start + offset + close.len_utf8()..];
            }
            // Unbalanced group, keep the remainder untouched.
            None => break,
        }
    }
    result.push_str(rest);
    result
}

/// The presence API rejects text fields shorter than two characters; short
/// values are prefixed with a category label instead.
pub fn pad_display_text(text: &str, label: &str) -> String {
    if text.chars().count() < 2 {
        format!("{label}: {text}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{clean_search_key, pad_display_text};

    #[test]
    fn test_strips_parenthetical_and_bracketed_groups() {
        assert_eq!(clean_search_key("Song (Remix) [Live]"), "Song");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(clean_search_key("A   B"), "A B");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let once = clean_search_key("Intro (feat. X)  [2019 Remaster]");
        assert_eq!(clean_search_key(&once), once);
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(clean_search_key(""), "");
    }

    #[test]
    fn test_unclosed_group_is_left_alone() {
        assert_eq!(clean_search_key("Song (unfinished"), "Song (unfinished");
    }

    #[test]
    fn test_pads_short_display_text() {
        assert_eq!(pad_display_text("X", "Track"), "Track: X");
        assert_eq!(pad_display_text("", "Album"), "Album: ");
    }

    #[test]
    fn test_leaves_long_display_text_alone() {
        assert_eq!(pad_display_text("OK", "Track"), "OK");
    }
}

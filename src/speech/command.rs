//! Transcript matching helpers.

/// True when any keyword occurs as a substring of the transcript.
/// Matching is case-insensitive and deliberately loose; speech recognizers
/// pad commands with filler words.
pub fn match_command(text: &str, keywords: &[&str]) -> bool {
    if text.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()))
}

/// Reassemble an email address from a spoken transcript.
///
/// Users dictate "jane at gmail dot com". Common misrecognitions are cleaned
/// up first, then "at"/"dot" become `@`/`.` and remaining spaces collapse.
pub fn normalize_spoken_email(heard: &str) -> String {
    let cleaned = heard
        .to_lowercase()
        .replace(" at sign ", " at ")
        .replace(" dott ", " dot ")
        .replace(" comma ", " dot ")
        .replace(" dash ", "-")
        .replace(" underscore ", "_")
        .replace(" space ", "");
    cleaned
        .replace(" at ", "@")
        .replace(" dot ", ".")
        .replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_any_keyword_substring() {
        assert!(match_command("please analyze video now", &["analyze video"]));
        assert!(match_command("ANALYSE VIDEO", &["analyze video", "analyse video"]));
        assert!(!match_command("pause", &["analyze video", "logout"]));
        assert!(!match_command("", &["logout"]));
    }

    #[test]
    fn spoken_email_reassembles() {
        assert_eq!(
            normalize_spoken_email("jane at gmail dot com"),
            "jane@gmail.com"
        );
        assert_eq!(
            normalize_spoken_email("J O H N at sign G M A I L dott C O M"),
            "john@gmail.com"
        );
        assert_eq!(
            normalize_spoken_email("jane underscore doe at mail comma org"),
            "jane_doe@mail.org"
        );
    }
}

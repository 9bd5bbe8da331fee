//! Input validation for the voice auth flow.

use std::sync::OnceLock;

use regex::Regex;

/// Passwords rejected regardless of length.
const WEAK_PASSWORDS: [&str; 6] = ["password", "123456", "qwerty", "test123", "admin", "letmein"];

pub fn validate_name(name: &str) -> bool {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    let re = NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z ]{2,}$").unwrap());
    re.is_match(name.trim())
}

pub fn validate_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());
    re.is_match(email)
}

pub fn validate_password(password: &str) -> bool {
    if password.len() < 6 {
        return false;
    }
    let lowered = password.to_lowercase();
    !WEAK_PASSWORDS.contains(&lowered.as_str())
}

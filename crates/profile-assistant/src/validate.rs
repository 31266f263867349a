use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

pub const INVALID_EMAIL: &str = "That doesn't look like a valid email. Try again?";
pub const INVALID_DATE: &str = "That doesn't look like a valid date. Use YYYY-MM-DD.";
pub const EMPTY_VALUE: &str = "That can't be empty. Try again?";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(String),
    Invalid(String),
}

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', '!', '?'];

/// Extracts the first `local@domain.tld`-shaped token; surrounding chatter
/// ("yes it's john@x.com please") is dropped, and so is sentence punctuation
/// glued to the end of the address ("it's john@x.com.").
pub fn email(raw: &str) -> ValidationResult {
    let candidate = EMAIL_RE
        .find(raw)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION))
        .filter(|candidate| EMAIL_RE.is_match(candidate));

    match candidate {
        Some(address) => ValidationResult::Valid(address.to_string()),
        None => ValidationResult::Invalid(INVALID_EMAIL.to_string()),
    }
}

/// Accepts any of the known calendar layouts but keeps the user's spelling.
pub fn birthday(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    let parses = DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(trimmed, format).is_ok());

    if parses {
        ValidationResult::Valid(trimmed.to_string())
    } else {
        ValidationResult::Invalid(INVALID_DATE.to_string())
    }
}

pub fn non_empty(raw: &str) -> ValidationResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        ValidationResult::Invalid(EMPTY_VALUE.to_string())
    } else {
        ValidationResult::Valid(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(value: &str) -> ValidationResult {
        ValidationResult::Valid(value.to_string())
    }

    #[test]
    fn email_extracts_embedded_address() {
        assert_eq!(email("john@example.com"), valid("john@example.com"));
        assert_eq!(email("yes it's john@x.com please"), valid("john@x.com"));
        assert_eq!(
            email("sure it's a.b@example.com thanks"),
            valid("a.b@example.com")
        );
    }

    #[test]
    fn email_drops_trailing_sentence_punctuation() {
        assert_eq!(
            email("mail: John.Doe@Example.COM."),
            valid("John.Doe@Example.COM")
        );
        assert_eq!(email("it's a@b.co, thanks!"), valid("a@b.co"));
        assert_eq!(email("really? a@b.co?!"), valid("a@b.co"));
        assert_eq!(
            email("a@b.."),
            ValidationResult::Invalid(INVALID_EMAIL.to_string())
        );
    }

    #[test]
    fn email_rejects_non_addresses() {
        for raw in ["john", "john@example", "@example.com", "john at example dot com"] {
            assert_eq!(
                email(raw),
                ValidationResult::Invalid(INVALID_EMAIL.to_string()),
                "{raw}"
            );
        }
    }

    #[test]
    fn birthday_keeps_original_spelling() {
        assert_eq!(birthday(" 1990-04-12 "), valid("1990-04-12"));
        assert_eq!(birthday("04/12/1990"), valid("04/12/1990"));
        assert_eq!(birthday("April 12, 1990"), valid("April 12, 1990"));
        assert_eq!(birthday("Apr 12, 1990"), valid("Apr 12, 1990"));
        assert_eq!(birthday("12 April 1990"), valid("12 April 1990"));
    }

    #[test]
    fn birthday_rejects_impossible_dates() {
        for raw in ["not a date", "1990-02-30", "1990-13-01", "tomorrow", ""] {
            assert_eq!(
                birthday(raw),
                ValidationResult::Invalid(INVALID_DATE.to_string()),
                "{raw}"
            );
        }
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty("  Ada  "), valid("Ada"));
        assert_eq!(
            non_empty(" \n "),
            ValidationResult::Invalid(EMPTY_VALUE.to_string())
        );
    }
}

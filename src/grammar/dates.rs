use chrono::NaiveDate;

use super::markup::collapse_whitespace;

// chrono only knows English month names.
const GERMAN_MONTHS: [(&str, &str); 9] = [
    ("Januar", "January"),
    ("Februar", "February"),
    ("März", "March"),
    ("Maerz", "March"),
    ("Mai", "May"),
    ("Juni", "June"),
    ("Juli", "July"),
    ("Oktober", "October"),
    ("Dezember", "December"),
];

pub(super) fn parse_with_formats(raw: &str, formats: &[&str]) -> Option<NaiveDate> {
    let candidate = collapse_whitespace(raw)
        .split(' ')
        .map(english_month)
        .collect::<Vec<String>>()
        .join(" ");

    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&candidate, format).ok())
}

fn english_month(token: &str) -> String {
    // `12.März` arrives as a single token
    let (prefix, word) = match token.rfind('.') {
        Some(index) => token.split_at(index + 1),
        None => ("", token),
    };

    GERMAN_MONTHS
        .iter()
        .find(|(german, _)| *german == word)
        .map(|(_, english)| format!("{prefix}{english}"))
        .unwrap_or_else(|| token.to_string())
}

//! Cell helpers shared by the standard leaf views
//!
//! Phone numbers and links coming from the source sheets are free text.
//! These helpers decide whether a value becomes a dialable phone, a link,
//! or stays plain text.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::View;

/// Shown in place of a missing value.
pub const PLACEHOLDER: &str = "-";

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\n\r\t]+").expect("valid whitespace regex"))
}

fn absolute_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://(?P<host>[^/?#\s]+)")
            .expect("valid url regex")
    })
}

fn is_missing(value: &str) -> bool {
    matches!(value, "" | "None" | PLACEHOLDER)
}

/// Trim a raw value, replace line breaks and tabs with ` - `, and map
/// missing values to the placeholder.
pub fn normalize_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "None" {
        return PLACEHOLDER.to_string();
    }
    whitespace_runs().replace_all(trimmed, " - ").into_owned()
}

/// Host part of an absolute url, `None` when the value has no scheme or host.
pub fn host_of(url: &str) -> Option<&str> {
    absolute_url()
        .captures(url.trim())
        .and_then(|caps| caps.name("host"))
        .map(|m| m.as_str())
}

/// A dialable phone, or plain text when the value is missing or is a range
/// like `0212 - 0216`.
pub fn phone_or_text(raw: Option<&str>) -> View {
    match raw.map(str::trim) {
        None => View::text(PLACEHOLDER),
        Some(value) if is_missing(value) => View::text(PLACEHOLDER),
        Some(value) if value.contains('-') => View::text(value),
        Some(value) => View::phone(value),
    }
}

/// A link labelled `label` when `url` is absolute, plain text otherwise.
pub fn link_or_text(url: &str, label: &str) -> View {
    let url = url.trim();
    if host_of(url).is_some() {
        View::link(label, url)
    } else {
        View::text(normalize_cell(url))
    }
}

/// Digits to dial: the number with all whitespace removed.
pub fn dial_string(number: &str) -> String {
    number.chars().filter(|c| !c.is_whitespace()).collect()
}

//! Display helpers shared by the API responses: TMDB image URL building
//! and the formatted fields the detail view shows.

use chrono::{Datelike, NaiveDate};

/// TMDB image CDN base
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

pub const POSTER_SIZE: &str = "w500";
pub const BACKDROP_SIZE: &str = "original";
pub const PROFILE_SIZE: &str = "w185";

/// Build a full image URL from a relative TMDB path such as `/abc123.jpg`.
/// Returns `None` when the record has no image; the consumer supplies its
/// own placeholder in that case.
pub fn image_url(path: Option<&str>, size: &str) -> Option<String> {
    let path = path?;
    if path.is_empty() {
        return None;
    }
    Some(format!("{IMAGE_BASE_URL}/{size}{path}"))
}

pub fn poster_url(path: Option<&str>) -> Option<String> {
    image_url(path, POSTER_SIZE)
}

pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    image_url(path, BACKDROP_SIZE)
}

pub fn profile_url(path: Option<&str>) -> Option<String> {
    image_url(path, PROFILE_SIZE)
}

/// Year of an ISO `YYYY-MM-DD` release date. TMDB sends an empty string for
/// unscheduled titles, which counts as unknown.
pub fn release_year(date: Option<&str>) -> Option<i32> {
    let raw = date?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// Runtime in minutes rendered as `2h 16m`; unknown or zero runtimes render
/// as nothing rather than `0h 0m`.
pub fn format_runtime(minutes: Option<u32>) -> Option<String> {
    let minutes = minutes?;
    if minutes == 0 {
        return None;
    }
    Some(format!("{}h {}m", minutes / 60, minutes % 60))
}

/// Whole-dollar amount rendered as `$1,234,567`; TMDB reports 0 for unknown
/// budgets and revenues, which renders as nothing.
pub fn format_money(amount: u64) -> Option<String> {
    if amount == 0 {
        return None;
    }
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    Some(format!("${out}"))
}

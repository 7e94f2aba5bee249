//! Display formatting for rendered pages.

use chrono::{DateTime, NaiveDate, Utc};

/// Captions longer than this are cut in table cells.
pub const CAPTION_PREVIEW_CHARS: usize = 50;

/// `1234567` -> `1,234,567`.
pub fn count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Nullable counter; missing values render as a dash.
pub fn optional_count(value: Option<i64>) -> String {
    value.map(count).unwrap_or_else(|| "—".to_string())
}

pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn optional_percent(value: Option<f64>) -> String {
    value.map(percent).unwrap_or_else(|| "—".to_string())
}

/// Signed trend label, e.g. `+12.5%` or `-3.0%`.
pub fn trend(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

/// `Jan 5, 2026`
pub fn date(value: &DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

pub fn day(value: &NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}

pub fn caption_preview(caption: Option<&str>) -> String {
    match caption {
        None => String::new(),
        Some(text) if text.chars().count() <= CAPTION_PREVIEW_CHARS => text.to_string(),
        Some(text) => {
            let cut: String = text.chars().take(CAPTION_PREVIEW_CHARS).collect();
            format!("{cut}...")
        }
    }
}

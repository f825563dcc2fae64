use regex::Regex;
use std::sync::LazyLock;

const OPEN_PHRASES: [&str; 6] = [
    "开放申请",
    "开放中",
    "現正接受",
    "现正接受",
    "接受申請",
    "接受申请",
];

const CLOSED_PHRASES: [&str; 2] = ["未开放", "暂未开放"];

static RECURRING_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^每年(\d{1,2})月").expect("recurring month pattern compiles"));

fn normalized(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// True when the text announces that applications are being accepted.
pub fn is_open_phrase(text: &str) -> bool {
    normalized(text)
        .map(|value| OPEN_PHRASES.iter().any(|phrase| value.contains(phrase)))
        .unwrap_or(false)
}

/// True when the text says applications are not open yet.
pub fn is_closed_phrase(text: &str) -> bool {
    normalized(text)
        .map(|value| CLOSED_PHRASES.iter().any(|phrase| value.contains(phrase)))
        .unwrap_or(false)
}

/// Extracts N from text starting with "每年N月" (every year in month N).
pub fn month_from_recurring_phrase(text: &str) -> Option<u32> {
    let caps = RECURRING_MONTH.captures(text.trim())?;
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

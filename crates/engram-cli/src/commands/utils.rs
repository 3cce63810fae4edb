use anyhow::Result;
use chrono::DateTime;
use serde::Serialize;

/// Render a millisecond timestamp as human-readable UTC.
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate text to a display width, appending an ellipsis when cut.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(
            format_timestamp(Some(1_700_000_000_000)),
            "2023-11-14 22:13 UTC"
        );
    }

    #[test]
    fn test_preview_text() {
        assert_eq!(preview_text("short", 10), "short");
        assert_eq!(preview_text("a longer piece of text", 8), "a longer...");
    }
}

// Output formatting — terminal display for filtered items and report summaries.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Format a score in [0, 1] as a whole percentage.
///
/// NaN (no scores to average) renders as the "–%" placeholder, never as 0%.
pub fn format_percent(score: f64) -> String {
    if score.is_nan() {
        "–%".to_string()
    } else {
        format!("{:.0}%", score * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(0.856), "86%");
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(f64::NAN), "–%");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}

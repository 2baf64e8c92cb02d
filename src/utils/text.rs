/// Keep at most `max_chars` characters of `s`, respecting char boundaries.
pub fn clip_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Shorten `s` so the result, ellipsis included, is at most `width`
/// characters long. Strings that already fit are returned unchanged.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    const ELLIPSIS: &str = "...";
    if s.chars().count() <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    format!("{}{ELLIPSIS}", clip_chars(s, keep))
}

/// First line of the trimmed text, itself trimmed.
pub fn first_line(s: &str) -> &str {
    s.trim().lines().next().unwrap_or_default().trim()
}

//! Turning raw text lines into batch URL candidates.
//!
//! A line is kept when, after trimming, it is non-blank and contains a `.`.
//! Everything else is dropped silently; ingestion never reports errors.

/// Filters `lines` down to URL candidates, trimmed, in their original order.
pub fn parse_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            if !line.is_empty() && line.contains('.') {
                Some(line.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Same as [`parse_lines`] over newline-separated text.
pub fn parse_text(text: &str) -> Vec<String> {
    parse_lines(text.lines())
}

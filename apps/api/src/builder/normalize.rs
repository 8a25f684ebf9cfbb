//! Line normalisation shared by every place that decides whether a suggestion is
//! "already in" a field.
//!
//! A line matches a suggestion when both sides are equal after:
//! 1. trimming surrounding whitespace,
//! 2. stripping one optional leading `- ` list marker,
//! 3. trimming again.
//!
//! Matching is exact and case-sensitive.

use serde::{Deserialize, Serialize};

const LIST_MARKER: &str = "- ";

/// How a suggestion is written into its target buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Bare,
    ListItem,
}

pub fn normalize_line(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_prefix(LIST_MARKER).unwrap_or(trimmed).trim()
}

pub fn same_line(a: &str, b: &str) -> bool {
    normalize_line(a) == normalize_line(b)
}

/// Renders a suggestion as a buffer line in the requested style.
pub fn format_line(text: &str, style: LineStyle) -> String {
    let text = normalize_line(text);
    match style {
        LineStyle::Bare => text.to_string(),
        LineStyle::ListItem => format!("{LIST_MARKER}{text}"),
    }
}

/// Whether any line of `buffer` normalises to `text`.
pub fn buffer_contains(buffer: &str, text: &str) -> bool {
    buffer.split('\n').any(|line| same_line(line, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_marker_and_whitespace() {
        assert_eq!(normalize_line("  - React  "), "React");
        assert_eq!(normalize_line("React"), "React");
        assert_eq!(normalize_line("-React"), "-React");
    }

    #[test]
    fn test_only_one_marker_is_stripped() {
        assert_eq!(normalize_line("- - nested"), "- nested");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(same_line("- React", "React"));
        assert!(!same_line("react", "React"));
        assert!(!same_line("React Native", "React"));
    }

    #[test]
    fn test_format_line_styles() {
        assert_eq!(format_line(" Use SSR ", LineStyle::Bare), "Use SSR");
        assert_eq!(format_line("Use SSR", LineStyle::ListItem), "- Use SSR");
        assert_eq!(format_line("- Use SSR", LineStyle::ListItem), "- Use SSR");
    }

    #[test]
    fn test_buffer_contains_handles_crlf() {
        assert!(buffer_contains("first\r\n- second\r\n", "second"));
        assert!(!buffer_contains("", "second"));
    }
}

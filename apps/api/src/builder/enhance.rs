//! Context enhancer: expands vague nouns in a project description into more
//! specific phrases. Deterministic, no model call.

use regex::{NoExpand, Regex, RegexBuilder};
use std::sync::OnceLock;

/// Matched case-insensitively, including the trailing space.
const EXPANSIONS: &[(&str, &str)] = &[
    ("app ", "responsive web application "),
    ("website ", "modern, high-performance website "),
    ("people ", "target users including developers and designers "),
    ("dashboard ", "analytics dashboard with real-time data visualization "),
    ("calculator ", "scientific calculator with history and unit conversion "),
    ("landing page ", "high-conversion landing page with hero section and feature grid "),
    ("blog ", "SEO-optimized blog with markdown support and categories "),
    ("user ", "authenticated user with role-based access control "),
    ("store ", "e-commerce store with cart and checkout functionality "),
    ("chat ", "real-time chat application with websocket support "),
];

/// Appended when no term matched.
pub const FALLBACK_SUFFIX: &str =
    " targeted at specific user demographics with clear accessibility requirements.";

fn patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        EXPANSIONS
            .iter()
            .filter_map(|(term, replacement)| {
                RegexBuilder::new(&regex::escape(term))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (re, *replacement))
            })
            .collect()
    })
}

/// Rewrites `text` through the expansion table, in table order. Blank input is
/// returned unchanged.
pub fn enhance_context(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    let mut enhanced = text.to_string();
    for (re, replacement) in patterns() {
        enhanced = re.replace_all(&enhanced, NoExpand(replacement)).into_owned();
    }
    if enhanced == text {
        enhanced.push_str(FALLBACK_SUFFIX);
    }
    enhanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expands_known_terms() {
        assert_eq!(
            enhance_context("A Dashboard for people to use"),
            "A analytics dashboard with real-time data visualization for \
             target users including developers and designers to use"
        );
    }

    #[test]
    fn test_term_needs_trailing_space() {
        let out = enhance_context("Build an app");
        assert_eq!(out, format!("Build an app{FALLBACK_SUFFIX}"));
    }

    #[test]
    fn test_multiword_term() {
        assert_eq!(
            enhance_context("landing page for launch"),
            "high-conversion landing page with hero section and feature grid for launch"
        );
    }

    #[test]
    fn test_expansions_apply_in_table_order() {
        let out = enhance_context("website for people now");
        assert!(out.starts_with("modern, high-performance website for target users"));
    }

    #[test]
    fn test_blank_input_untouched() {
        assert_eq!(enhance_context("  "), "  ");
    }
}

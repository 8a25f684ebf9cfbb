//! Suggestion toggle reducer.
//!
//! Keeps one category's checklist and its target consistent when a suggestion is
//! checked or unchecked. Both functions are pure: they take the current values and
//! return new ones.

use std::collections::BTreeSet;

use crate::builder::normalize::{buffer_contains, format_line, same_line, LineStyle};

/// New selection set plus the new value of the toggled target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled<T> {
    pub selected: BTreeSet<usize>,
    pub value: T,
}

/// Toggles suggestion `index` (with literal `text`) against a free-text buffer.
///
/// Checking appends the formatted line unless an equal line already exists. An empty
/// buffer becomes exactly the formatted line. Unchecking drops the first equal line.
pub fn toggle_line(
    selected: &BTreeSet<usize>,
    buffer: &str,
    index: usize,
    text: &str,
    style: LineStyle,
) -> Toggled<String> {
    let mut selected = selected.clone();
    let value = if selected.remove(&index) {
        remove_line(buffer, text)
    } else {
        selected.insert(index);
        append_line(buffer, text, style)
    };
    Toggled { selected, value }
}

/// Same contract as [`toggle_line`], for targets that hold one entry per item.
pub fn toggle_entry(
    selected: &BTreeSet<usize>,
    entries: &[String],
    index: usize,
    text: &str,
) -> Toggled<Vec<String>> {
    let mut selected = selected.clone();
    let value = if selected.remove(&index) {
        remove_entry(entries, text)
    } else {
        selected.insert(index);
        add_entry(entries, text)
    };
    Toggled { selected, value }
}

pub fn append_line(buffer: &str, text: &str, style: LineStyle) -> String {
    if buffer_contains(buffer, text) {
        return buffer.to_string();
    }
    let line = format_line(text, style);
    let existing = buffer.trim_end();
    if existing.trim().is_empty() {
        line
    } else {
        format!("{existing}\n{line}")
    }
}

pub fn remove_line(buffer: &str, text: &str) -> String {
    let mut removed = false;
    buffer
        .split('\n')
        .filter(|line| {
            if !removed && same_line(line, text) {
                removed = true;
                return false;
            }
            true
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn add_entry(entries: &[String], text: &str) -> Vec<String> {
    let mut entries = entries.to_vec();
    if !entries.iter().any(|e| same_line(e, text)) {
        entries.push(text.trim().to_string());
    }
    entries
}

pub fn remove_entry(entries: &[String], text: &str) -> Vec<String> {
    let mut entries = entries.to_vec();
    if let Some(pos) = entries.iter().position(|e| same_line(e, text)) {
        entries.remove(pos);
    }
    entries
}

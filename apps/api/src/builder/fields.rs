use serde::{Deserialize, Serialize};

use crate::builder::normalize::same_line;

/// Technologies offered as one-click tags in the classic form.
pub const PRESET_TECH: &[&str] = &[
    "HTML",
    "CSS",
    "Vanilla JS",
    "TypeScript",
    "React",
    "Vue",
    "Next.js",
    "Tailwind CSS",
    "Node.js",
    "Python",
];

pub fn is_preset_tech(tag: &str) -> bool {
    PRESET_TECH.contains(&tag.trim())
}

/// The two layouts of the builder. Both drive the same engine; they differ only in
/// which sections are rendered and which suggestion categories the gateway returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    /// Context / Persona / Constraints & Tech Stack / Examples.
    #[default]
    Classic,
    /// System prompt (persona, constraints) + user prompt (task, requirements, tech).
    Split,
}

impl FormVariant {
    /// File extension used when the rendered prompt is downloaded.
    pub fn extension(self) -> &'static str {
        match self {
            FormVariant::Classic => "md",
            FormVariant::Split => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            FormVariant::Classic => "text/markdown; charset=utf-8",
            FormVariant::Split => "text/plain; charset=utf-8",
        }
    }
}

/// Metadata for an uploaded reference file. Contents are never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub size: u64,
}

/// Free-text buffers a user (or a toggled suggestion) can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Context,
    Persona,
    Constraints,
    Task,
    Requirements,
    Tech,
    Examples,
}

/// Everything the assembler reads. All fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptFields {
    pub context: String,
    pub persona: String,
    pub constraints: String,
    pub task: String,
    pub requirements: String,
    pub tech: String,
    /// Selected preset tags, in the order they were picked.
    pub selected_tech: Vec<String>,
    pub custom_constraints: Vec<String>,
    pub uploaded_files: Vec<FileMetadata>,
    pub custom_examples: String,
}

impl PromptFields {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Context => &self.context,
            TextField::Persona => &self.persona,
            TextField::Constraints => &self.constraints,
            TextField::Task => &self.task,
            TextField::Requirements => &self.requirements,
            TextField::Tech => &self.tech,
            TextField::Examples => &self.custom_examples,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Context => &mut self.context,
            TextField::Persona => &mut self.persona,
            TextField::Constraints => &mut self.constraints,
            TextField::Task => &mut self.task,
            TextField::Requirements => &mut self.requirements,
            TextField::Tech => &mut self.tech,
            TextField::Examples => &mut self.custom_examples,
        }
    }

    /// Flips a preset tag on or off.
    pub fn toggle_tech(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tech.iter().position(|t| t == tag) {
            self.selected_tech.remove(pos);
        } else {
            self.selected_tech.push(tag.to_string());
        }
    }

    /// Adds a custom constraint. Blank input is ignored.
    pub fn add_constraint(&mut self, constraint: &str) -> bool {
        let constraint = constraint.trim();
        if constraint.is_empty() {
            return false;
        }
        self.custom_constraints.push(constraint.to_string());
        true
    }

    pub fn remove_constraint(&mut self, index: usize) -> Option<String> {
        (index < self.custom_constraints.len()).then(|| self.custom_constraints.remove(index))
    }

    pub fn add_files(&mut self, files: impl IntoIterator<Item = FileMetadata>) {
        self.uploaded_files.extend(files);
    }

    pub fn remove_file(&mut self, index: usize) -> Option<FileMetadata> {
        (index < self.uploaded_files.len()).then(|| self.uploaded_files.remove(index))
    }

    /// Whether any tag list entry matches `text` after line normalisation.
    pub fn has_tag(&self, text: &str) -> bool {
        self.selected_tech
            .iter()
            .chain(self.custom_constraints.iter())
            .any(|t| same_line(t, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty() {
        let f = PromptFields::default();
        assert!(f.context.is_empty());
        assert!(f.selected_tech.is_empty());
        assert!(f.uploaded_files.is_empty());
    }

    #[test]
    fn test_toggle_tech_keeps_pick_order() {
        let mut f = PromptFields::default();
        f.toggle_tech("React");
        f.toggle_tech("CSS");
        f.toggle_tech("HTML");
        f.toggle_tech("CSS");
        assert_eq!(f.selected_tech, vec!["React", "HTML"]);
    }

    #[test]
    fn test_blank_constraint_ignored() {
        let mut f = PromptFields::default();
        assert!(!f.add_constraint("   "));
        assert!(f.add_constraint("  Use localStorage  "));
        assert_eq!(f.custom_constraints, vec!["Use localStorage"]);
    }

    #[test]
    fn test_remove_out_of_range_is_none() {
        let mut f = PromptFields::default();
        assert_eq!(f.remove_constraint(3), None);
        assert_eq!(f.remove_file(0), None);
    }

    #[test]
    fn test_preset_lookup_is_exact() {
        assert!(is_preset_tech("Tailwind CSS"));
        assert!(is_preset_tech(" React "));
        assert!(!is_preset_tech("react"));
        assert!(!is_preset_tech("Chart.js"));
    }

    #[test]
    fn test_variant_extensions() {
        assert_eq!(FormVariant::Classic.extension(), "md");
        assert_eq!(FormVariant::Split.extension(), "txt");
    }

    #[test]
    fn test_fields_deserialize_camel_case_with_defaults() {
        let f: PromptFields =
            serde_json::from_str(r#"{"context":"x","selectedTech":["React"]}"#).unwrap();
        assert_eq!(f.context, "x");
        assert_eq!(f.selected_tech, vec!["React"]);
        assert!(f.persona.is_empty());
    }
}

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::builder::fields::{FormVariant, TextField};
use crate::builder::normalize::LineStyle;

/// A named group of suggestions. Serialized with the gateway's wire names
/// (`context`, `persona`, `techStack`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Context,
    Persona,
    TechStack,
    Constraints,
    Task,
    Requirements,
    Tech,
}

/// Where a toggled suggestion lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Text { field: TextField, style: LineStyle },
    /// Preset tech tags, falling back to the custom-constraint list.
    TechTags,
}

impl FormVariant {
    /// Categories the gateway returns for this variant, in display order.
    pub fn categories(self) -> &'static [Category] {
        match self {
            FormVariant::Classic => &[Category::Context, Category::Persona, Category::TechStack],
            FormVariant::Split => &[
                Category::Persona,
                Category::Constraints,
                Category::Task,
                Category::Requirements,
                Category::Tech,
            ],
        }
    }
}

impl Category {
    /// Target of this category in `variant`, or `None` if the variant has no such category.
    pub fn target(self, variant: FormVariant) -> Option<Target> {
        use LineStyle::{Bare, ListItem};

        let text = |field, style| Some(Target::Text { field, style });
        match (variant, self) {
            (FormVariant::Classic, Category::Context) => text(TextField::Context, Bare),
            (FormVariant::Classic, Category::Persona) => text(TextField::Persona, Bare),
            (FormVariant::Classic, Category::TechStack) => Some(Target::TechTags),
            (FormVariant::Split, Category::Persona) => text(TextField::Persona, Bare),
            (FormVariant::Split, Category::Constraints) => text(TextField::Constraints, ListItem),
            (FormVariant::Split, Category::Task) => text(TextField::Task, Bare),
            (FormVariant::Split, Category::Requirements) => {
                text(TextField::Requirements, ListItem)
            }
            (FormVariant::Split, Category::Tech) => text(TextField::Tech, ListItem),
            _ => None,
        }
    }
}

/// Suggestions from one completed analysis. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionSet(BTreeMap<Category, Vec<String>>);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassicReply {
    context: Vec<String>,
    persona: Vec<String>,
    tech_stack: Vec<String>,
}

#[derive(Deserialize)]
struct SplitReply {
    persona: Vec<String>,
    constraints: Vec<String>,
    task: Vec<String>,
    requirements: Vec<String>,
    tech: Vec<String>,
}

impl SuggestionSet {
    pub fn new(entries: impl IntoIterator<Item = (Category, Vec<String>)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Parses a model reply verbatim. Every key of the variant's schema must be present;
    /// code fences or trailing prose are a parse failure.
    pub fn from_json(variant: FormVariant, text: &str) -> Result<Self, serde_json::Error> {
        Ok(match variant {
            FormVariant::Classic => {
                let r: ClassicReply = serde_json::from_str(text)?;
                Self::new([
                    (Category::Context, r.context),
                    (Category::Persona, r.persona),
                    (Category::TechStack, r.tech_stack),
                ])
            }
            FormVariant::Split => {
                let r: SplitReply = serde_json::from_str(text)?;
                Self::new([
                    (Category::Persona, r.persona),
                    (Category::Constraints, r.constraints),
                    (Category::Task, r.task),
                    (Category::Requirements, r.requirements),
                    (Category::Tech, r.tech),
                ])
            }
        })
    }

    pub fn get(&self, category: Category) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn suggestion(&self, category: Category, index: usize) -> Option<&str> {
        self.get(category).get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.0.iter().map(|(c, v)| (*c, v.as_slice()))
    }
}

/// Checked suggestion indices per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState(BTreeMap<Category, BTreeSet<usize>>);

impl SelectionState {
    pub fn get(&self, category: Category) -> BTreeSet<usize> {
        self.0.get(&category).cloned().unwrap_or_default()
    }

    pub fn is_selected(&self, category: Category, index: usize) -> bool {
        self.0.get(&category).is_some_and(|s| s.contains(&index))
    }

    pub fn set(&mut self, category: Category, indices: BTreeSet<usize>) {
        if indices.is_empty() {
            self.0.remove(&category);
        } else {
            self.0.insert(category, indices);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// Drops indices that no longer point into `suggestions`.
    pub fn retain_valid(&mut self, suggestions: Option<&SuggestionSet>) {
        self.0.retain(|category, indices| {
            let len = suggestions.map_or(0, |s| s.get(*category).len());
            indices.retain(|i| *i < len);
            !indices.is_empty()
        });
    }
}

/// State of the single in-flight (or most recent) analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Analyzing,
    Complete,
}

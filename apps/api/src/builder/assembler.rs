//! Prompt assembler: renders `PromptFields` into the final markdown prompt.
//!
//! Every section of the variant always appears, in fixed order. Empty sections carry
//! [`PLACEHOLDER`]. Blocks are joined by one blank line and text is inserted verbatim.

use crate::builder::fields::{FormVariant, PromptFields};

pub const PLACEHOLDER: &str = "(No information provided yet)";

/// Body of one sub-part of a composite section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    Text(&'a str),
    /// Rendered as `- item` lines.
    List(Vec<&'a str>),
}

impl Body<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Body::Text(text) => text.trim().is_empty(),
            Body::List(items) => items.is_empty(),
        }
    }

    fn render(&self) -> String {
        match self {
            Body::Text(text) => text.trim().to_string(),
            Body::List(items) => items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPart<'a> {
    pub label: &'static str,
    pub body: Body<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<'a> {
    Single {
        heading: &'static str,
        body: Body<'a>,
    },
    Composite {
        heading: &'static str,
        parts: Vec<SubPart<'a>>,
    },
}

/// The ordered sections of `variant`, borrowing from `fields`.
pub fn sections<'a>(variant: FormVariant, fields: &'a PromptFields) -> Vec<Section<'a>> {
    let single = |heading, text: &'a String| Section::Single {
        heading,
        body: Body::Text(text),
    };
    let list = |items: &'a [String]| Body::List(items.iter().map(String::as_str).collect());

    match variant {
        FormVariant::Classic => vec![
            single("## 1. Context", &fields.context),
            single("## 2. Persona", &fields.persona),
            Section::Composite {
                heading: "## 3. Constraints & Tech Stack",
                parts: vec![
                    SubPart {
                        label: "**Tech Stack:**",
                        body: list(fields.selected_tech.as_slice()),
                    },
                    SubPart {
                        label: "**Requirements:**",
                        body: list(fields.custom_constraints.as_slice()),
                    },
                ],
            },
            Section::Composite {
                heading: "## 4. Examples",
                parts: vec![
                    SubPart {
                        label: "**Manual Snippets:**",
                        body: Body::Text(&fields.custom_examples),
                    },
                    SubPart {
                        label: "**Uploaded Files:**",
                        body: Body::List(
                            fields.uploaded_files.iter().map(|f| f.name.as_str()).collect(),
                        ),
                    },
                ],
            },
        ],
        FormVariant::Split => vec![
            single("## 1. Persona", &fields.persona),
            single("## 2. Constraints", &fields.constraints),
            single("## 3. Task", &fields.task),
            single("## 4. Requirements", &fields.requirements),
            single("## 5. Tech", &fields.tech),
        ],
    }
}

/// Renders an ordered list of sections.
pub fn render_sections(sections: &[Section<'_>]) -> String {
    let mut blocks = Vec::new();
    for section in sections {
        match section {
            Section::Single { heading, body } => {
                let body = if body.is_empty() {
                    PLACEHOLDER.to_string()
                } else {
                    body.render()
                };
                blocks.push(format!("{heading}\n{body}"));
            }
            Section::Composite { heading, parts } => {
                let filled: Vec<_> = parts.iter().filter(|p| !p.body.is_empty()).collect();
                if filled.is_empty() {
                    blocks.push(format!("{heading}\n{PLACEHOLDER}"));
                    continue;
                }
                blocks.push(heading.to_string());
                for part in filled {
                    blocks.push(format!("{}\n{}", part.label, part.body.render()));
                }
            }
        }
    }
    blocks.join("\n\n")
}

/// Renders the full prompt for `variant`. Pure: equal inputs give byte-identical output.
pub fn assemble(variant: FormVariant, fields: &PromptFields) -> String {
    render_sections(&sections(variant, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::fields::FileMetadata;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_classic_renders_four_placeholders() {
        let out = assemble(FormVariant::Classic, &PromptFields::default());
        assert_eq!(
            out,
            "## 1. Context\n(No information provided yet)\n\n\
             ## 2. Persona\n(No information provided yet)\n\n\
             ## 3. Constraints & Tech Stack\n(No information provided yet)\n\n\
             ## 4. Examples\n(No information provided yet)"
        );
    }

    #[test]
    fn test_empty_split_renders_five_placeholders_in_order() {
        let out = assemble(FormVariant::Split, &PromptFields::default());
        assert_eq!(out.matches(PLACEHOLDER).count(), 5);
        let headings: Vec<_> = out.lines().filter(|l| l.starts_with("## ")).collect();
        assert_eq!(
            headings,
            vec![
                "## 1. Persona",
                "## 2. Constraints",
                "## 3. Task",
                "## 4. Requirements",
                "## 5. Tech"
            ]
        );
    }

    #[test]
    fn test_context_and_tech_scenario() {
        let fields = PromptFields {
            context: "Build a dashboard".into(),
            selected_tech: vec!["React".into(), "Tailwind CSS".into()],
            ..Default::default()
        };
        let out = assemble(FormVariant::Classic, &fields);
        assert!(out.starts_with("## 1. Context\nBuild a dashboard\n\n"));
        assert!(out.contains(
            "## 3. Constraints & Tech Stack\n\n**Tech Stack:**\n- React\n- Tailwind CSS"
        ));
        assert!(!out.contains("**Requirements:**"));
    }

    #[test]
    fn test_composite_with_both_parts() {
        let fields = PromptFields {
            selected_tech: vec!["Vue".into()],
            custom_constraints: vec!["No external CDNs".into()],
            custom_examples: "  fn main() {}\n".into(),
            uploaded_files: vec![FileMetadata {
                name: "wireframe.png".into(),
                size: 2048,
            }],
            ..Default::default()
        };
        let out = assemble(FormVariant::Classic, &fields);
        assert!(out.contains("**Tech Stack:**\n- Vue\n\n**Requirements:**\n- No external CDNs"));
        assert!(out.ends_with(
            "## 4. Examples\n\n**Manual Snippets:**\nfn main() {}\n\n**Uploaded Files:**\n- wireframe.png"
        ));
        assert!(!out.contains("2048"));
    }

    #[test]
    fn test_whitespace_only_text_counts_as_empty() {
        let fields = PromptFields {
            persona: " \n\t ".into(),
            ..Default::default()
        };
        let out = assemble(FormVariant::Classic, &fields);
        assert!(out.contains("## 2. Persona\n(No information provided yet)"));
    }

    #[test]
    fn test_text_is_not_escaped() {
        let fields = PromptFields {
            task: "<b>*bold*</b> & `code`".into(),
            ..Default::default()
        };
        let out = assemble(FormVariant::Split, &fields);
        assert!(out.contains("## 3. Task\n<b>*bold*</b> & `code`"));
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let fields = PromptFields {
            context: "ctx".into(),
            persona: "p".into(),
            selected_tech: vec!["Python".into(), "HTML".into()],
            custom_constraints: vec!["c1".into(), "c2".into()],
            ..Default::default()
        };
        let a = assemble(FormVariant::Classic, &fields);
        let b = assemble(FormVariant::Classic, &fields.clone());
        assert_eq!(a, b);
        assert!(a.find("- Python").unwrap() < a.find("- HTML").unwrap());
    }

    #[test]
    fn test_split_ignores_classic_only_fields() {
        let fields = PromptFields {
            context: "only classic".into(),
            selected_tech: vec!["React".into()],
            ..Default::default()
        };
        let out = assemble(FormVariant::Split, &fields);
        assert!(!out.contains("only classic"));
        assert!(!out.contains("React"));
    }
}

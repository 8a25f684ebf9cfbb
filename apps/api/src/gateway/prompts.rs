// Image analysis prompt templates, one per form variant.

use crate::builder::FormVariant;
use crate::llm_client::prompts::{CONCISE_INSTRUCTION, JSON_ONLY_INSTRUCTION};

const ANALYSIS_INTRO: &str = "Analyze this design screenshot or wireframe. \
Extract patterns and provide suggestions for building a prompt about this design.";

const CLASSIC_SCHEMA: &str = r#"{
  "context": ["suggestion 1", "suggestion 2"],
  "persona": ["suggestion 1", "suggestion 2"],
  "techStack": ["suggestion 1", "suggestion 2", "suggestion 3"]
}"#;

const CLASSIC_GUIDELINES: &str = r#"Guidelines:
- context: 2 suggestions describing what is being built (e.g., "Building a dashboard with data cards", "E-commerce product listing page")
- persona: 2 suggestions for the ideal developer profile (e.g., "Frontend developer experienced with React", "UI/UX focused developer")
- techStack: 2-3 specific technologies visible or recommended (e.g., "React", "Tailwind CSS", "Chart.js")"#;

const SPLIT_SCHEMA: &str = r#"{
  "persona": ["suggestion 1", "suggestion 2"],
  "constraints": ["suggestion 1", "suggestion 2"],
  "task": ["suggestion 1", "suggestion 2"],
  "requirements": ["suggestion 1", "suggestion 2", "suggestion 3"],
  "tech": ["suggestion 1", "suggestion 2", "suggestion 3"]
}"#;

const SPLIT_GUIDELINES: &str = r#"Guidelines:
- persona: 2 suggestions for the AI's role and expertise (e.g., "You are a senior frontend developer specializing in React")
- constraints: 2 behavioral rules or quality standards (e.g., "Follow WCAG 2.1 AA standards", "Handle errors gracefully")
- task: 2 suggestions describing what to build (e.g., "Build a responsive admin dashboard")
- requirements: 2-3 functional requirements visible in the design (e.g., "Display real-time analytics", "Dark mode support")
- tech: 2-3 specific technologies visible or recommended (e.g., "React", "Tailwind CSS", "Prisma")"#;

/// Full instruction sent alongside the image.
pub fn analysis_instruction(variant: FormVariant) -> String {
    let (schema, guidelines) = match variant {
        FormVariant::Classic => (CLASSIC_SCHEMA, CLASSIC_GUIDELINES),
        FormVariant::Split => (SPLIT_SCHEMA, SPLIT_GUIDELINES),
    };
    format!(
        "{ANALYSIS_INTRO}\n\n{JSON_ONLY_INSTRUCTION}\n{schema}\n\n{guidelines}\n\n{CONCISE_INSTRUCTION}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_instruction_names_every_key() {
        let text = analysis_instruction(FormVariant::Classic);
        for key in ["\"context\"", "\"persona\"", "\"techStack\""] {
            assert!(text.contains(key), "missing {key}");
        }
        assert!(text.contains("no code blocks"));
    }

    #[test]
    fn test_split_instruction_names_every_key() {
        let text = analysis_instruction(FormVariant::Split);
        for key in ["persona", "constraints", "task", "requirements", "tech"] {
            assert!(text.contains(&format!("\"{key}\"")), "missing {key}");
        }
        assert!(!text.contains("techStack"));
    }
}

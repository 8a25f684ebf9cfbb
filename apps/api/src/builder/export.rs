//! Download and preview artifacts derived from a rendered prompt.

use crate::builder::fields::FormVariant;

pub const DEFAULT_TITLE: &str = "Generated Prompt";
pub const EMPTY_PROMPT_HINT: &str = "Complete the sections on the left to generate your prompt...";

/// `Dashboard Plan!` → `dashboard-plan-.md`. A blank title falls back to
/// `generated-prompt.<ext>`.
pub fn download_filename(title: &str, variant: FormVariant) -> String {
    let title = title.trim();
    let stem = if title.is_empty() {
        "generated-prompt".to_string()
    } else {
        title
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect()
    };
    format!("{stem}.{}", variant.extension())
}

/// Preview shown next to the form: `# <title>` followed by the prompt, or a hint
/// while nothing has been rendered.
pub fn titled_preview(title: &str, prompt: &str) -> String {
    let title = match title.trim() {
        "" => DEFAULT_TITLE,
        t => t,
    };
    let body = if prompt.trim().is_empty() {
        EMPTY_PROMPT_HINT
    } else {
        prompt
    };
    format!("# {title}\n\n{body}")
}

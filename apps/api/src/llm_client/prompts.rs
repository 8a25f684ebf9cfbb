// Shared prompt fragments.
// Each service that needs model calls defines its own prompts.rs alongside it;
// this file holds the pieces every one of them repeats.

/// Demands a bare JSON object. Replies are parsed verbatim, so fences break parsing.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Return ONLY a valid JSON object (no markdown, no code blocks) with this exact structure:";

/// Closing rule for suggestion lists.
pub const CONCISE_INSTRUCTION: &str = "Keep suggestions concise (under 80 characters each). \
    Focus on what you actually see in the image.";

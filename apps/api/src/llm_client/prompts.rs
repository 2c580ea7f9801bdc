// Shared prompt fragments used across tools.
// Each tool's own templates live in tools/prompts.rs.

/// System prompt for free-text generation.
pub const CAREER_ASSISTANT_SYSTEM: &str = "You are an experienced career coach and \
    professional writer. You help candidates present their real experience clearly \
    and honestly. Never invent employers, dates, projects or skills that are not \
    present in the material you are given.";

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Renders the optional truncation note appended to prompts.
pub fn truncation_note(message: Option<&str>) -> String {
    message.map(|m| format!("Note: {m}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation_note() {
        assert_eq!(truncation_note(None), "");
        assert_eq!(truncation_note(Some("cut")), "Note: cut");
    }
}

// All LLM prompt constants for the Suggestion module.
// The suggestion endpoint is the only prompt site in the service.

/// System prompt for the generative tier.
pub const SUGGESTION_SYSTEM: &str = "You are a helpful homeopathic expert.";

/// User prompt template. Replace `{answers}` before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str =
    "Based on the following detailed patient information, suggest a suitable homeopathic medicine:\n{answers}";

/// Builds the user message from the newline-joined answer values.
pub fn build_suggestion_prompt(answers: &str) -> String {
    SUGGESTION_PROMPT_TEMPLATE.replace("{answers}", answers)
}

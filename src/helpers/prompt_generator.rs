use crate::constants::prompts::COMPARISON_PROMPT;

pub fn generate_comparison_prompt(old_spec: &str, new_spec: &str) -> String {
    COMPARISON_PROMPT
        .replace("{{OLD_SPEC}}", old_spec)
        .replace("{{NEW_SPEC}}", new_spec)
}

//! Prompt construction shared by every vendor.

/// Token budget for the diff portion of a prompt.
pub const MAX_DIFF_TOKENS: usize = 4_000;

/// Rough characters-per-token ratio used to enforce the budget.
const CHARS_PER_TOKEN: usize = 4;

/// Completion budget for the generated message.
pub const MAX_COMPLETION_TOKENS: u32 = 50;

const PROMPT_PREFIX: &str =
    "Generate a concise and descriptive commit message for the following changes:\n\n";

const TRUNCATION_NOTE: &str = "\n[diff truncated]";

/// Build the commit message prompt for a staged diff.
pub fn build_commit_prompt(diff: &str) -> String {
    let (diff, truncated) = truncate_diff(diff, MAX_DIFF_TOKENS * CHARS_PER_TOKEN);

    let mut prompt = String::with_capacity(PROMPT_PREFIX.len() + diff.len());
    prompt.push_str(PROMPT_PREFIX);
    prompt.push_str(diff);
    if truncated {
        prompt.push_str(TRUNCATION_NOTE);
    }
    prompt
}

/// Cut `diff` to at most `max_chars` bytes on a char boundary.
fn truncate_diff(diff: &str, max_chars: usize) -> (&str, bool) {
    if diff.len() <= max_chars {
        return (diff, false);
    }

    let mut end = max_chars;
    while !diff.is_char_boundary(end) {
        end -= 1;
    }
    (&diff[..end], true)
}

/// Clean up a vendor response: trim whitespace and markdown code fences.
pub fn clean_message(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```")
        .map(|rest| rest.split_once('\n').map_or("", |(_, body)| body))
        .unwrap_or(trimmed);

    without_open
        .trim_end()
        .trim_end_matches("```")
        .trim()
        .to_string()
}

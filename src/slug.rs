//! Slug token normalization
//!
//! A slug is the canonical machine key for a hashtag or synonym:
//! lowercase, underscore-delimited, restricted to `[a-z0-9_]`.
//!
//! Normalization rules, applied in order:
//! 1. Lowercase the input
//! 2. Strip one leading `#`
//! 3. Trim surrounding whitespace
//! 4. Collapse internal whitespace runs to `_`
//! 5. Drop every character outside `[a-z0-9_]`
//!
//! `normalize_token` is pure, total, and idempotent. It never fails;
//! inputs made entirely of symbols normalize to the empty string.

use std::sync::OnceLock;

use regex::Regex;

/// Regex for internal whitespace runs (step 4)
fn whitespace_run() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Produces the canonical slug token for any input string.
///
/// May return an empty string (for example when the input contains
/// only symbols).
pub fn normalize_token(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = lowered.strip_prefix('#').unwrap_or(&lowered);
    let trimmed = stripped.trim();
    let underscored = whitespace_run().replace_all(trimmed, "_");
    underscored
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_'))
        .collect()
}

/// Strips one leading `#` and surrounding whitespace without changing
/// case. Used for display forms (titles and synonym terms), which keep
/// their human-facing casing.
pub fn clean_display(input: &str) -> String {
    input.strip_prefix('#').unwrap_or(input).trim().to_string()
}

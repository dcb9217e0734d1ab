//! Generator payload cleaning
//!
//! Generators wrap JSON in Markdown code fences, and reasoning models leak
//! `<think>...</think>` blocks into the response. Both must be removed before
//! the payload is parsed.

use once_cell::sync::Lazy;
use regex::Regex;

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("hard-coded regex compiles"));

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("hard-coded regex compiles"));

static BARE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").expect("hard-coded regex compiles"));

/// Remove thinking-block sentinel content from generator text.
///
/// Collaborator implementations of the text-generation trait are expected to
/// call this before returning, so validation never sees reasoning tokens.
#[must_use]
pub fn strip_thinking(text: &str) -> String {
    THINK_BLOCK.replace_all(text, "").into_owned()
}

/// Strip thinking blocks and Markdown code fences, returning trimmed text
/// ready for JSON parsing.
#[must_use]
pub fn clean_payload(text: &str) -> String {
    let text = strip_thinking(text);
    let text = JSON_FENCE.replace_all(&text, "$1");
    let text = BARE_FENCE.replace_all(&text, "$1");
    text.trim().to_string()
}

use std::sync::LazyLock;

use regex::Regex;

static OPENING_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A```[\w+-]*[ \t]*(?:\r?\n)?").expect("valid opening fence regex")
});
static CLOSING_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)?[ \t]*```\z").expect("valid closing fence regex"));

/// Strips a Markdown code fence wrapped around a model reply.
///
/// Only a leading fence (with optional language tag) and a trailing fence are
/// removed, then surrounding whitespace is trimmed. Text that is already clean
/// comes back unchanged. Malformed JSON is left as is.
pub fn sanitize_response(raw_text: &str) -> String {
    let trimmed = raw_text.trim();
    let without_opening = OPENING_FENCE_RE.replace(trimmed, "");
    let without_closing = CLOSING_FENCE_RE.replace(&without_opening, "");

    without_closing.trim().to_string()
}

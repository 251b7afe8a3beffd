//! Response sanitization.
//!
//! Models habitually wrap LaTeX source in a fenced code block, with or
//! without a language hint. The downstream compiler needs the literal
//! source, so the fences are stripped here. Idempotent: sanitizing
//! already-clean text is a no-op.

use std::sync::LazyLock;

use regex::Regex;

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+.-]*[ \t]*(\r?\n)?").expect("valid regex"));

static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\r?\n)?```\s*\z").expect("valid regex"));

/// Strip surrounding code fences and whitespace from raw response text.
///
/// Runs to a fixed point: a stripped body that itself opens with a fence
/// (nested fences) is stripped again, so re-sanitizing any output is
/// always a no-op.
pub fn sanitize_output(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    loop {
        let next = strip_outer_fences(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn strip_outer_fences(text: &str) -> String {
    let Some(open) = FENCE_OPEN.find(text) else {
        return text.to_string();
    };

    let body = &text[open.end()..];
    let body = match FENCE_CLOSE.find(body) {
        Some(close) => &body[..close.start()],
        None => body,
    };

    body.trim().to_string()
}

//! Input cleanup applied to profile fields before they reach a prompt.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Anything that is neither a word character nor whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("static regex is valid"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizeMode {
    /// Trim surrounding whitespace only.
    #[default]
    Trim,
    /// Also drop every character that is not alphanumeric, `_`, or whitespace.
    Strict,
}

/// Normalizes a free-text field. Total: `None` and `""` both yield `""`.
pub fn sanitize<'a>(text: impl Into<Option<&'a str>>, mode: SanitizeMode) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };

    match mode {
        SanitizeMode::Trim => text.trim().to_string(),
        SanitizeMode::Strict => NON_WORD.replace_all(text, "").trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "AI, ML & Data!",
        "  B.Tech in Computer Science  ",
        "C++ / Rust / Go",
        "naïve café résumé",
        "\t\nDevOps\u{00a0}",
        "!!!",
        "a . b",
        "e-mail: me@example.com",
    ];

    #[test]
    fn test_none_and_empty_yield_empty() {
        assert_eq!(sanitize(None::<&str>, SanitizeMode::Strict), "");
        assert_eq!(sanitize(None::<&str>, SanitizeMode::Trim), "");
        assert_eq!(sanitize("", SanitizeMode::Strict), "");
        assert_eq!(sanitize("   ", SanitizeMode::Trim), "");
    }

    #[test]
    fn test_trim_mode_keeps_punctuation() {
        assert_eq!(sanitize("  B.Tech CSE ", SanitizeMode::Trim), "B.Tech CSE");
    }

    #[test]
    fn test_strict_mode_strips_symbols() {
        assert_eq!(sanitize("AI, ML & Data!", SanitizeMode::Strict), "AI ML  Data");
        assert_eq!(sanitize("C++ / Rust", SanitizeMode::Strict), "C  Rust");
        assert_eq!(sanitize("snake_case", SanitizeMode::Strict), "snake_case");
    }

    #[test]
    fn test_strict_mode_keeps_unicode_letters() {
        assert_eq!(
            sanitize("naïve café!", SanitizeMode::Strict),
            "naïve café"
        );
    }

    #[test]
    fn test_idempotent_in_both_modes() {
        for mode in [SanitizeMode::Trim, SanitizeMode::Strict] {
            for sample in SAMPLES {
                let once = sanitize(*sample, mode);
                let twice = sanitize(once.as_str(), mode);
                assert_eq!(once, twice, "mode {mode:?}, input {sample:?}");
            }
        }
    }
}

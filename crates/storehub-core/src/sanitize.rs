//! XSS neutralization for free-text store fields.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::directory::InputSanitizer;

// Applied in order; each match is removed.
static STRIP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)<script>(.*?)</script>",
        r"(?is)src[\r\n]*=[\r\n]*'(.*?)'",
        r#"(?is)src[\r\n]*=[\r\n]*"(.*?)""#,
        r"(?i)</script>",
        r"(?is)<script(.*?)>",
        r"(?is)eval\((.*?)\)",
        r"(?is)expression\((.*?)\)",
        r"(?i)javascript:",
        r"(?i)vbscript:",
        r"(?is)onload(.*?)=",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Regex-based sanitizer: percent-decodes the input, strips script blocks,
/// inline handlers and `javascript:`/`vbscript:` URLs, then entity-escapes
/// quotes and angle brackets.
#[derive(Debug, Clone, Copy, Default)]
pub struct XssSanitizer;

impl XssSanitizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSanitizer for XssSanitizer {
    fn sanitize(&self, input: &str) -> String {
        // Invalid escapes pass through untouched; `+` is never treated as a space.
        let decoded = percent_decode_str(input).decode_utf8_lossy();
        let mut value = decoded.replace('\0', "");

        for pattern in STRIP_PATTERNS.iter() {
            if pattern.is_match(&value) {
                value = pattern.replace_all(&value, "").into_owned();
            }
        }

        value
            .replace('\'', "&apos;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }
}

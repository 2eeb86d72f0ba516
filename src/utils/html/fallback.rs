// src/utils/html/fallback.rs

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script span pattern is valid")
});

static SCRIPT_OPENING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?script)").expect("script opening pattern is valid")
});

/// Removes every `<script>...</script>` span and returns the rest untouched.
///
/// Degraded mode: no tag allow-listing, no attribute stripping and no link
/// normalization happen here. Output of this function must not be treated
/// as fully sanitized.
///
/// Runs in two linear scans. Removing a span can splice the text around it
/// into a new `<script` opening, and an opening may have no closing tag at
/// all, so any opening left after the first scan is escaped to `&lt;script`.
pub fn strip_scripts(raw_html: &str) -> String {
    let stripped = SCRIPT_SPAN.replace_all(raw_html, "");
    SCRIPT_OPENING.replace_all(&stripped, "&lt;$1").into_owned()
}

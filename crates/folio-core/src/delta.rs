//! Japanese character counting for writing-activity deltas.

use once_cell::sync::Lazy;
use regex::Regex;

/// Hiragana, katakana (full and half width), CJK ideographs and 々.
static JAPANESE_CHAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\x{3005}",
        r"\x{3040}-\x{309F}",  // hiragana
        r"\x{30A0}-\x{30FF}",  // katakana
        r"\x{FF66}-\x{FF9F}",  // half-width katakana
        r"\x{3400}-\x{4DBF}",  // CJK extension A
        r"\x{4E00}-\x{9FFF}",  // CJK unified ideographs
        r"\x{F900}-\x{FAFF}]", // CJK compatibility ideographs
    ))
    .unwrap()
});

/// Count Japanese-script characters in `text`. ASCII and punctuation are ignored.
pub fn count_japanese_chars(text: &str) -> i64 {
    JAPANESE_CHAR_REGEX.find_iter(text).count() as i64
}

/// Signed change in Japanese character count from `previous` to `next`.
///
/// A missing `previous` counts as zero characters.
pub fn japanese_char_delta(previous: Option<&str>, next: &str) -> i64 {
    count_japanese_chars(next) - previous.map(count_japanese_chars).unwrap_or(0)
}

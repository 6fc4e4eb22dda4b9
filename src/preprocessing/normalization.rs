use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Lowercases the input and strips its diacritics
pub fn normalize(input: &str) -> String {
    lazy_static! {
        static ref COMBINING_DIACRITICAL_MARKS: Regex = Regex::new("[\u{0300}-\u{036F}]+").unwrap();
    }

    COMBINING_DIACRITICAL_MARKS
        .replace_all(&input.nfd().collect::<String>(), "")
        .nfc()
        .collect::<String>()
        .to_lowercase()
}

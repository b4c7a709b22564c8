//! Text normalization helpers shared by the extractors.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Words kept lower-case inside a title-cased phrase (never at its start)
const MINOR_WORDS: &[&str] = &["of", "and", "at", "for", "the", "in", "on"];

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}

/// Capitalize one word, including segments after `-` and `'`
///
/// `o'brien-smith` becomes `O'Brien-Smith`.
pub fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut capitalize = true;

    for ch in word.chars() {
        if capitalize {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        capitalize = matches!(ch, '-' | '\'' | '\u{2019}');
    }

    out
}

/// Title-case a phrase, keeping connectives lower-case after the first word
/// and leaving all-caps acronyms alone
pub fn title_case_phrase(phrase: &str) -> String {
    collapse_whitespace(phrase)
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && MINOR_WORDS.contains(&lower.as_str()) {
                lower
            } else if is_acronym(word) {
                word.to_string()
            } else {
                title_case_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two or more letters, all upper-case (`CEO`, `HDFC`, `AI`)
pub fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

/// Clamp a byte offset down to the nearest char boundary
pub fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Clamp a byte offset up to the nearest char boundary
pub fn ceil_char_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// Bytes between two ranges; zero when they touch or overlap
pub fn span_distance(a: (usize, usize), b: (usize, usize)) -> usize {
    if a.1 <= b.0 {
        b.0 - a.1
    } else {
        a.0.saturating_sub(b.1)
    }
}

//! Person name validation and normalization
//!
//! Turns a raw recognizer span into the canonical name used as the key for
//! merging, scoring and deduplication, or explains why it was rejected.

use serde::{Deserialize, Serialize};

use crate::lexicon;
use crate::text::{collapse_whitespace, title_case_word};

/// Shortest accepted name, in characters, after honorifics are stripped
pub const MIN_NAME_CHARS: usize = 4;
/// Longest accepted name, in characters
pub const MAX_NAME_CHARS: usize = 40;
/// Fewest whitespace-separated tokens in a name
pub const MIN_NAME_TOKENS: usize = 2;
/// Most whitespace-separated tokens in a name
pub const MAX_NAME_TOKENS: usize = 5;

/// Why a span was not accepted as a person name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameRejection {
    Empty,
    TooShort,
    TooLong,
    InvalidCharacters,
    TokenCount,
    Capitalization,
    NoiseTerm,
}

impl NameRejection {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidCharacters => "invalid_characters",
            Self::TokenCount => "token_count",
            Self::Capitalization => "capitalization",
            Self::NoiseTerm => "noise_term",
        }
    }
}

impl std::fmt::Display for NameRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validate a raw span and return its canonical form
pub fn validate_name(raw: &str) -> Result<String, NameRejection> {
    let collapsed = collapse_whitespace(raw);
    let trimmed = collapsed.trim_matches(|c: char| !c.is_alphanumeric());
    let trimmed = trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("\u{2019}s"))
        .unwrap_or(trimmed);

    let mut tokens: Vec<&str> = trimmed.split_whitespace().collect();
    while tokens.first().is_some_and(|t| lexicon::is_name_prefix(t)) {
        tokens.remove(0);
    }
    while tokens.last().is_some_and(|t| lexicon::is_name_prefix(t)) {
        tokens.pop();
    }
    // Drop the comma left behind by "Smith, Jr."
    if let Some(last) = tokens.last_mut() {
        *last = last.trim_end_matches(',');
    }

    if tokens.is_empty() {
        return Err(NameRejection::Empty);
    }

    let name = tokens.join(" ");
    let length = name.chars().count();
    if length < MIN_NAME_CHARS {
        return Err(NameRejection::TooShort);
    }
    if length > MAX_NAME_CHARS {
        return Err(NameRejection::TooLong);
    }

    let allowed =
        |c: char| c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | '\u{2019}');
    if !name.chars().all(allowed) {
        return Err(NameRejection::InvalidCharacters);
    }

    if !(MIN_NAME_TOKENS..=MAX_NAME_TOKENS).contains(&tokens.len()) {
        return Err(NameRejection::TokenCount);
    }

    if !tokens
        .iter()
        .all(|t| t.chars().next().is_some_and(char::is_uppercase))
    {
        return Err(NameRejection::Capitalization);
    }

    if lexicon::is_invalid_term(&name)
        || tokens
            .iter()
            .any(|t| lexicon::is_noise_token(t) || lexicon::is_company_word(t))
    {
        return Err(NameRejection::NoiseTerm);
    }

    Ok(tokens
        .iter()
        .map(|t| title_case_word(t))
        .collect::<Vec<_>>()
        .join(" "))
}

/// Canonical name, or `None` when the span is not a plausible person name
pub fn normalize_name(raw: &str) -> Option<String> {
    validate_name(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_two_capitalized_tokens() {
        assert_eq!(
            normalize_name("Arvind Kejariwal").as_deref(),
            Some("Arvind Kejariwal")
        );
        assert_eq!(
            normalize_name("  Satya   Nadella ").as_deref(),
            Some("Satya Nadella")
        );
    }

    #[test]
    fn test_rejects_places_and_boilerplate() {
        assert_eq!(validate_name("Navi Mumbai"), Err(NameRejection::NoiseTerm));
        assert_eq!(validate_name("Breaking News"), Err(NameRejection::NoiseTerm));
    }

    #[test]
    fn test_rejects_single_token() {
        assert_eq!(validate_name("John"), Err(NameRejection::TokenCount));
        assert_eq!(validate_name("Mr. Nadella"), Err(NameRejection::TokenCount));
    }

    #[test]
    fn test_strips_honorifics() {
        assert_eq!(normalize_name("Dr. Jane Goodall").as_deref(), Some("Jane Goodall"));
        assert_eq!(
            normalize_name("Shri Narayana Murthy").as_deref(),
            Some("Narayana Murthy")
        );
        assert_eq!(
            normalize_name("Martin Luther King Jr.").as_deref(),
            Some("Martin Luther King")
        );
        assert_eq!(validate_name("Mr."), Err(NameRejection::Empty));
    }

    #[test]
    fn test_strips_possessive() {
        assert_eq!(normalize_name("Sundar Pichai's").as_deref(), Some("Sundar Pichai"));
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(validate_name("Al B"), Ok("Al B".to_string()));
        assert_eq!(validate_name("Ab"), Err(NameRejection::TooShort));
        let long = "Bartholomew Montgomery Featherstonehaugh Wolfeschlegel";
        assert_eq!(validate_name(long), Err(NameRejection::TooLong));
    }

    #[test]
    fn test_rejects_digits_and_punctuation() {
        assert_eq!(validate_name("Agent 47 Smith"), Err(NameRejection::InvalidCharacters));
        assert_eq!(validate_name("Jane & Doe"), Err(NameRejection::InvalidCharacters));
    }

    #[test]
    fn test_requires_capitalized_tokens() {
        assert_eq!(validate_name("satya Nadella"), Err(NameRejection::Capitalization));
    }

    #[test]
    fn test_rejects_organization_words() {
        assert_eq!(validate_name("Acme Technologies"), Err(NameRejection::NoiseTerm));
    }

    #[test]
    fn test_retitles_tokens() {
        assert_eq!(normalize_name("SATYA NADELLA").as_deref(), Some("Satya Nadella"));
        assert_eq!(
            normalize_name("Conan O'brien-Smith").as_deref(),
            Some("Conan O'Brien-Smith")
        );
    }

    #[test]
    fn test_too_many_tokens() {
        assert_eq!(
            validate_name("Ana Bo Cy Di Ed Fa"),
            Err(NameRejection::TokenCount)
        );
    }
}

//! Prospector Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout Prospector:
//! - Recognizer output (entity spans) and context windows
//! - The `Profile` record emitted by the extraction pipeline
//! - Common error types
//! - The `EntityRecognizer` trait implemented by NER backends
//! - Configuration management

pub mod config;

pub use config::{
    ConfigError, ExtractionConfig, LoggingConfig, ProspectorConfig, QuoteScope, WindowStrategy,
    DEFAULT_MIN_CONFIDENCE, DEFAULT_WINDOW_CHARS,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for Prospector operations
#[derive(Error, Debug)]
pub enum ProspectorError {
    #[error("Recognizer error: {0}")]
    Recognizer(String),

    #[error("Invalid entity span {start}..{end} for text of length {len}")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("Entity span {start}..{end} reads {found:?}, not {expected:?}")]
    SpanTextMismatch {
        start: usize,
        end: usize,
        expected: String,
        found: String,
    },

    #[error("Extraction exceeded time budget of {budget_ms} ms")]
    BudgetExceeded { budget_ms: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ProspectorError>;

// ============================================================================
// Recognizer Output
// ============================================================================

/// Entity kinds a recognizer may tag a span with
///
/// Deserialization accepts the common label sets (`PER`, `ORGANIZATION`,
/// `GPE`, ...) and maps anything unrecognized to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum EntityKind {
    Person,
    Org,
    Loc,
    Other,
}

impl EntityKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Loc => "LOC",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for EntityKind {
    fn from(label: String) -> Self {
        label.parse().unwrap_or(Self::Other)
    }
}

impl std::str::FromStr for EntityKind {
    type Err = ProspectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "PERSON" | "PER" => Ok(Self::Person),
            "ORG" | "ORGANIZATION" => Ok(Self::Org),
            "LOC" | "LOCATION" | "GPE" => Ok(Self::Loc),
            "OTHER" | "MISC" => Ok(Self::Other),
            _ => Err(ProspectorError::Recognizer(format!(
                "unknown entity kind: {s}"
            ))),
        }
    }
}

/// A span tagged by a named-entity recognizer
///
/// Offsets are byte offsets into the text handed to the recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    pub text: String,
    pub kind: EntityKind,
    #[serde(alias = "start_offset")]
    pub start: usize,
    #[serde(alias = "end_offset")]
    pub end: usize,
}

impl RawEntity {
    /// Create a new entity span
    pub fn new(text: impl Into<String>, kind: EntityKind, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            start,
            end,
        }
    }

    /// Check that the span lies inside `text` on character boundaries and
    /// that `text[start..end]` reads as the entity text, ignoring whitespace runs
    pub fn check_span(&self, text: &str) -> Result<()> {
        let valid = self.start <= self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end);

        if !valid {
            return Err(ProspectorError::InvalidSpan {
                start: self.start,
                end: self.end,
                len: text.len(),
            });
        }

        let found = &text[self.start..self.end];
        if !found.split_whitespace().eq(self.text.split_whitespace()) {
            return Err(ProspectorError::SpanTextMismatch {
                start: self.start,
                end: self.end,
                expected: self.text.clone(),
                found: found.to_string(),
            });
        }

        Ok(())
    }
}

/// A slice of the source document surrounding an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ContextWindow {
    /// Whether the byte range `start..end` of the source document lies inside this window
    pub fn covers(&self, start: usize, end: usize) -> bool {
        start >= self.start && end <= self.end
    }
}

// ============================================================================
// Profile
// ============================================================================

/// A professional profile assembled from one or more mentions of a person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub designation: Option<String>,
    pub company: Option<String>,
    pub quotes: Vec<String>,
    /// Extraction reliability in `[0, 1]`
    pub confidence: f32,
    pub search_reference: String,
}

impl Profile {
    /// Whether the profile carries anything beyond a bare name
    pub fn has_details(&self) -> bool {
        self.designation.is_some() || self.company.is_some() || !self.quotes.is_empty()
    }
}

/// Sort profiles by confidence, highest first, keeping document order for ties
pub fn sort_by_confidence(profiles: &mut [Profile]) {
    profiles.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}

// ============================================================================
// Traits
// ============================================================================

/// Named-entity recognizer backend
pub trait EntityRecognizer: Send + Sync {
    /// Tag entity spans in `text`
    fn recognize(&self, text: &str) -> Result<Vec<RawEntity>>;

    /// Sentence boundaries as byte ranges, in document order
    fn sentences(&self, text: &str) -> Vec<(usize, usize)> {
        split_sentences(text)
    }
}

/// Punctuation-based sentence segmentation
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes) followed by
/// whitespace or end of text. Leading whitespace is not part of a sentence.
pub fn split_sentences(text: &str) -> Vec<(usize, usize)> {
    let mut sentences = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if start.is_none() {
            if ch.is_whitespace() {
                continue;
            }
            start = Some(idx);
        }

        if matches!(ch, '.' | '!' | '?') {
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if matches!(next, '"' | '\'' | '\u{201D}' | '\u{2019}' | ')') {
                    end = next_idx + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if at_boundary {
                if let Some(s) = start.take() {
                    sentences.push((s, end));
                }
            }
        }
    }

    if let Some(s) = start {
        let end = text.trim_end().len();
        if end > s {
            sentences.push((s, end));
        }
    }

    sentences
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, confidence: f32) -> Profile {
        Profile {
            name: name.to_string(),
            designation: None,
            company: None,
            quotes: Vec::new(),
            confidence,
            search_reference: String::new(),
        }
    }

    #[test]
    fn test_entity_kind_parse() {
        assert_eq!("person".parse::<EntityKind>().unwrap(), EntityKind::Person);
        assert_eq!("GPE".parse::<EntityKind>().unwrap(), EntityKind::Loc);
        assert_eq!(EntityKind::Org.to_string(), "ORG");
        assert!("weather".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_entity_kind_deserialize() {
        let entity: RawEntity = serde_json::from_str(
            r#"{"text": "Acme", "kind": "ORGANIZATION", "start_offset": 0, "end_offset": 4}"#,
        )
        .unwrap();
        assert_eq!(entity.kind, EntityKind::Org);
        assert_eq!(entity.end, 4);

        let other: RawEntity =
            serde_json::from_str(r#"{"text": "1999", "kind": "DATE", "start": 0, "end": 4}"#)
                .unwrap();
        assert_eq!(other.kind, EntityKind::Other);
    }

    #[test]
    fn test_check_span() {
        let text = "Zoë Kravitz spoke.";
        assert!(RawEntity::new("Zoë Kravitz", EntityKind::Person, 0, 12)
            .check_span(text)
            .is_ok());
        // Inside the two-byte 'ë'
        assert!(RawEntity::new("Zo", EntityKind::Person, 0, 3)
            .check_span(text)
            .is_err());
        assert!(RawEntity::new("x", EntityKind::Person, 5, 2)
            .check_span(text)
            .is_err());
        assert!(RawEntity::new("x", EntityKind::Person, 0, 99)
            .check_span(text)
            .is_err());
    }

    #[test]
    fn test_check_span_text_must_match_offsets() {
        let text = "The weather was fine.\nJane   Doe\tspoke.";
        assert!(matches!(
            RawEntity::new("Ravi Kumar", EntityKind::Person, 0, 11).check_span(text),
            Err(ProspectorError::SpanTextMismatch { start: 0, end: 11, .. })
        ));

        // Whitespace runs inside the span are not significant
        let start = text.find("Jane").unwrap();
        let end = text.find("\tspoke").unwrap();
        assert!(RawEntity::new("Jane Doe", EntityKind::Person, start, end)
            .check_span(text)
            .is_ok());
    }

    #[test]
    fn test_split_sentences() {
        let text = "First one. Second \"quoted!\" Third?  Trailing";
        let sentences = split_sentences(text);
        let slices: Vec<&str> = sentences.iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(
            slices,
            vec!["First one.", "Second \"quoted!\"", "Third?", "Trailing"]
        );
    }

    #[test]
    fn test_split_sentences_keeps_decimals() {
        let text = "Revenue grew 3.5 percent. Shares rose.";
        assert_eq!(split_sentences(text).len(), 2);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_sort_by_confidence_is_stable() {
        let mut profiles = vec![profile("A", 0.5), profile("B", 0.9), profile("C", 0.5)];
        sort_by_confidence(&mut profiles);
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_profile_has_details() {
        let mut p = profile("Jane Doe", 0.0);
        assert!(!p.has_details());
        p.quotes.push("We are hiring engineers.".to_string());
        assert!(p.has_details());
    }
}

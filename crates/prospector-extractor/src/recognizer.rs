//! Entity recognizers
//!
//! Two implementations of [`EntityRecognizer`]:
//! - Heuristic: capitalization runs classified with the lexicon, so the
//!   pipeline works without an external model
//! - Precomputed: spans produced elsewhere (an NER service) and loaded as JSON

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use prospector_core::{EntityKind, EntityRecognizer, ProspectorError, RawEntity, Result};

use crate::lexicon;

// ============================================================================
// Heuristic recognizer
// ============================================================================

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}[\p{L}\p{M}'’\-]*\.?").expect("static regex is valid"));

/// Words that open a capitalized run without belonging to the entity
const RUN_OPENERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "he", "she", "we", "they", "in",
    "on", "at", "to", "for", "from", "by", "with", "and", "but", "or", "so", "if", "when",
    "after", "before", "according", "meanwhile", "however", "today", "yesterday", "tomorrow",
];

/// Title words that precede a name in running text ("Chief Executive Jane Doe")
const TITLE_TOKENS: &[&str] = &[
    "chief", "executive", "officer", "senior", "vice", "president", "managing", "director",
    "founder", "co-founder", "cofounder", "head", "general", "manager", "chairman",
    "chairwoman", "chairperson", "partner", "principal", "lead", "analyst", "economist",
    "minister", "spokesperson", "spokesman", "spokeswoman", "professor",
];

/// Lower-case words after which a lone capitalized word is read as an organization
const ORG_CUES: &[&str] = &["of", "at", "joined", "from", "for", "with"];

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl Token<'_> {
    fn bare(&self) -> String {
        self.text.trim_end_matches('.').to_lowercase()
    }

    fn is_capitalized(&self) -> bool {
        let mut chars = self.text.chars();
        chars.next().is_some_and(char::is_uppercase) && !self.is_acronym()
    }

    fn is_acronym(&self) -> bool {
        let letters: Vec<char> = self.text.chars().filter(|c| c.is_alphabetic()).collect();
        letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
    }

    /// Whether a run may continue past this token
    fn allows_continuation(&self) -> bool {
        if !self.text.ends_with('.') {
            return true;
        }
        let bare = self.bare();
        bare.chars().count() == 1 || lexicon::is_name_prefix(&bare)
    }
}

/// Capitalization-based recognizer
///
/// Consecutive capitalized words separated only by whitespace form a run.
/// Leading openers and titles are dropped; the remainder is tagged ORG when
/// it ends in a company word, LOC when it names a known place, and PERSON
/// otherwise. A lone capitalized word right after "of"/"at"/"joined"... is
/// tagged ORG.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRecognizer;

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn classify(
        &self,
        text: &str,
        run: &[Token<'_>],
        previous: Option<&Token<'_>>,
    ) -> Option<RawEntity> {
        let first = run.first()?;
        let last = run.last()?;
        let start = first.start;
        let abbreviated = matches!(
            last.bare().as_str(),
            "inc" | "ltd" | "corp" | "co" | "pvt" | "pte"
        );
        let end = if last.text.ends_with('.') && !abbreviated {
            last.end - 1
        } else {
            last.end
        };
        let span = &text[start..end];

        let kind = if run.len() >= 2 && lexicon::is_company_word(last.text) {
            EntityKind::Org
        } else if is_place(&span.to_lowercase()) || run.iter().any(|t| is_place(&t.bare())) {
            EntityKind::Loc
        } else if run.len() >= 2 {
            EntityKind::Person
        } else if previous.is_some_and(|p| ORG_CUES.contains(&p.bare().as_str())) {
            EntityKind::Org
        } else {
            return None;
        };

        Some(RawEntity::new(span, kind, start, end))
    }
}

fn is_place(word: &str) -> bool {
    lexicon::PLACE_TERMS.contains(&word)
}

fn is_run_opener(token: &Token<'_>) -> bool {
    let bare = token.bare();
    RUN_OPENERS.contains(&bare.as_str())
        || TITLE_TOKENS.contains(&bare.as_str())
        || lexicon::is_name_prefix(&bare)
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RawEntity>> {
        let tokens: Vec<Token<'_>> = WORD_RE
            .find_iter(text)
            .map(|m| Token {
                text: m.as_str(),
                start: m.start(),
                end: m.end(),
            })
            .collect();

        let mut entities = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if !tokens[i].is_capitalized() {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < tokens.len()
                && tokens[j].is_capitalized()
                && tokens[j - 1].allows_continuation()
                && text[tokens[j - 1].end..tokens[j].start]
                    .chars()
                    .all(char::is_whitespace)
            {
                j += 1;
            }

            let mut from = i;
            while from < j && is_run_opener(&tokens[from]) {
                from += 1;
            }
            if from < j {
                let previous = from.checked_sub(1).map(|p| &tokens[p]);
                if let Some(entity) = self.classify(text, &tokens[from..j], previous) {
                    entities.push(entity);
                }
            }
            i = j;
        }

        Ok(entities)
    }
}

// ============================================================================
// Precomputed recognizer
// ============================================================================

/// Replays spans produced by an external recognizer
///
/// Spans are validated against the text on every call.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedRecognizer {
    entities: Vec<RawEntity>,
}

impl PrecomputedRecognizer {
    pub fn new(entities: Vec<RawEntity>) -> Self {
        Self { entities }
    }

    /// Parse a JSON array of `{text, kind, start, end}` objects
    pub fn from_json(json: &str) -> Result<Self> {
        let entities: Vec<RawEntity> = serde_json::from_str(json)
            .map_err(|e| ProspectorError::Recognizer(format!("invalid entity JSON: {}", e)))?;
        Ok(Self::new(entities))
    }

    /// Load a JSON entity file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ProspectorError::Recognizer(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityRecognizer for PrecomputedRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RawEntity>> {
        for entity in &self.entities {
            entity.check_span(text)?;
        }
        Ok(self.entities.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<(String, EntityKind)> {
        HeuristicRecognizer::new()
            .recognize(text)
            .unwrap()
            .into_iter()
            .map(|e| (e.text, e.kind))
            .collect()
    }

    #[test]
    fn test_person_and_cued_org() {
        let text = r#"Satya Nadella, CEO of Microsoft, said "AI will transform every industry.""#;
        assert_eq!(
            spans(text),
            vec![
                ("Satya Nadella".to_string(), EntityKind::Person),
                ("Microsoft".to_string(), EntityKind::Org),
            ]
        );
    }

    #[test]
    fn test_offsets_match_text() {
        let text = "Yesterday Priya Nair joined Acme Technologies in Pune.";
        let entities = HeuristicRecognizer::new().recognize(text).unwrap();
        for entity in &entities {
            assert_eq!(&text[entity.start..entity.end], entity.text);
        }
        let kinds: Vec<EntityKind> = entities.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EntityKind::Person, EntityKind::Org, EntityKind::Loc]);
    }

    #[test]
    fn test_places_and_headlines() {
        let text = "Breaking News: Navi Mumbai reports heavy rain today.";
        assert_eq!(
            spans(text),
            vec![
                ("Breaking News".to_string(), EntityKind::Person),
                ("Navi Mumbai".to_string(), EntityKind::Loc),
            ]
        );
    }

    #[test]
    fn test_titles_and_openers_are_dropped() {
        let text = "The Chief Executive Jane Doe spoke. Dr. Ravi Kumar agreed.";
        let names: Vec<String> = spans(text).into_iter().map(|(t, _)| t).collect();
        assert_eq!(names, vec!["Jane Doe", "Ravi Kumar"]);
    }

    #[test]
    fn test_punctuation_breaks_runs() {
        let text = "Jane Doe, Ravi Kumar and Priya Nair attended.";
        let names: Vec<String> = spans(text).into_iter().map(|(t, _)| t).collect();
        assert_eq!(names, vec!["Jane Doe", "Ravi Kumar", "Priya Nair"]);
    }

    #[test]
    fn test_precomputed_from_json() {
        let json = r#"[
            {"text": "Jane Doe", "kind": "PERSON", "start": 0, "end": 8},
            {"text": "Acme", "kind": "ORGANIZATION", "start_offset": 19, "end_offset": 23}
        ]"#;
        let recognizer = PrecomputedRecognizer::from_json(json).unwrap();
        assert_eq!(recognizer.len(), 2);

        let entities = recognizer.recognize("Jane Doe is CFO at Acme.").unwrap();
        assert_eq!(entities[1].kind, EntityKind::Org);
        assert_eq!(entities[1].start, 19);
    }

    #[test]
    fn test_precomputed_rejects_out_of_range_spans() {
        let recognizer =
            PrecomputedRecognizer::new(vec![RawEntity::new("Jane Doe", EntityKind::Person, 0, 80)]);
        assert!(matches!(
            recognizer.recognize("Jane Doe"),
            Err(ProspectorError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_precomputed_bad_json() {
        assert!(matches!(
            PrecomputedRecognizer::from_json("{not json"),
            Err(ProspectorError::Recognizer(_))
        ));
    }
}

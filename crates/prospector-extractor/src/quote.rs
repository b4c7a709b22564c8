//! Quote extraction
//!
//! Finds direct and reported speech attributed to a canonical name.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::lexicon;

/// Double-quoted span, straight or curly
const QUOTED: &str = r#"["“](?P<quote>[^"“”]+)["”]"#;

/// Optional appositive between a name and its speech verb: `, CEO of Acme,`
const APPOSITIVE: &str = r#"(?:\s*,[^"“”,]{1,80},)?"#;

/// Reported speech up to the end of its sentence
const REPORTED: &str = r#"(?P<quote>[^"“”.!?]+[.!?])"#;

static ALPHA_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Alphabetic}{3,}").expect("static regex is valid"));

static URL_OR_EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:https?://|www\.)\S+|\S+@\S+\.\S+)$").expect("static regex is valid")
});

/// Accepted quote length, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for QuoteLimits {
    fn default() -> Self {
        Self {
            min_chars: 10,
            max_chars: 500,
        }
    }
}

/// Attribution pattern shapes, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotePattern {
    /// `"..." said <name>`
    QuoteThenSpeaker,
    /// `<name>, ..., said: "..."`
    SpeakerThenQuote,
    /// `According to <name>, "..."`
    AccordingToQuoted,
    /// `<name>: "..."`
    SpeakerColon,
    /// `<name> said that ...`
    ReportedSpeech,
    /// `According to <name>, ...`
    AccordingToReported,
}

impl QuotePattern {
    pub const ALL: [QuotePattern; 6] = [
        Self::QuoteThenSpeaker,
        Self::SpeakerThenQuote,
        Self::AccordingToQuoted,
        Self::SpeakerColon,
        Self::ReportedSpeech,
        Self::AccordingToReported,
    ];

    fn template(&self, name: &str) -> String {
        match self {
            Self::QuoteThenSpeaker => format!(r"{QUOTED}\s*,?\s*(?:said|says|stated)\s+{name}\b"),
            Self::SpeakerThenQuote => format!(
                r"\b{name}{APPOSITIVE}\s+(?:said|says|stated|added|noted|explained)(?:\s+that)?\s*[:,]?\s*{QUOTED}"
            ),
            Self::AccordingToQuoted => format!(r"\baccording\s+to\s+{name}\s*,\s*{QUOTED}"),
            Self::SpeakerColon => format!(r"\b{name}\s*:\s*{QUOTED}"),
            Self::ReportedSpeech => format!(
                r"\b{name}{APPOSITIVE}\s+(?:said|says|stated|added|noted)\s+(?:that\s+)?{REPORTED}"
            ),
            Self::AccordingToReported => format!(r"\baccording\s+to\s+{name}\s*,\s*{REPORTED}"),
        }
    }
}

/// Quote extractor with shared length limits
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteExtractor {
    limits: QuoteLimits,
}

impl QuoteExtractor {
    /// Create an extractor with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom limits
    pub fn with_limits(limits: QuoteLimits) -> Self {
        Self { limits }
    }

    /// Compile the attribution patterns for one canonical name
    pub fn patterns_for(&self, name: &str) -> SpeakerPatterns {
        let escaped = regex::escape(name).replace(' ', r"\s+");
        let patterns = QuotePattern::ALL
            .iter()
            .filter_map(|p| {
                RegexBuilder::new(&p.template(&escaped))
                    .case_insensitive(true)
                    .build()
                    .ok()
            })
            .collect();

        SpeakerPatterns {
            patterns,
            limits: self.limits,
        }
    }

    /// Quotes attributed to `name` in `text`
    pub fn extract(&self, text: &str, name: &str) -> Vec<String> {
        self.patterns_for(name).extract(text)
    }

    /// Whether a captured quote passes length and content checks
    pub fn is_valid_quote(&self, quote: &str) -> bool {
        is_valid_quote(quote, self.limits)
    }
}

/// Compiled attribution patterns for one speaker
#[derive(Debug, Clone)]
pub struct SpeakerPatterns {
    patterns: Vec<Regex>,
    limits: QuoteLimits,
}

impl SpeakerPatterns {
    /// First accepted quote per pattern, case-insensitively unique
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut quotes = Vec::new();

        for regex in &self.patterns {
            let accepted = regex
                .captures_iter(text)
                .filter_map(|caps| caps.name("quote"))
                .map(|m| clean_quote(m.as_str()))
                .find(|q| is_valid_quote(q, self.limits));

            if let Some(quote) = accepted {
                if seen.insert(quote.to_lowercase()) {
                    quotes.push(quote);
                }
            }
        }

        quotes
    }
}

fn clean_quote(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '“' | '”'))
        .to_string()
}

fn is_valid_quote(quote: &str, limits: QuoteLimits) -> bool {
    let length = quote.chars().count();
    length >= limits.min_chars
        && length <= limits.max_chars
        && ALPHA_RUN_RE.is_match(quote)
        && !URL_OR_EMAIL_RE.is_match(quote)
        && !lexicon::contains_boilerplate(quote)
}

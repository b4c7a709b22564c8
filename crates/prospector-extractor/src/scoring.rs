//! Confidence scoring
//!
//! Additive point groups, each capped, normalized into `[0, 1]`.

use prospector_core::DEFAULT_MIN_CONFIDENCE;

use crate::lexicon;
use crate::name::MIN_NAME_TOKENS;

/// Highest attainable point total
pub const MAX_POINTS: u32 = 8;

const MAX_CONTEXT_POINTS: u32 = 2;

// ============================================================================
// Context signals
// ============================================================================

/// Contextual cues found around a mention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextSignals {
    pub role_indicator: bool,
    pub company_indicator: bool,
    pub tenure: bool,
    pub location: bool,
}

impl ContextSignals {
    /// Detect signal words in a window (whole words, any case)
    pub fn detect(window: &str) -> Self {
        let lower = window.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .filter(|w| !w.is_empty())
            .collect();
        let any_of = |list: &[&str]| words.iter().any(|w| list.contains(w));

        Self {
            role_indicator: any_of(lexicon::ROLE_INDICATORS),
            company_indicator: any_of(lexicon::COMPANY_INDICATORS),
            tenure: any_of(lexicon::TENURE_WORDS),
            location: any_of(lexicon::LOCATION_WORDS),
        }
    }

    /// Combine signals from another mention
    pub fn merge(&mut self, other: ContextSignals) {
        self.role_indicator |= other.role_indicator;
        self.company_indicator |= other.company_indicator;
        self.tenure |= other.tenure;
        self.location |= other.location;
    }

    /// Number of signals present
    pub fn count(&self) -> u32 {
        [
            self.role_indicator,
            self.company_indicator,
            self.tenure,
            self.location,
        ]
        .iter()
        .filter(|&&flag| flag)
        .count() as u32
    }
}

// ============================================================================
// Scorer
// ============================================================================

/// Fields of a candidate profile, as seen by the scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreInput<'a> {
    pub name: &'a str,
    pub designation: Option<&'a str>,
    pub company: Option<&'a str>,
    pub quote_count: usize,
    pub signals: ContextSignals,
}

/// Point-based confidence scorer with an acceptance threshold
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceScorer {
    min_confidence: f32,
}

impl ConfidenceScorer {
    /// Create a scorer with the given acceptance threshold
    pub fn new(min_confidence: f32) -> Self {
        Self {
            min_confidence: min_confidence.clamp(0.0, 1.0),
        }
    }

    /// Acceptance threshold
    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Raw point total, capped at [`MAX_POINTS`]
    pub fn points(&self, input: &ScoreInput<'_>) -> u32 {
        let total = name_points(input.name)
            + designation_points(input.designation)
            + company_points(input.company)
            + u32::from(input.quote_count > 0)
            + input.signals.count().min(MAX_CONTEXT_POINTS);
        total.min(MAX_POINTS)
    }

    /// Normalized confidence in `[0, 1]`
    pub fn score(&self, input: &ScoreInput<'_>) -> f32 {
        self.points(input) as f32 / MAX_POINTS as f32
    }

    /// Whether a score clears the threshold
    pub fn accepts(&self, score: f32) -> bool {
        score >= self.min_confidence
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CONFIDENCE)
    }
}

fn name_points(name: &str) -> u32 {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let multi_token = tokens.len() >= MIN_NAME_TOKENS;
    let capitalized = !tokens.is_empty()
        && tokens.iter().all(|t| {
            let mut chars = t.chars();
            chars.next().is_some_and(char::is_uppercase) && !chars.all(char::is_uppercase)
        });
    u32::from(multi_token) + u32::from(capitalized)
}

fn designation_points(designation: Option<&str>) -> u32 {
    match designation {
        Some(d) if !d.trim().is_empty() => {
            let detailed = d.split_whitespace().count() > 1 || lexicon::is_standard_designation(d);
            1 + u32::from(detailed)
        }
        _ => 0,
    }
}

fn company_points(company: Option<&str>) -> u32 {
    match company {
        Some(c) if !c.trim().is_empty() => {
            let detailed = c.split_whitespace().count() > 1 || lexicon::has_company_suffix(c);
            1 + u32::from(detailed)
        }
        _ => 0,
    }
}

//! Profile assembly
//!
//! Runs the recognizer once per document, then for every PERSON mention:
//! validate the name, cut a context window, extract designation, company and
//! quotes, and merge the result into one draft per canonical name. Drafts are
//! finalized in order of first mention: completeness check, scoring,
//! deduplication.
//!
//! When a window holds several titles or companies, the one inside the
//! mention's own sentence and closest to it is taken.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use url::Url;

use prospector_core::{
    ContextWindow, EntityKind, EntityRecognizer, ExtractionConfig, Profile, ProspectorError,
    QuoteScope, RawEntity, Result,
};

use crate::company::{self, CompanyCategory, CompanyExtractor};
use crate::context::ContextWindowBuilder;
use crate::dedup::Deduplicator;
use crate::designation::DesignationExtractor;
use crate::name::{validate_name, NameRejection};
use crate::quote::{QuoteExtractor, QuoteLimits, SpeakerPatterns};
use crate::scoring::{ConfidenceScorer, ContextSignals, ScoreInput};
use crate::text::span_distance;

const SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Most designation words carried into the search query
const MAX_TITLE_TERMS: usize = 3;

// ============================================================================
// Results
// ============================================================================

/// Diagnostic counters for one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// PERSON mentions seen
    pub candidates: usize,
    /// Mentions whose name failed validation, by reason
    pub rejected_names: BTreeMap<NameRejection, usize>,
    /// Names with no designation, company, or quote
    pub incomplete: usize,
    /// Names scored below the threshold
    pub below_threshold: usize,
    /// Profiles already emitted earlier in the session
    pub duplicates: usize,
    /// Profiles emitted
    pub emitted: usize,
}

impl ExtractionStats {
    /// Total rejected mentions across all reasons
    pub fn rejected_total(&self) -> usize {
        self.rejected_names.values().sum()
    }
}

/// Profiles emitted by one run, in order of first mention
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub profiles: Vec<Profile>,
    pub stats: ExtractionStats,
}

// ============================================================================
// Drafts
// ============================================================================

/// Per-name accumulator across mentions
#[derive(Debug)]
struct Draft {
    name: String,
    designation: Option<String>,
    company: Option<String>,
    quotes: Vec<String>,
    seen_quotes: HashSet<String>,
    signals: ContextSignals,
}

impl Draft {
    fn new(name: String) -> Self {
        Self {
            name,
            designation: None,
            company: None,
            quotes: Vec::new(),
            seen_quotes: HashSet::new(),
            signals: ContextSignals::default(),
        }
    }

    /// First designation and company win; quotes are unioned
    fn merge(&mut self, mention: Mention) {
        if self.designation.is_none() {
            self.designation = mention.designation;
        }
        if self.company.is_none() {
            self.company = mention.company;
        }
        self.add_quotes(mention.quotes);
        self.signals.merge(mention.signals);
    }

    fn add_quotes(&mut self, quotes: Vec<String>) {
        for quote in quotes {
            if self.seen_quotes.insert(quote.to_lowercase()) {
                self.quotes.push(quote);
            }
        }
    }

    fn has_details(&self) -> bool {
        self.designation.is_some() || self.company.is_some() || !self.quotes.is_empty()
    }
}

/// Ranks hits around a mention: own sentence first, then by byte distance
struct Proximity {
    mention: (usize, usize),
    sentence: Option<(usize, usize)>,
}

impl Proximity {
    fn new(entity: &RawEntity, sentences: &[(usize, usize)]) -> Self {
        Self {
            mention: (entity.start, entity.end),
            sentence: sentences
                .iter()
                .copied()
                .find(|&(s, e)| entity.start >= s && entity.start < e),
        }
    }

    /// Sort key for a hit at document offsets `start..end`; lower is closer
    fn rank(&self, start: usize, end: usize) -> (bool, usize) {
        let outside = self.sentence.is_some_and(|(s, e)| start < s || end > e);
        (outside, span_distance(self.mention, (start, end)))
    }
}

/// What one mention contributed
struct Mention {
    designation: Option<String>,
    company: Option<String>,
    quotes: Vec<String>,
    signals: ContextSignals,
}

// ============================================================================
// Assembler
// ============================================================================

/// Orchestrates extraction for one document at a time
pub struct ProfileAssembler {
    recognizer: Arc<dyn EntityRecognizer>,
    config: ExtractionConfig,
    windows: ContextWindowBuilder,
    designations: DesignationExtractor,
    companies: CompanyExtractor,
    quotes: QuoteExtractor,
    scorer: ConfidenceScorer,
}

impl ProfileAssembler {
    /// Create an assembler over a recognizer
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, config: ExtractionConfig) -> Self {
        let quotes = QuoteExtractor::with_limits(QuoteLimits {
            min_chars: config.quote_min_chars,
            max_chars: config.quote_max_chars,
        });
        Self {
            recognizer,
            windows: ContextWindowBuilder::new(config.window),
            designations: DesignationExtractor::new(),
            companies: CompanyExtractor::new(),
            quotes,
            scorer: ConfidenceScorer::new(config.min_confidence),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract profiles from `text`
    ///
    /// Profiles already registered in `dedup` are skipped, and every emitted
    /// profile is registered, when deduplication is enabled.
    pub fn assemble(&self, text: &str, dedup: &mut Deduplicator) -> Result<Extraction> {
        if text.trim().is_empty() {
            return Ok(Extraction::default());
        }

        let started = Instant::now();
        let mut stats = ExtractionStats::default();

        let mut entities = self.recognizer.recognize(text)?;
        for entity in &entities {
            entity.check_span(text)?;
        }
        entities.sort_by_key(|e| (e.start, e.end));

        let sentences = self.recognizer.sentences(text);

        let orgs: Vec<&RawEntity> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Org)
            .collect();

        let names: Vec<(&RawEntity, std::result::Result<String, NameRejection>)> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Person)
            .map(|e| (e, validate_name(&e.text)))
            .collect();
        let person_names: HashSet<String> = names
            .iter()
            .filter_map(|(_, name)| name.as_ref().ok().map(|n| n.to_lowercase()))
            .collect();

        let mut drafts: Vec<Draft> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut speakers: HashMap<String, SpeakerPatterns> = HashMap::new();

        for (entity, validated) in names {
            self.check_budget(started)?;
            stats.candidates += 1;

            let name = match validated {
                Ok(name) => name,
                Err(reason) => {
                    tracing::debug!("Rejected name {:?}: {}", entity.text, reason);
                    *stats.rejected_names.entry(reason).or_default() += 1;
                    continue;
                }
            };

            let window = self
                .windows
                .build(text, entity.start, entity.end, &sentences)?;
            let patterns = speakers
                .entry(name.clone())
                .or_insert_with(|| self.quotes.patterns_for(&name));

            let quotes = match self.config.quote_scope {
                QuoteScope::Window => patterns.extract(&window.text),
                QuoteScope::Document if !index.contains_key(&name) => patterns.extract(text),
                QuoteScope::Document => Vec::new(),
            };

            let proximity = Proximity::new(entity, &sentences);
            let mention = Mention {
                designation: self.find_designation(&window, &proximity),
                company: self.find_company(&window, &proximity, &orgs, &person_names),
                quotes,
                signals: ContextSignals::detect(&window.text),
            };

            let slot = *index.entry(name.clone()).or_insert_with(|| {
                drafts.push(Draft::new(name.clone()));
                drafts.len() - 1
            });
            drafts[slot].merge(mention);
        }

        let mut profiles = Vec::new();
        for draft in drafts {
            if !draft.has_details() {
                tracing::debug!("Dropping {}: no designation, company, or quote", draft.name);
                stats.incomplete += 1;
                continue;
            }

            let confidence = self.scorer.score(&ScoreInput {
                name: &draft.name,
                designation: draft.designation.as_deref(),
                company: draft.company.as_deref(),
                quote_count: draft.quotes.len(),
                signals: draft.signals,
            });
            if !self.scorer.accepts(confidence) {
                tracing::debug!(
                    "Dropping {}: confidence {:.2} below threshold",
                    draft.name,
                    confidence
                );
                stats.below_threshold += 1;
                continue;
            }

            if self.config.dedup_enabled {
                if dedup.is_duplicate(&draft.name, draft.company.as_deref()) {
                    stats.duplicates += 1;
                    continue;
                }
                dedup.register(&draft.name, draft.company.as_deref());
            }

            let search_reference = search_reference(
                &draft.name,
                draft.company.as_deref(),
                draft.designation.as_deref(),
            )?;
            profiles.push(Profile {
                name: draft.name,
                designation: draft.designation,
                company: draft.company,
                quotes: draft.quotes,
                confidence,
                search_reference,
            });
        }

        stats.emitted = profiles.len();
        tracing::info!(
            "Extracted {} profiles from {} candidates \
             ({} rejected, {} incomplete, {} below threshold, {} duplicates)",
            stats.emitted,
            stats.candidates,
            stats.rejected_total(),
            stats.incomplete,
            stats.below_threshold,
            stats.duplicates
        );

        Ok(Extraction { profiles, stats })
    }

    fn check_budget(&self, started: Instant) -> Result<()> {
        match self.config.time_budget_ms {
            Some(budget_ms) if started.elapsed() >= Duration::from_millis(budget_ms) => {
                Err(ProspectorError::BudgetExceeded { budget_ms })
            }
            _ => Ok(()),
        }
    }

    /// Closest title to the mention
    fn find_designation(&self, window: &ContextWindow, proximity: &Proximity) -> Option<String> {
        self.designations
            .candidates(&window.text)
            .into_iter()
            .min_by_key(|m| proximity.rank(window.start + m.start, window.start + m.end))
            .map(|m| m.title)
    }

    /// Closest pattern-matched company, falling back to the closest ORG span
    fn find_company(
        &self,
        window: &ContextWindow,
        proximity: &Proximity,
        orgs: &[&RawEntity],
        person_names: &HashSet<String>,
    ) -> Option<String> {
        let nearby: Vec<&RawEntity> = orgs
            .iter()
            .copied()
            .filter(|org| window.covers(org.start, org.end))
            .collect();
        let known: Vec<&str> = nearby.iter().map(|org| org.text.as_str()).collect();
        let is_person = |candidate: &str| person_names.contains(&candidate.to_lowercase());

        let matched = self
            .companies
            .candidates(&window.text, &known)
            .into_iter()
            .filter(|c| !is_person(c.name.as_str()))
            .min_by_key(|c| proximity.rank(window.start + c.start, window.start + c.end));
        if let Some(found) = matched {
            return Some(found.name);
        }

        let mut nearest = nearby;
        nearest.sort_by_key(|org| (proximity.rank(org.start, org.end), org.start));
        nearest.into_iter().find_map(|org| {
            let known = [org.text.as_str()];
            company::accept_candidate(&org.text, CompanyCategory::Prepositional, &known)
                .filter(|c| !is_person(c.as_str()))
        })
    }
}

/// LinkedIn search URL for a profile: name, company and key title terms
pub fn search_reference(
    name: &str,
    company: Option<&str>,
    designation: Option<&str>,
) -> Result<String> {
    let mut terms = vec!["LinkedIn", name];
    if let Some(company) = company {
        terms.push(company);
    }
    if let Some(designation) = designation {
        terms.extend(
            designation
                .split_whitespace()
                .filter(|w| w.chars().any(char::is_alphanumeric))
                .filter(|w| !matches!(w.to_lowercase().as_str(), "of" | "and" | "the" | "for"))
                .take(MAX_TITLE_TERMS),
        );
    }
    let query = terms.join(" ");

    let url = Url::parse_with_params(SEARCH_ENDPOINT, &[("q", query.as_str())])
        .map_err(anyhow::Error::from)?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::PrecomputedRecognizer;
    use prospector_core::WindowStrategy;

    fn assembler(entities: Vec<RawEntity>) -> ProfileAssembler {
        ProfileAssembler::new(
            Arc::new(PrecomputedRecognizer::new(entities)),
            ExtractionConfig::default(),
        )
    }

    fn person(text: &str, name: &str) -> RawEntity {
        let start = text.find(name).unwrap();
        RawEntity::new(name, EntityKind::Person, start, start + name.len())
    }

    fn org(text: &str, name: &str) -> RawEntity {
        let start = text.find(name).unwrap();
        RawEntity::new(name, EntityKind::Org, start, start + name.len())
    }

    #[test]
    fn test_search_reference() {
        let url = search_reference("Satya Nadella", Some("Microsoft"), Some("CEO")).unwrap();
        assert_eq!(
            url,
            "https://www.google.com/search?q=LinkedIn+Satya+Nadella+Microsoft+CEO"
        );

        let url = search_reference("Jane Doe", None, Some("Head of Engineering")).unwrap();
        assert_eq!(
            url,
            "https://www.google.com/search?q=LinkedIn+Jane+Doe+Head+Engineering"
        );

        let url =
            search_reference("Ravi Kumar", Some("Acme & Sons"), Some("Founder & CEO")).unwrap();
        assert!(url.contains("Acme+%26+Sons"));
        assert!(url.ends_with("Founder+CEO"));
    }

    #[test]
    fn test_empty_text() {
        let extraction = assembler(Vec::new())
            .assemble("   \n", &mut Deduplicator::new())
            .unwrap();
        assert!(extraction.profiles.is_empty());
        assert_eq!(extraction.stats, ExtractionStats::default());
    }

    #[test]
    fn test_rejections_are_counted() {
        let text = "John met Navi Mumbai officials.";
        let entities = vec![person(text, "John"), person(text, "Navi Mumbai")];
        let extraction = assembler(entities)
            .assemble(text, &mut Deduplicator::new())
            .unwrap();
        assert!(extraction.profiles.is_empty());
        assert_eq!(extraction.stats.candidates, 2);
        assert_eq!(extraction.stats.rejected_names[&NameRejection::TokenCount], 1);
        assert_eq!(extraction.stats.rejected_names[&NameRejection::NoiseTerm], 1);
    }

    #[test]
    fn test_org_span_fallback() {
        let text = "Jane Doe, a veteran of many boardrooms, now advises Zentrix on strategy.";
        let entities = vec![person(text, "Jane Doe"), org(text, "Zentrix")];
        let extraction = assembler(entities)
            .assemble(text, &mut Deduplicator::new())
            .unwrap();
        assert_eq!(extraction.profiles.len(), 1);
        assert_eq!(extraction.profiles[0].company.as_deref(), Some("Zentrix"));
    }

    #[test]
    fn test_own_sentence_wins_over_closer_neighbor() {
        let text = "Ravi Kumar is the CEO of Globex Inc. Jane Doe, who spoke next, \
                    is a director at Zentrix Corp.";
        let entities = vec![person(text, "Ravi Kumar"), person(text, "Jane Doe")];
        let extraction = assembler(entities)
            .assemble(text, &mut Deduplicator::new())
            .unwrap();

        let jane = extraction
            .profiles
            .iter()
            .find(|p| p.name == "Jane Doe")
            .unwrap();
        assert_eq!(jane.designation.as_deref(), Some("Director"));
        assert_eq!(jane.company.as_deref(), Some("Zentrix Corp"));

        let ravi = extraction
            .profiles
            .iter()
            .find(|p| p.name == "Ravi Kumar")
            .unwrap();
        assert_eq!(ravi.designation.as_deref(), Some("CEO"));
        assert_eq!(ravi.company.as_deref(), Some("Globex Inc"));
    }

    #[test]
    fn test_person_is_not_a_company() {
        let text = "Jane Doe met with Ravi Kumar, CFO at the time.";
        let entities = vec![person(text, "Jane Doe"), person(text, "Ravi Kumar")];
        let extraction = assembler(entities)
            .assemble(text, &mut Deduplicator::new())
            .unwrap();
        for profile in &extraction.profiles {
            assert_ne!(profile.company.as_deref(), Some("Ravi Kumar"));
        }
    }

    #[test]
    fn test_incomplete_and_below_threshold() {
        let text = "Jane Doe went for a walk. Later, Ravi Kumar spoke for Zentrix.";
        let entities = vec![
            person(text, "Jane Doe"),
            person(text, "Ravi Kumar"),
            org(text, "Zentrix"),
        ];
        let config = ExtractionConfig {
            window: WindowStrategy::Sentences(0),
            ..ExtractionConfig::default()
        };
        let assembler = ProfileAssembler::new(
            Arc::new(PrecomputedRecognizer::new(entities)),
            config,
        );
        let extraction = assembler.assemble(text, &mut Deduplicator::new()).unwrap();
        assert!(extraction.profiles.is_empty());
        assert_eq!(extraction.stats.incomplete, 1);
        assert_eq!(extraction.stats.below_threshold, 1);
    }

    #[test]
    fn test_budget_exceeded() {
        let text = "Jane Doe, CFO of Zentrix, spoke.";
        let config = ExtractionConfig {
            time_budget_ms: Some(0),
            ..ExtractionConfig::default()
        };
        let assembler = ProfileAssembler::new(
            Arc::new(PrecomputedRecognizer::new(vec![person(text, "Jane Doe")])),
            config,
        );
        let result = assembler.assemble(text, &mut Deduplicator::new());
        assert!(matches!(
            result,
            Err(ProspectorError::BudgetExceeded { budget_ms: 0 })
        ));
    }

    #[test]
    fn test_invalid_span_propagates() {
        let entities = vec![RawEntity::new("Jane Doe", EntityKind::Person, 5, 2)];
        let result = assembler(entities).assemble("Jane Doe spoke.", &mut Deduplicator::new());
        assert!(matches!(result, Err(ProspectorError::InvalidSpan { .. })));
    }

    #[test]
    fn test_span_text_mismatch_propagates() {
        let text = "The weather was fine. Ravi Kumar, CFO of Zentrix Corp, spoke.";
        let entities = vec![RawEntity::new("Ravi Kumar", EntityKind::Person, 0, 11)];
        let result = assembler(entities).assemble(text, &mut Deduplicator::new());
        assert!(matches!(
            result,
            Err(ProspectorError::SpanTextMismatch { start: 0, end: 11, .. })
        ));
    }
}

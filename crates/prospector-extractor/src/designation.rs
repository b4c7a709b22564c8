//! Designation extraction
//!
//! A declarative bank of title patterns grouped by seniority tier. Every rule
//! runs over the window; overlapping hits resolve to the longest span, and
//! survivors are reported in tier order and standardized through the lexicon.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::lexicon;
use crate::text::{collapse_whitespace, title_case_phrase};

// ============================================================================
// Rule table
// ============================================================================

/// Seniority tiers, most senior first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityTier {
    CSuite,
    SeniorManagement,
    TechnicalLeadership,
    DomainRole,
    BusinessFunction,
}

/// One title pattern (matched case-insensitively)
#[derive(Debug, Clone, Copy)]
pub struct DesignationRule {
    pub tier: SeniorityTier,
    pub pattern: &'static str,
}

const fn rule(tier: SeniorityTier, pattern: &'static str) -> DesignationRule {
    DesignationRule { tier, pattern }
}

/// Title patterns in priority order
pub const DESIGNATION_RULES: &[DesignationRule] = &[
    // C-suite
    rule(
        SeniorityTier::CSuite,
        r"\b(?:co-?founder|founder)\s+and\s+(?:ceo|chief\s+executive(?:\s+officer)?)\b",
    ),
    rule(
        SeniorityTier::CSuite,
        r"\bchief\s+(?:executive|operating|financial|technology|technical|marketing|information(?:\s+security)?|product|revenue|data|security|human\s+resources|people|strategy|digital|commercial)\s+officer\b",
    ),
    rule(SeniorityTier::CSuite, r"\bchief\s+executive\b"),
    rule(
        SeniorityTier::CSuite,
        r"\b(?-i:CEO|CFO|CTO|COO|CMO|CIO|CPO|CRO|CDO|CHRO|CISO)\b",
    ),
    rule(SeniorityTier::CSuite, r"\b(?:co[-\s]?founder|founder)\b"),
    rule(SeniorityTier::CSuite, r"\bchair(?:man|woman|person)\b"),
    rule(SeniorityTier::CSuite, r"\bmanaging\s+director\b"),
    rule(SeniorityTier::CSuite, r"\bpresident\b"),
    // Senior management
    rule(
        SeniorityTier::SeniorManagement,
        r"\b(?:senior|executive)\s+vice[\s-]president\b",
    ),
    rule(SeniorityTier::SeniorManagement, r"\bvice[\s-]president\b"),
    rule(SeniorityTier::SeniorManagement, r"\b(?-i:SVP|EVP|VP)\b"),
    rule(SeniorityTier::SeniorManagement, r"\bgeneral\s+manager\b"),
    rule(
        SeniorityTier::SeniorManagement,
        r"\b(?:(?:senior|executive|associate)\s+)?director\b",
    ),
    rule(
        SeniorityTier::SeniorManagement,
        r"\bhead\s+of\s+(?:engineering|product|marketing|sales|operations|research|technology|finance|design|strategy|communications|partnerships|growth|data|people|hr|ai|security|business\s+development)\b",
    ),
    rule(
        SeniorityTier::SeniorManagement,
        r"\b(?:managing|general|senior)\s+partner\b",
    ),
    // Technical leadership
    rule(
        SeniorityTier::TechnicalLeadership,
        r"\b(?:principal|staff|lead|senior|chief)\s+(?:(?:software|research|data)\s+)?(?:engineer|architect|scientist|developer|researcher)\b",
    ),
    rule(SeniorityTier::TechnicalLeadership, r"\bengineering\s+manager\b"),
    rule(SeniorityTier::TechnicalLeadership, r"\btech(?:nical)?\s+lead\b"),
    rule(
        SeniorityTier::TechnicalLeadership,
        r"\b(?:software|solutions|cloud|enterprise)\s+architect\b",
    ),
    // Domain roles
    rule(
        SeniorityTier::DomainRole,
        r"\b(?:data|research|applied)\s+scientist\b",
    ),
    rule(
        SeniorityTier::DomainRole,
        r"\b(?:(?:chief|senior)\s+)?economist\b",
    ),
    rule(
        SeniorityTier::DomainRole,
        r"\b(?:(?:senior|lead|principal)\s+)?analyst\b",
    ),
    rule(
        SeniorityTier::DomainRole,
        r"\b(?:(?:assistant|associate)\s+)?professor\b",
    ),
    rule(SeniorityTier::DomainRole, r"\bspokes(?:person|man|woman)\b"),
    // Business functions
    rule(
        SeniorityTier::BusinessFunction,
        r"\b(?:product|project|program|marketing|sales|account|operations|regional|country|brand)\s+manager\b",
    ),
    rule(
        SeniorityTier::BusinessFunction,
        r"\b(?:sales|marketing|business\s+development)\s+(?:lead|executive|head)\b",
    ),
    rule(SeniorityTier::BusinessFunction, r"\bconsultant\b"),
];

// ============================================================================
// Extractor
// ============================================================================

/// A standardized title found in a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignationMatch {
    pub title: String,
    pub tier: SeniorityTier,
    /// Byte offsets into the searched window
    pub start: usize,
    pub end: usize,
}

/// Pattern-bank designation extractor
pub struct DesignationExtractor {
    rules: Vec<(Regex, SeniorityTier)>,
}

impl DesignationExtractor {
    /// Compile the default rule table
    pub fn new() -> Self {
        Self::with_rules(DESIGNATION_RULES)
    }

    /// Compile a custom rule table
    pub fn with_rules(rules: &[DesignationRule]) -> Self {
        let rules = rules
            .iter()
            .filter_map(|r| {
                match RegexBuilder::new(r.pattern).case_insensitive(true).build() {
                    Ok(regex) => Some((regex, r.tier)),
                    Err(e) => {
                        tracing::warn!("Skipping invalid designation pattern {}: {}", r.pattern, e);
                        None
                    }
                }
            })
            .collect();
        Self { rules }
    }

    /// Number of compiled rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Compiled patterns with their tier, in priority order
    pub fn rules(&self) -> impl Iterator<Item = (&str, SeniorityTier)> + '_ {
        self.rules.iter().map(|(regex, tier)| (regex.as_str(), *tier))
    }

    /// Standardized designations in tier order, case-insensitively unique
    pub fn extract(&self, window: &str) -> Vec<String> {
        self.extract_matches(window)
            .into_iter()
            .map(|m| m.title)
            .collect()
    }

    /// Standardized designations with their tier and position, unique by title
    pub fn extract_matches(&self, window: &str) -> Vec<DesignationMatch> {
        let mut seen = HashSet::new();
        self.candidates(window)
            .into_iter()
            .filter(|m| seen.insert(m.title.to_lowercase()))
            .collect()
    }

    /// Every non-overlapping title occurrence in tier order, repeats included
    pub fn candidates(&self, window: &str) -> Vec<DesignationMatch> {
        // (rule index, start, end)
        let mut hits: Vec<(usize, usize, usize)> = Vec::new();
        for (idx, (regex, _)) in self.rules.iter().enumerate() {
            for mat in regex.find_iter(window) {
                hits.push((idx, mat.start(), mat.end()));
            }
        }

        // Longest span wins an overlap; ties go to the earlier rule
        hits.sort_by(|a, b| {
            (b.2 - b.1)
                .cmp(&(a.2 - a.1))
                .then(a.0.cmp(&b.0))
                .then(a.1.cmp(&b.1))
        });
        let mut accepted: Vec<(usize, usize, usize)> = Vec::new();
        for hit in hits {
            let overlaps = accepted.iter().any(|&(_, s, e)| hit.1 < e && s < hit.2);
            if !overlaps {
                accepted.push(hit);
            }
        }
        accepted.sort_by_key(|&(idx, start, _)| (idx, start));

        accepted
            .into_iter()
            .filter_map(|(idx, start, end)| {
                let title = standardize(&window[start..end]);
                if title.is_empty() {
                    return None;
                }
                Some(DesignationMatch {
                    title,
                    tier: self.rules[idx].1,
                    start,
                    end,
                })
            })
            .collect()
    }
}

impl Default for DesignationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a raw title onto its standard form, title-casing unknown titles
pub fn standardize(raw: &str) -> String {
    let cleaned = collapse_whitespace(raw.trim_matches(|c: char| !c.is_alphanumeric()));
    match lexicon::designation_alias(&cleaned) {
        Some(standard) => standard.to_string(),
        None => title_case_phrase(&cleaned),
    }
}

// ============================================================================
// Tests
// ============================================================================

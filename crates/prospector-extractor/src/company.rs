//! Company extraction
//!
//! Finds organization names near a mention: after a title (`CEO of X`), in a
//! possessive before a title (`X's chief ...`), after a preposition
//! (`at X Inc.`), or ending in an industry keyword (`X Bank`).

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon;
use crate::text::collapse_whitespace;

/// Longest accepted company name, in words
pub const MAX_COMPANY_WORDS: usize = 6;

/// One capitalized word; interior dots only between letters (`A.I`)
const CAP_TOKEN: &str = r"[A-Z](?:[A-Za-z0-9&'\-]|\.[A-Za-z])*";

/// Suffix introduced by a comma: `Acme, Inc.`
const COMMA_SUFFIX: &str = r"(?:,\s+(?:Inc|Ltd|LLC|Corp|PLC)\b\.?)?";

const TITLE_WORDS: &str = r"(?i:CEO|CFO|CTO|COO|CMO|CIO|co-?founder|founder|president|chair(?:man|woman|person)|director|head|VP|vice\s+president|manager|partner|officer|executive|engineer|scientist|analyst|economist|spokes(?:person|man|woman)|lead)";

const INDUSTRY_TAIL: &str = r"(?:Bank|Bancorp|Healthcare|Technologies|Technology|Pharmaceuticals|Pharma|Motors|Airlines|Airways|Insurance|Energy|Capital|Financial|Securities|Media|Foods|Telecom|Communications|Software|Networks|Robotics|Biotech|Therapeutics|Logistics|Consulting|Studios|Entertainment|Retail|Foundation|Institute|University)";

static QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[^"]*"|“[^”]*”"#).expect("static regex is valid"));

static LEADING_WORDS: &[&str] = &["at", "of", "with", "for", "joined", "from", "the"];

static KEPT_ABBREVIATIONS: &[&str] = &["inc", "ltd", "corp", "co", "pvt", "pte"];

// ============================================================================
// Rule table
// ============================================================================

/// How a company candidate was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyCategory {
    /// Right after a title: `CEO of X`
    TitleAnchored,
    /// Possessive before a title: `X's chief ...`
    Possessive,
    /// After a preposition: `at X`, `joined X`
    Prepositional,
    /// Ends in an industry keyword: `X Bank`
    IndustryKeyword,
}

impl CompanyCategory {
    /// Anchored categories accept single-word names
    pub fn is_anchored(&self) -> bool {
        matches!(self, Self::TitleAnchored | Self::Possessive)
    }
}

/// One company pattern; the `company` group holds the candidate
#[derive(Debug, Clone)]
pub struct CompanyRule {
    pub category: CompanyCategory,
    pub pattern: String,
}

fn cap_phrase(max_extra: usize) -> String {
    format!(r"{CAP_TOKEN}(?:\s+(?:of\s+|&\s+)?{CAP_TOKEN}){{0,{max_extra}}}{COMMA_SUFFIX}")
}

/// Company patterns in priority order
pub fn company_rules() -> Vec<CompanyRule> {
    let phrase = cap_phrase(4);
    vec![
        CompanyRule {
            category: CompanyCategory::TitleAnchored,
            pattern: format!(
                r"\b{TITLE_WORDS}\b\s*,?\s+(?i:at|of|for|with)\s+(?:the\s+)?(?P<company>{phrase})"
            ),
        },
        CompanyRule {
            category: CompanyCategory::Possessive,
            pattern: format!(
                r"\b(?P<company>{phrase})(?:'s|’s)\s+(?:(?i:chief|senior|executive|managing|general)\s+)?{TITLE_WORDS}\b"
            ),
        },
        CompanyRule {
            category: CompanyCategory::Prepositional,
            pattern: format!(
                r"\b(?i:at|with|for|joined|from|of)\s+(?:the\s+)?(?P<company>{phrase})"
            ),
        },
        CompanyRule {
            category: CompanyCategory::IndustryKeyword,
            pattern: format!(
                r"\b(?P<company>{CAP_TOKEN}(?:\s+(?:of\s+|&\s+)?{CAP_TOKEN}){{0,3}}\s+{INDUSTRY_TAIL})\b"
            ),
        },
    ]
}

// ============================================================================
// Extractor
// ============================================================================

/// A validated company name found in a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyMatch {
    pub name: String,
    pub category: CompanyCategory,
    /// Byte offsets of the whole matched phrase, anchor included
    pub start: usize,
    pub end: usize,
}

/// Pattern-bank company extractor
pub struct CompanyExtractor {
    rules: Vec<(Regex, CompanyCategory)>,
}

impl CompanyExtractor {
    /// Compile the default rule table
    pub fn new() -> Self {
        let rules = company_rules()
            .into_iter()
            .filter_map(|r| match Regex::new(&r.pattern) {
                Ok(regex) => Some((regex, r.category)),
                Err(e) => {
                    tracing::warn!("Skipping invalid company pattern {:?}: {}", r.category, e);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Number of compiled rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Validated company names, case-insensitively unique
    pub fn extract(&self, window: &str) -> Vec<String> {
        self.extract_with_orgs(window, &[])
    }

    /// Like [`extract`](Self::extract), also accepting single-word names
    /// the recognizer tagged as organizations
    pub fn extract_with_orgs(&self, window: &str, known_orgs: &[&str]) -> Vec<String> {
        self.extract_matches(window, known_orgs)
            .into_iter()
            .map(|m| m.name)
            .collect()
    }

    /// Validated company names with the category that found them, unique by name
    pub fn extract_matches(&self, window: &str, known_orgs: &[&str]) -> Vec<CompanyMatch> {
        let mut seen = HashSet::new();
        self.candidates(window, known_orgs)
            .into_iter()
            .filter(|m| seen.insert(m.name.to_lowercase()))
            .collect()
    }

    /// Every validated match in rule order, repeats included
    pub fn candidates(&self, window: &str, known_orgs: &[&str]) -> Vec<CompanyMatch> {
        let mut matches = Vec::new();

        for (regex, category) in &self.rules {
            for caps in regex.captures_iter(window) {
                let (Some(whole), Some(raw)) = (caps.get(0), caps.name("company")) else {
                    continue;
                };
                let Some(name) = accept_candidate(raw.as_str(), *category, known_orgs) else {
                    continue;
                };
                matches.push(CompanyMatch {
                    name,
                    category: *category,
                    start: whole.start(),
                    end: whole.end(),
                });
            }
        }

        matches
    }
}

impl Default for CompanyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip quoted text, leading prepositions/articles and trailing punctuation
pub fn clean_candidate(raw: &str) -> String {
    let unquoted = QUOTED_RE.replace_all(raw, " ");
    let collapsed = collapse_whitespace(&unquoted);

    let mut words: Vec<&str> = collapsed.split(' ').filter(|w| !w.is_empty()).collect();
    while words
        .first()
        .is_some_and(|w| LEADING_WORDS.contains(&w.to_lowercase().as_str()))
    {
        words.remove(0);
    }

    let mut name = words.join(" ");
    name = name.trim_end_matches(&[',', ';', ':'][..]).to_string();
    for possessive in ["'s", "\u{2019}s"] {
        if let Some(stripped) = name.strip_suffix(possessive) {
            name = stripped.to_string();
        }
    }
    if let Some(stripped) = name.strip_suffix('.') {
        let last = stripped
            .rsplit(' ')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if !KEPT_ABBREVIATIONS.contains(&last.as_str()) {
            name = stripped.to_string();
        }
    }
    name
}

/// Clean and validate a raw candidate
///
/// Accepted names start upper-case, are not noise, and either carry a
/// company suffix, span two or more words, were found by an anchored
/// pattern, or match an organization span from the recognizer.
pub fn accept_candidate(
    raw: &str,
    category: CompanyCategory,
    known_orgs: &[&str],
) -> Option<String> {
    let name = clean_candidate(raw);
    if !name.chars().next().is_some_and(char::is_uppercase) {
        return None;
    }

    let words: Vec<&str> = name.split(' ').collect();
    if words.len() > MAX_COMPANY_WORDS {
        return None;
    }
    if lexicon::is_invalid_term(&name) || words.iter().all(|w| lexicon::is_noise_token(w)) {
        return None;
    }
    // A bare "Group" or "CEO" is not an organization
    if words.len() == 1
        && (lexicon::is_company_word(&name) || lexicon::designation_alias(&name).is_some())
    {
        return None;
    }

    let is_known_org = known_orgs
        .iter()
        .any(|org| org.trim().eq_ignore_ascii_case(&name));

    if lexicon::has_company_suffix(&name)
        || words.len() >= 2
        || category.is_anchored()
        || is_known_org
    {
        Some(name)
    } else {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_compile() {
        let extractor = CompanyExtractor::new();
        assert_eq!(extractor.rule_count(), company_rules().len());
    }

    #[test]
    fn test_title_anchored_single_word() {
        let extractor = CompanyExtractor::new();
        let matches = extractor.extract_matches(
            r#"Satya Nadella, CEO of Microsoft, said "AI will transform every industry.""#,
            &[],
        );
        assert_eq!(matches[0].name, "Microsoft");
        assert_eq!(matches[0].category, CompanyCategory::TitleAnchored);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_prepositional_needs_suffix_or_two_words() {
        let extractor = CompanyExtractor::new();
        assert_eq!(
            extractor.extract("She works at Acme Corp. on weekends."),
            vec!["Acme Corp"]
        );
        assert_eq!(
            extractor.extract("He joined Tata Consultancy Services in 2019."),
            vec!["Tata Consultancy Services"]
        );
        assert!(extractor.extract("She lives with Priya near the park.").is_empty());
    }

    #[test]
    fn test_known_orgs_accept_single_word() {
        let extractor = CompanyExtractor::new();
        let text = "She spent a decade at Infosys before moving on.";
        assert!(extractor.extract(text).is_empty());
        assert_eq!(extractor.extract_with_orgs(text, &["Infosys"]), vec!["Infosys"]);
    }

    #[test]
    fn test_industry_keyword() {
        let extractor = CompanyExtractor::new();
        assert_eq!(
            extractor.extract("Analysts expect HDFC Bank to report strong results."),
            vec!["HDFC Bank"]
        );
    }

    #[test]
    fn test_candidates_carry_anchor_offsets() {
        let extractor = CompanyExtractor::new();
        let window = "Jane Doe, CFO of Zentrix Corp, met Ravi Kumar, CEO of Globex Inc. today";
        let anchored: Vec<CompanyMatch> = extractor
            .candidates(window, &[])
            .into_iter()
            .filter(|m| m.category == CompanyCategory::TitleAnchored)
            .collect();
        assert_eq!(anchored.len(), 2);
        assert_eq!(anchored[0].name, "Zentrix Corp");
        assert!(window[anchored[0].start..anchored[0].end].starts_with("CFO"));
        assert!(window[anchored[1].start..anchored[1].end].starts_with("CEO"));
    }

    #[test]
    fn test_possessive() {
        let extractor = CompanyExtractor::new();
        let matches = extractor.extract_matches("Google's chief scientist Jeff Dean", &[]);
        assert_eq!(matches[0].name, "Google");
        assert_eq!(matches[0].category, CompanyCategory::Possessive);
    }

    #[test]
    fn test_connectives_inside_names() {
        let extractor = CompanyExtractor::new();
        assert_eq!(
            extractor.extract("an economist at Bank of America said"),
            vec!["Bank of America"]
        );
        assert_eq!(
            extractor.extract("a director at Johnson & Johnson"),
            vec!["Johnson & Johnson"]
        );
    }

    #[test]
    fn test_rejects_places_and_bare_suffixes() {
        let extractor = CompanyExtractor::new();
        assert!(extractor.extract("the manager of Navi Mumbai").is_empty());
        assert!(extractor.extract("the CEO of Mumbai").is_empty());
        assert!(extractor.extract("a partner at Group").is_empty());
    }

    #[test]
    fn test_clean_candidate() {
        assert_eq!(clean_candidate("at the Acme Corp,"), "Acme Corp");
        assert_eq!(clean_candidate("Acme Inc."), "Acme Inc.");
        assert_eq!(clean_candidate("Globex."), "Globex");
        assert_eq!(clean_candidate("Microsoft's"), "Microsoft");
        assert_eq!(clean_candidate(r#"Initech "the best""#), "Initech");
    }

    #[test]
    fn test_comma_suffix() {
        let extractor = CompanyExtractor::new();
        assert_eq!(
            extractor.extract("a consultant with Initech, Inc. since 2001"),
            vec!["Initech, Inc."]
        );
    }
}

//! Static lexicon tables
//!
//! Noise terms, honorifics, designation aliases, company suffixes and the
//! contextual signal vocabularies used by the extractors and the scorer.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Minimum normalized Levenshtein similarity for a token to count as a noise term
pub const NOISE_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Tokens shorter than this only match noise terms exactly
const FUZZY_MIN_LEN: usize = 5;

// ============================================================================
// Invalid / noise terms
// ============================================================================

/// Place names that recognizers commonly mistake for people
pub const PLACE_TERMS: &[&str] = &[
    "mumbai", "navi", "delhi", "new delhi", "navi mumbai", "bangalore", "bengaluru",
    "chennai", "kolkata", "hyderabad", "pune", "noida", "gurgaon", "gurugram", "ahmedabad",
    "jaipur", "lucknow", "thane", "india", "china", "japan", "germany", "france", "britain",
    "america", "europe", "asia", "africa", "london", "tokyo", "beijing", "shanghai",
    "singapore", "dubai", "california", "texas", "new york", "silicon valley", "maharashtra",
    "karnataka", "gujarat", "kerala",
];

/// Weekdays, months and relative dates
pub const TIME_TERMS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "july", "september", "october", "november", "december", "today",
    "yesterday", "tomorrow", "weekend",
];

/// Generic nouns and news-site vocabulary
pub const GENERIC_TERMS: &[&str] = &[
    "news", "breaking", "latest", "update", "updates", "headline", "headlines", "story",
    "stories", "report", "reports", "new", "live", "video", "photo", "photos", "gallery",
    "subscribe", "newsletter", "advertisement", "sponsored", "trending", "editorial",
    "opinion", "click", "login", "weather", "rain", "government", "ministry", "police",
    "court", "reporter", "staff", "desk", "bureau",
];

/// Multi-word boilerplate that is never a name or a quote
pub const BOILERPLATE_PHRASES: &[&str] = &[
    "breaking news", "latest news", "top stories", "read more", "click here", "find out",
    "sign up", "privacy policy", "terms of service", "all rights reserved", "follow us",
];

/// Every invalid term, lower-cased
pub static INVALID_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    PLACE_TERMS
        .iter()
        .chain(TIME_TERMS)
        .chain(GENERIC_TERMS)
        .chain(BOILERPLATE_PHRASES)
        .copied()
        .collect()
});

/// Single-word invalid terms eligible for fuzzy matching
static FUZZY_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    INVALID_TERMS
        .iter()
        .copied()
        .filter(|term| !term.contains(' ') && term.len() >= FUZZY_MIN_LEN)
        .collect()
});

/// Whether `phrase` (any case) is itself an invalid term
pub fn is_invalid_term(phrase: &str) -> bool {
    let lower = phrase.trim().to_lowercase();
    INVALID_TERMS.contains(lower.as_str())
}

/// Whether a single token is noise, exactly or by close spelling
pub fn is_noise_token(token: &str) -> bool {
    let lower = token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if lower.is_empty() {
        return false;
    }
    if INVALID_TERMS.contains(lower.as_str()) {
        return true;
    }
    if lower.chars().count() < FUZZY_MIN_LEN {
        return false;
    }

    FUZZY_TERMS
        .iter()
        .any(|term| strsim::normalized_levenshtein(&lower, term) >= NOISE_SIMILARITY_THRESHOLD)
}

/// Site-chrome words that mark scraped text as boilerplate rather than speech
pub const BOILERPLATE_WORDS: &[&str] = &[
    "subscribe", "newsletter", "advertisement", "sponsored", "login", "unsubscribe",
];

static BOILERPLATE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    BOILERPLATE_WORDS
        .iter()
        .chain(BOILERPLATE_PHRASES)
        .copied()
        .collect()
});

/// Longest boilerplate phrase, in words
const MAX_PHRASE_WORDS: usize = 3;

/// Whether free text contains boilerplate vocabulary as a whole word or phrase
///
/// Only site chrome counts here; ordinary words such as "new" or "today" are
/// fine inside running text even though they are invalid as names.
pub fn contains_boilerplate(text: &str) -> bool {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .collect();

    (1..=MAX_PHRASE_WORDS).any(|n| {
        words
            .windows(n)
            .any(|run| BOILERPLATE.contains(run.join(" ").as_str()))
    })
}

// ============================================================================
// Name prefixes
// ============================================================================

/// Honorifics and titles stripped from either end of a name span
pub const NAME_PREFIXES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "professor", "sir", "dame", "lord", "lady",
    "shri", "sri", "smt", "hon", "rev", "fr", "capt", "col", "gen", "lt", "sgt", "president",
    "senator", "sen", "rep", "governor", "gov", "minister", "judge", "justice", "chairman",
    "jr", "sr", "ii", "iii", "phd",
];

static NAME_PREFIX_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NAME_PREFIXES.iter().copied().collect());

/// Whether `token` is an honorific, ignoring case and a trailing period
pub fn is_name_prefix(token: &str) -> bool {
    let lower = token.trim_end_matches('.').to_lowercase();
    NAME_PREFIX_SET.contains(lower.as_str())
}

// ============================================================================
// Designations
// ============================================================================

/// Designation aliases (lower-case, single-spaced) and their standard form
pub const DESIGNATION_MAP: &[(&str, &str)] = &[
    ("chief executive officer", "CEO"),
    ("chief executive", "CEO"),
    ("ceo", "CEO"),
    ("chief financial officer", "CFO"),
    ("cfo", "CFO"),
    ("chief technology officer", "CTO"),
    ("chief technical officer", "CTO"),
    ("cto", "CTO"),
    ("chief operating officer", "COO"),
    ("coo", "COO"),
    ("chief marketing officer", "CMO"),
    ("cmo", "CMO"),
    ("chief information officer", "CIO"),
    ("cio", "CIO"),
    ("chief product officer", "CPO"),
    ("cpo", "CPO"),
    ("chief revenue officer", "CRO"),
    ("cro", "CRO"),
    ("chief data officer", "CDO"),
    ("cdo", "CDO"),
    ("chief human resources officer", "CHRO"),
    ("chro", "CHRO"),
    ("chief information security officer", "CISO"),
    ("chief security officer", "CSO"),
    ("ciso", "CISO"),
    ("vice president", "VP"),
    ("vp", "VP"),
    ("senior vice president", "SVP"),
    ("svp", "SVP"),
    ("executive vice president", "EVP"),
    ("evp", "EVP"),
    ("managing director", "Managing Director"),
    ("md", "Managing Director"),
    ("founder", "Founder"),
    ("co-founder", "Co-Founder"),
    ("cofounder", "Co-Founder"),
    ("co founder", "Co-Founder"),
    ("founder and ceo", "Founder & CEO"),
    ("co-founder and ceo", "Co-Founder & CEO"),
    ("chairman", "Chairperson"),
    ("chairwoman", "Chairperson"),
    ("chairperson", "Chairperson"),
    ("president", "President"),
    ("general manager", "General Manager"),
    ("gm", "General Manager"),
];

static DESIGNATION_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| DESIGNATION_MAP.iter().copied().collect());

/// Standard form for a designation alias, if one is known
pub fn designation_alias(designation: &str) -> Option<&'static str> {
    let key = designation
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    DESIGNATION_INDEX.get(key.as_str()).copied()
}

/// Whether `designation` is already one of the standard forms
pub fn is_standard_designation(designation: &str) -> bool {
    DESIGNATION_MAP
        .iter()
        .any(|(_, standard)| *standard == designation)
}

// ============================================================================
// Companies
// ============================================================================

/// Legal-entity and structural suffixes of organization names
pub const COMPANY_SUFFIXES: &[&str] = &[
    "inc", "incorporated", "ltd", "limited", "corp", "corporation", "llc", "llp", "plc",
    "co", "company", "gmbh", "ag", "sa", "nv", "bv", "pvt", "pte", "technologies", "group",
    "holdings", "labs", "ventures", "partners", "systems", "solutions", "industries",
    "enterprises", "international",
];

/// Industry words that mark the end of an organization name
pub const INDUSTRY_KEYWORDS: &[&str] = &[
    "bank", "bancorp", "healthcare", "technologies", "technology", "pharmaceuticals",
    "pharma", "motors", "airlines", "airways", "insurance", "energy", "capital", "financial",
    "securities", "media", "foods", "telecom", "communications", "software", "networks",
    "robotics", "biotech", "therapeutics", "logistics", "consulting", "studios",
    "entertainment", "retail", "foundation", "institute", "university",
];

static COMPANY_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    COMPANY_SUFFIXES
        .iter()
        .chain(INDUSTRY_KEYWORDS)
        .copied()
        .collect()
});

/// Whether `token` is a company suffix or industry keyword, ignoring case and periods
pub fn is_company_word(token: &str) -> bool {
    let lower = token.trim_matches(|c: char| c == '.' || c == ',').to_lowercase();
    COMPANY_WORDS.contains(lower.as_str())
}

/// Whether the last word of `name` is a company suffix or industry keyword
pub fn has_company_suffix(name: &str) -> bool {
    name.split_whitespace().last().is_some_and(is_company_word)
}

// ============================================================================
// Contextual signals
// ============================================================================

/// Verbs describing someone holding or taking a role
pub const ROLE_INDICATORS: &[&str] = &[
    "leads", "led", "heads", "headed", "runs", "ran", "manages", "managed", "oversees",
    "oversaw", "serves", "served", "appointed", "named", "promoted", "hired", "founded",
    "co-founded", "joined", "chairs", "steers", "helms",
];

/// Words that refer to an employer
pub const COMPANY_INDICATORS: &[&str] = &[
    "company", "firm", "startup", "corporation", "organisation", "organization",
    "enterprise", "employer", "subsidiary", "conglomerate", "agency", "business",
];

/// Career and tenure language
pub const TENURE_WORDS: &[&str] = &[
    "since", "years", "tenure", "career", "previously", "formerly", "former", "veteran",
    "decade", "decades", "stint", "experience", "retired", "prior",
];

/// Words that anchor someone to a location
pub const LOCATION_WORDS: &[&str] = &[
    "based", "headquartered", "headquarters", "office", "offices", "located", "region",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_terms_cover_all_categories() {
        assert!(is_invalid_term("Navi Mumbai"));
        assert!(is_invalid_term("monday"));
        assert!(is_invalid_term("Breaking News"));
        assert!(is_invalid_term(" news "));
        assert!(!is_invalid_term("Satya Nadella"));
    }

    #[test]
    fn test_noise_token_exact_and_fuzzy() {
        assert!(is_noise_token("Mumbai"));
        assert!(is_noise_token("Mumbai,"));
        // One edit away from "bengaluru"
        assert!(is_noise_token("Bengaluro"));
        // One deletion away from "wednesday"
        assert!(is_noise_token("Wednesdy"));
        assert!(!is_noise_token("Nadella"));
        assert!(!is_noise_token("Satya"));
        assert!(!is_noise_token(""));
    }

    #[test]
    fn test_short_tokens_need_exact_match() {
        // "pune" is a term but "June" must not be caught by similarity
        assert!(is_noise_token("Pune"));
        assert!(!is_noise_token("June"));
    }

    #[test]
    fn test_contains_boilerplate() {
        assert!(contains_boilerplate("Click here to read more"));
        assert!(contains_boilerplate("See our Terms of Service for details"));
        assert!(contains_boilerplate("Subscribe to our newsletter"));
        assert!(!contains_boilerplate("AI will transform every industry."));
        assert!(!contains_boilerplate("We will launch new products next year."));
        assert!(!contains_boilerplate("We opened in Mumbai today."));
    }

    #[test]
    fn test_name_prefix() {
        assert!(is_name_prefix("Dr."));
        assert!(is_name_prefix("shri"));
        assert!(is_name_prefix("Jr."));
        assert!(!is_name_prefix("Satya"));
    }

    #[test]
    fn test_designation_alias() {
        assert_eq!(designation_alias("Chief  Executive Officer"), Some("CEO"));
        assert_eq!(designation_alias("ceo"), Some("CEO"));
        assert_eq!(designation_alias("Vice President"), Some("VP"));
        assert_eq!(designation_alias("Head of Growth"), None);
        assert!(is_standard_designation("CFO"));
        assert!(!is_standard_designation("cfo"));
    }

    #[test]
    fn test_company_words() {
        assert!(has_company_suffix("Acme Corp."));
        assert!(has_company_suffix("HDFC Bank"));
        assert!(!has_company_suffix("Microsoft"));
        assert!(is_company_word("Ltd."));
    }
}

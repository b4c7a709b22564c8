//! Prospector Extractor - Profile extraction pipeline
//!
//! Turns recognizer spans into professional profiles:
//! - Name validation and normalization
//! - Context windows around each mention
//! - Designation, company and quote extraction from declarative rule tables
//! - Confidence scoring and session-scoped deduplication
//!
//! [`ProfileAssembler`] ties the stages together.

pub mod assembler;
pub mod company;
pub mod context;
pub mod dedup;
pub mod designation;
pub mod lexicon;
pub mod name;
pub mod quote;
pub mod recognizer;
pub mod scoring;
pub mod text;

pub use assembler::{search_reference, Extraction, ExtractionStats, ProfileAssembler};
pub use company::{CompanyCategory, CompanyExtractor, CompanyRule};
pub use context::ContextWindowBuilder;
pub use dedup::{DedupKey, Deduplicator};
pub use designation::{DesignationExtractor, DesignationRule, SeniorityTier, DESIGNATION_RULES};
pub use lexicon::{is_noise_token, NOISE_SIMILARITY_THRESHOLD};
pub use name::{normalize_name, validate_name, NameRejection};
pub use quote::{QuoteExtractor, QuoteLimits};
pub use recognizer::{HeuristicRecognizer, PrecomputedRecognizer};
pub use scoring::{ConfidenceScorer, ContextSignals, MAX_POINTS};

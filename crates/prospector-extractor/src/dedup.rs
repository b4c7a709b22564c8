//! Session-scoped profile deduplication

use std::collections::HashSet;

/// Lower-cased (name, company) pair; company is empty when absent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    name: String,
    company: String,
}

impl DedupKey {
    pub fn new(name: &str, company: Option<&str>) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            company: company.unwrap_or_default().trim().to_lowercase(),
        }
    }
}

/// Keys of every profile emitted in the current session
///
/// One instance per session, owned by the caller and passed into each
/// extraction run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<DedupKey>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a profile with this key was already emitted
    pub fn is_duplicate(&self, name: &str, company: Option<&str>) -> bool {
        self.seen.contains(&DedupKey::new(name, company))
    }

    /// Record a key; returns `false` when it was already present
    pub fn register(&mut self, name: &str, company: Option<&str>) -> bool {
        self.seen.insert(DedupKey::new(name, company))
    }

    /// Forget every key (start a new session)
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup_ignore_case() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.is_empty());
        assert!(dedup.register("Jane Doe", Some("Acme Corp")));
        assert!(dedup.is_duplicate("jane doe", Some("ACME CORP")));
        assert!(!dedup.register(" Jane Doe ", Some("acme corp")));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_company_is_part_of_the_key() {
        let mut dedup = Deduplicator::new();
        dedup.register("Jane Doe", None);
        assert!(dedup.is_duplicate("Jane Doe", None));
        assert!(dedup.is_duplicate("Jane Doe", Some("")));
        assert!(!dedup.is_duplicate("Jane Doe", Some("Acme")));
    }

    #[test]
    fn test_clear() {
        let mut dedup = Deduplicator::new();
        dedup.register("Jane Doe", Some("Acme"));
        dedup.clear();
        assert!(dedup.is_empty());
        assert!(!dedup.is_duplicate("Jane Doe", Some("Acme")));
    }
}

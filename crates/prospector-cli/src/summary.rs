//! Aggregate counts over extracted profiles

use std::collections::HashSet;

use serde::Serialize;

use prospector_core::Profile;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub total: usize,
    pub with_designation: usize,
    pub with_company: usize,
    /// Companies counted case-insensitively
    pub distinct_companies: usize,
}

impl ProfileSummary {
    pub fn from_profiles(profiles: &[Profile]) -> Self {
        let companies: HashSet<String> = profiles
            .iter()
            .filter_map(|p| p.company.as_deref())
            .map(str::to_lowercase)
            .collect();

        Self {
            total: profiles.len(),
            with_designation: profiles.iter().filter(|p| p.designation.is_some()).count(),
            with_company: profiles.iter().filter(|p| p.company.is_some()).count(),
            distinct_companies: companies.len(),
        }
    }
}

impl std::fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total profiles:     {}", self.total)?;
        writeln!(f, "With designation:   {}", self.with_designation)?;
        writeln!(f, "With company:       {}", self.with_company)?;
        writeln!(f, "Distinct companies: {}", self.distinct_companies)
    }
}
